//! Human-readable report

use crate::lint::{Location, Problem};
use indexmap::IndexMap;

/// Lists problems grouped by linter, then by message
///
/// ```text
/// UniqueScenarioNamesLinter
///   Scenario name 'A' is not unique. ...
///     features/a.feature:3
///     features/b.feature:7
///
/// 2 issues found
/// ```
///
/// Linters and messages appear in discovery order, locations sorted by file
/// and line.
pub struct PrettyFormatter<'a> {
    problems: &'a [Problem],
    output: String,
}

impl<'a> PrettyFormatter<'a> {
    /// Create a formatter over `problems`
    #[must_use]
    pub fn new(problems: &'a [Problem]) -> Self {
        Self {
            problems,
            output: String::new(),
        }
    }

    /// Render the report
    #[must_use]
    pub fn generate(mut self) -> String {
        let mut groups: IndexMap<&str, IndexMap<&str, Vec<&Location>>> = IndexMap::new();
        for problem in self.problems {
            groups
                .entry(problem.linter.as_str())
                .or_default()
                .entry(problem.message.as_str())
                .or_default()
                .push(&problem.location);
        }

        for (linter, messages) in groups {
            self.output.push_str(linter);
            self.output.push('\n');

            for (message, mut locations) in messages {
                self.output.push_str(&format!("  {message}\n"));
                locations.sort();
                for location in locations {
                    self.output.push_str(&format!("    {location}\n"));
                }
            }
        }

        if !self.problems.is_empty() {
            self.output.push('\n');
        }
        self.output
            .push_str(&format!("{} issues found\n", self.problems.len()));

        self.output
    }
}
