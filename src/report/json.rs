//! JSON report

use crate::lint::Problem;
use serde::Serialize;

/// One problem as written to JSON
#[derive(Debug, Serialize)]
struct Record<'a> {
    linter: &'a str,
    problem: &'a str,
    location: String,
}

/// Writes problems as a JSON array of `{linter, problem, location}` objects
pub struct JsonFormatter<'a> {
    problems: &'a [Problem],
}

impl<'a> JsonFormatter<'a> {
    /// Create a formatter over `problems`
    #[must_use]
    pub fn new(problems: &'a [Problem]) -> Self {
        Self { problems }
    }

    /// Render the report
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn generate(self) -> Result<String, serde_json::Error> {
        let records: Vec<Record<'_>> = self
            .problems
            .iter()
            .map(|problem| Record {
                linter: &problem.linter,
                problem: &problem.message,
                location: problem.location.to_string(),
            })
            .collect();

        let mut output = serde_json::to_string_pretty(&records)?;
        output.push('\n');
        Ok(output)
    }
}
