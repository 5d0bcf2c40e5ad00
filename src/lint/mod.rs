//! Linters and the runner that drives them
//!
//! A linter is visited once per model node during a lint pass and may report
//! at most one [`Problem`] per visit. Linters can keep state across visits
//! (to compare nodes with each other); the [`LintRunner`] clears that state
//! before and after every pass so independent passes never see each other's
//! nodes.

mod runner;
pub mod unique_names;

pub use runner::LintRunner;
pub use unique_names::UniqueScenarioNames;

use crate::model::NodeRef;
use smol_str::SmolStr;
use std::path::PathBuf;

/// A check over document nodes
pub trait Linter: Send {
    /// Unique name, also used as the configuration key
    fn name(&self) -> &'static str;

    /// Short description of what this linter checks
    fn description(&self) -> &'static str;

    /// Inspect a single node
    fn lint(&mut self, node: NodeRef<'_>) -> Option<Problem>;

    /// Forget everything recorded during the current pass
    fn clear_state(&mut self) {}
}

/// A problem found by a linter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// Name of the linter that reported it
    pub linter: SmolStr,
    /// Human-readable description
    pub message: String,
    /// Where the problem is
    pub location: Location,
}

impl Problem {
    /// Create a new problem
    #[must_use]
    pub fn new(linter: impl Into<SmolStr>, message: impl Into<String>, location: Location) -> Self {
        Self {
            linter: linter.into(),
            message: message.into(),
            location,
        }
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// A `file:line` location
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    /// Feature file path
    pub file: PathBuf,
    /// 1-based line
    pub line: usize,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}
