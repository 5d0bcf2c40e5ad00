//! Problem report formatting
//!
//! - `PrettyFormatter`: human-readable grouped listing
//! - `JsonFormatter`: machine-readable JSON array

mod json;
mod pretty;

pub use json::JsonFormatter;
pub use pretty::PrettyFormatter;

use crate::lint::Problem;

/// Output format of a lint report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Problems grouped by linter and message
    #[default]
    Pretty,
    /// JSON array of problem records
    Json,
}

impl Format {
    /// Render `problems` in this format
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(self, problems: &[Problem]) -> Result<String, serde_json::Error> {
        match self {
            Format::Pretty => Ok(PrettyFormatter::new(problems).generate()),
            Format::Json => JsonFormatter::new(problems).generate(),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Pretty => write!(f, "pretty"),
            Format::Json => write!(f, "json"),
        }
    }
}
