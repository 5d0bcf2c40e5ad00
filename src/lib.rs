//! gherlint: a rule-based linter for Gherkin feature files
//!
//! gherlint parses `.feature` files into an immutable document model and runs
//! a set of linters over every node of that model, collecting problems with
//! their `file:line` locations.
//!
//! # Features
//!
//! - **Document model**: an arena tree of files, features, rules, scenarios,
//!   outlines and examples tables with parent navigation
//! - **Parser**: a line-oriented Gherkin parser built on a `logos` line lexer
//! - **Linters**: pluggable checks driven by a [`lint::LintRunner`]
//! - **Reports**: pretty and JSON formatters
//!
//! # Example
//!
//! ```
//! use gherlint::lint::LintRunner;
//! use gherlint::parser;
//!
//! let source = "Feature: Login\n\n  Scenario: Sign in\n    Given a user\n\n  Scenario: Sign in\n    Given a user\n";
//! let document = parser::parse("features/login.feature", source).unwrap();
//!
//! let mut runner = LintRunner::with_default_linters();
//! let problems = runner.lint(&[document]);
//!
//! assert_eq!(problems.len(), 1);
//! assert_eq!(problems[0].location.to_string(), "features/login.feature:6");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod lexer;
pub mod lint;
pub mod model;
pub mod parser;
pub mod project;
pub mod report;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes
    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span covers no bytes
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}
