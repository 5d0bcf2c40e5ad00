//! Parser error types

use crate::Span;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

/// A parse error with location and context
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    /// A line that cannot appear where it was found
    #[error("line {line}: unexpected {found}, expected {expected}")]
    UnexpectedLine {
        /// What we expected
        expected: String,
        /// What we found
        found: String,
        /// 1-based line number
        line: usize,
        /// Location of the line
        #[label("here")]
        span: Span,
    },

    /// A second `Feature:` in one file
    #[error("line {line}: a file may only contain one feature")]
    DuplicateFeature {
        /// 1-based line number
        line: usize,
        /// Location of the second feature
        #[label("second feature")]
        span: Span,
    },

    /// `Examples:` outside a scenario outline
    #[error("line {line}: examples are only allowed under a scenario outline")]
    ExamplesOutsideOutline {
        /// 1-based line number
        line: usize,
        /// Location of the examples keyword
        #[label("not inside a scenario outline")]
        span: Span,
    },

    /// An examples row whose width differs from the header
    #[error("line {line}: row has {found} cells, but the header has {expected}")]
    MisalignedRow {
        /// Header width
        expected: usize,
        /// Row width
        found: usize,
        /// 1-based line number
        line: usize,
        /// Location of the row
        #[label("inconsistent cell count")]
        span: Span,
    },

    /// A doc string that is never closed
    #[error("line {line}: doc string is never closed")]
    UnterminatedDocString {
        /// 1-based line number of the opening fence
        line: usize,
        /// Location of the opening fence
        #[label("opened here")]
        span: Span,
    },
}

impl ParseError {
    /// Create an unexpected line error
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: impl Into<String>, line: usize, span: Span) -> Self {
        ParseError::UnexpectedLine {
            expected: expected.into(),
            found: found.into(),
            line,
            span,
        }
    }

    /// Get the span of the error
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedLine { span, .. }
            | ParseError::DuplicateFeature { span, .. }
            | ParseError::ExamplesOutsideOutline { span, .. }
            | ParseError::MisalignedRow { span, .. }
            | ParseError::UnterminatedDocString { span, .. } => *span,
        }
    }

    /// Get the 1-based line of the error
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedLine { line, .. }
            | ParseError::DuplicateFeature { line, .. }
            | ParseError::ExamplesOutsideOutline { line, .. }
            | ParseError::MisalignedRow { line, .. }
            | ParseError::UnterminatedDocString { line, .. } => *line,
        }
    }
}
