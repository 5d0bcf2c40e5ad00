//! Lexical analysis for Gherkin feature files
//!
//! Gherkin is line oriented, so the lexer works one line at a time: each
//! trimmed line is classified by its leading keyword using the logos crate,
//! and the remainder becomes the line's payload.

mod token;

use logos::Logos;
pub use token::Token;

use crate::Span;

/// A classified source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'src> {
    /// 1-based line number
    pub number: usize,
    /// Leading keyword, `None` for free text and blank lines
    pub token: Option<Token>,
    /// The trimmed line, keyword included
    pub content: &'src str,
    /// Text after the keyword, trimmed
    pub text: &'src str,
    /// Byte range of `content` in the source
    pub span: Span,
}

impl<'src> Line<'src> {
    /// Classify a single line
    #[must_use]
    pub fn lex(number: usize, offset: usize, raw: &'src str) -> Self {
        let content = raw.trim();
        let start = offset + (raw.len() - raw.trim_start().len());
        let span = Span::new(start, start + content.len());

        let mut lexer = Token::lexer(content);
        let (token, text) = match lexer.next() {
            Some(Ok(token)) => (Some(token), lexer.remainder().trim()),
            Some(Err(())) | None => (None, content),
        };

        Self {
            number,
            token,
            content,
            text,
            span,
        }
    }

    /// Check if the line holds nothing but whitespace
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.is_empty()
    }

    /// Check if the line carries no structure (blank, comment, tag or free text)
    #[must_use]
    pub fn is_trivia(&self) -> bool {
        matches!(self.token, None | Some(Token::Comment | Token::Tag))
    }
}

/// Iterator over the classified lines of a source text
pub struct Lexer<'src> {
    source: &'src str,
    offset: usize,
    number: usize,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            number: 0,
        }
    }

    /// Get the remaining source text
    #[must_use]
    pub fn remainder(&self) -> &'src str {
        &self.source[self.offset..]
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Line<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.remainder();
        if rest.is_empty() {
            return None;
        }

        let len = rest.find('\n').map_or(rest.len(), |i| i + 1);
        let raw = &rest[..len];
        let offset = self.offset;

        self.offset += len;
        self.number += 1;

        Some(Line::lex(self.number, offset, raw))
    }
}

/// Classify every line of a source text
#[must_use]
pub fn tokenize(source: &str) -> Vec<Line<'_>> {
    Lexer::new(source).collect()
}
