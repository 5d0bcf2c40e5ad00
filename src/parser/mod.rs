//! Parser for Gherkin feature files
//!
//! This module implements a line-oriented recursive descent parser that turns
//! classified lines into a [`Document`]. Only the structure the linters need
//! is modelled: features, rules, backgrounds, scenarios, outlines and their
//! examples tables. Steps, tags, comments, descriptions and doc strings are
//! consumed and dropped.

mod error;

pub use error::{ParseError, ParseResult};

use crate::lexer::{self, Line, Token};
use crate::model::{Document, DocumentBuilder, NodeId, NodeKind};
use std::path::PathBuf;

/// Parser for Gherkin feature files
pub struct Parser<'src> {
    /// Classified lines
    lines: Vec<Line<'src>>,
    /// Current position in the line stream
    pos: usize,
    /// Tree under construction
    builder: DocumentBuilder,
}

impl<'src> Parser<'src> {
    /// Create a new parser for the file at `path` with the given source
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, source: &'src str) -> Self {
        Self {
            lines: lexer::tokenize(source),
            pos: 0,
            builder: DocumentBuilder::new(NodeKind::File { path: path.into() }, 1),
        }
    }

    /// Parse the whole file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is not a well-formed feature file
    pub fn parse(mut self) -> ParseResult<Document> {
        self.skip_ignorable();

        if let Some(line) = self.peek() {
            if line.token != Some(Token::Feature) {
                return Err(Self::unexpected(&line, "`Feature:`"));
            }
            self.parse_feature()?;
        }

        if let Some(line) = self.peek() {
            return Err(ParseError::DuplicateFeature {
                line: line.number,
                span: line.span,
            });
        }

        Ok(self.builder.build())
    }

    // ========== Blocks ==========

    /// Parse `Feature:` and everything under it, stopping at a second feature
    fn parse_feature(&mut self) -> ParseResult<()> {
        let line = self.advance_line();
        let root = self.builder.root();
        let feature = self.builder.push(
            root,
            NodeKind::Feature {
                name: line.text.into(),
            },
            line.number,
        );

        while let Some(line) = self.peek() {
            match line.token {
                None | Some(Token::Comment | Token::Tag) => self.pos += 1,
                Some(Token::Rule) => self.parse_rule(feature)?,
                Some(Token::Background | Token::Scenario | Token::Outline) => {
                    self.parse_scenario(feature)?;
                }
                Some(Token::Feature) => return Ok(()),
                Some(Token::Examples) => return Err(Self::examples_outside_outline(&line)),
                Some(Token::Step | Token::Pipe | Token::DocString) => {
                    return Err(Self::unexpected(&line, "a scenario, rule or background"));
                }
            }
        }

        Ok(())
    }

    /// Parse `Rule:` and its scenarios, stopping at the next rule or feature
    fn parse_rule(&mut self, feature: NodeId) -> ParseResult<()> {
        let line = self.advance_line();
        let rule = self.builder.push(
            feature,
            NodeKind::Rule {
                name: line.text.into(),
            },
            line.number,
        );

        while let Some(line) = self.peek() {
            match line.token {
                None | Some(Token::Comment | Token::Tag) => self.pos += 1,
                Some(Token::Background | Token::Scenario | Token::Outline) => {
                    self.parse_scenario(rule)?;
                }
                Some(Token::Rule | Token::Feature) => return Ok(()),
                Some(Token::Examples) => return Err(Self::examples_outside_outline(&line)),
                Some(Token::Step | Token::Pipe | Token::DocString) => {
                    return Err(Self::unexpected(&line, "a scenario or background"));
                }
            }
        }

        Ok(())
    }

    /// Parse a background, scenario or outline with its steps
    fn parse_scenario(&mut self, parent: NodeId) -> ParseResult<()> {
        let line = self.advance_line();
        let name = line.text.into();
        let (kind, is_outline) = match line.token {
            Some(Token::Background) => (NodeKind::Background { name }, false),
            Some(Token::Outline) => (NodeKind::Outline { name }, true),
            // A scenario with examples is an outline
            _ if self.body_has_examples() => (NodeKind::Outline { name }, true),
            _ => (NodeKind::Scenario { name }, false),
        };
        let node = self.builder.push(parent, kind, line.number);

        while let Some(line) = self.peek() {
            match line.token {
                // Descriptions, step text and step data tables are not modelled
                None | Some(Token::Comment | Token::Tag | Token::Step | Token::Pipe) => {
                    self.pos += 1;
                }
                Some(Token::DocString) => self.skip_doc_string()?,
                Some(Token::Examples) if is_outline => self.parse_examples(node)?,
                Some(Token::Examples) => return Err(Self::examples_outside_outline(&line)),
                Some(
                    Token::Feature
                    | Token::Rule
                    | Token::Background
                    | Token::Scenario
                    | Token::Outline,
                ) => return Ok(()),
            }
        }

        Ok(())
    }

    /// Parse an `Examples:` block and its table
    fn parse_examples(&mut self, outline: NodeId) -> ParseResult<()> {
        let line = self.advance_line();
        let examples = self.builder.push(
            outline,
            NodeKind::Examples {
                name: line.text.into(),
            },
            line.number,
        );
        let mut width = None;

        while let Some(line) = self.peek() {
            match line.token {
                None | Some(Token::Comment | Token::Tag) => self.pos += 1,
                Some(Token::Pipe) => {
                    let cells = split_cells(line.content);
                    match width {
                        None => width = Some(cells.len()),
                        Some(expected) if expected != cells.len() => {
                            return Err(ParseError::MisalignedRow {
                                expected,
                                found: cells.len(),
                                line: line.number,
                                span: line.span,
                            });
                        }
                        Some(_) => {}
                    }
                    self.builder.push_row(examples, &cells, line.number);
                    self.pos += 1;
                }
                Some(Token::Step | Token::DocString) => {
                    return Err(Self::unexpected(&line, "an examples table row"));
                }
                Some(
                    Token::Examples
                    | Token::Feature
                    | Token::Rule
                    | Token::Background
                    | Token::Scenario
                    | Token::Outline,
                ) => return Ok(()),
            }
        }

        Ok(())
    }

    /// Skip a doc string, fences included
    fn skip_doc_string(&mut self) -> ParseResult<()> {
        let open = self.advance_line();
        let fence = &open.content[..3];

        while let Some(line) = self.peek() {
            self.pos += 1;
            if line.content.starts_with(fence) {
                return Ok(());
            }
        }

        Err(ParseError::UnterminatedDocString {
            line: open.number,
            span: open.span,
        })
    }

    // ========== Helper Methods ==========

    /// Check if the block starting at the current line has an `Examples:`
    /// section before the next block keyword
    fn body_has_examples(&self) -> bool {
        let mut fence: Option<&str> = None;

        for line in &self.lines[self.pos..] {
            if let Some(open) = fence {
                if line.content.starts_with(open) {
                    fence = None;
                }
                continue;
            }
            match line.token {
                Some(Token::DocString) => fence = Some(&line.content[..3]),
                Some(Token::Examples) => return true,
                Some(
                    Token::Feature
                    | Token::Rule
                    | Token::Background
                    | Token::Scenario
                    | Token::Outline,
                ) => return false,
                _ => {}
            }
        }

        false
    }

    /// Skip blank lines, comments and tags
    fn skip_ignorable(&mut self) {
        while let Some(line) = self.peek() {
            if !(line.is_blank() || matches!(line.token, Some(Token::Comment | Token::Tag))) {
                break;
            }
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<Line<'src>> {
        self.lines.get(self.pos).copied()
    }

    /// Consume the current line; callers have already peeked it
    fn advance_line(&mut self) -> Line<'src> {
        let line = self.lines[self.pos];
        self.pos += 1;
        line
    }

    fn unexpected(line: &Line<'_>, expected: &str) -> ParseError {
        let found = match line.token {
            Some(token) => token.to_string(),
            None => format!("text `{}`", line.content),
        };
        ParseError::unexpected(expected, found, line.number, line.span)
    }

    fn examples_outside_outline(line: &Line<'_>) -> ParseError {
        ParseError::ExamplesOutsideOutline {
            line: line.number,
            span: line.span,
        }
    }
}

/// Split a table row into trimmed cells
///
/// Text before the first and after the last unescaped `|` is dropped.
/// Supported escapes are `\|`, `\\` and `\n`.
fn split_cells(row: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut opened = false;
    let mut chars = row.chars();

    while let Some(c) = chars.next() {
        match c {
            '|' => {
                if opened {
                    cells.push(cell.trim().to_string());
                }
                cell.clear();
                opened = true;
            }
            '\\' => match chars.next() {
                Some('|') => cell.push('|'),
                Some('\\') => cell.push('\\'),
                Some('n') => cell.push('\n'),
                Some(other) => {
                    cell.push('\\');
                    cell.push(other);
                }
                None => cell.push('\\'),
            },
            _ => cell.push(c),
        }
    }

    cells
}

/// Parse a feature file
///
/// # Errors
///
/// Returns an error if parsing fails
pub fn parse(path: impl Into<PathBuf>, source: &str) -> ParseResult<Document> {
    Parser::new(path, source).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeRef, NodeTag};
    use std::path::Path;

    fn tags(doc: &Document) -> Vec<(NodeTag, usize)> {
        doc.walk()
            .filter(|node| !node.is(NodeTag::Cell))
            .map(|node| (node.tag(), node.line()))
            .collect()
    }

    #[test]
    fn test_parse_empty_file() {
        let doc = parse("empty.feature", "").unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.path(), Some(Path::new("empty.feature")));
    }

    #[test]
    fn test_parse_only_comments() {
        let doc = parse("c.feature", "# language: en\n\n# nothing here\n").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_parse_feature_with_scenarios() {
        let source = r"@billing
Feature: Invoices
  Invoices are generated monthly.

  Background:
    Given a customer

  Scenario: Generate an invoice
    When the month ends
    Then an invoice exists
";
        let doc = parse("invoices.feature", source).unwrap();
        assert_eq!(
            tags(&doc),
            vec![
                (NodeTag::File, 1),
                (NodeTag::Feature, 2),
                (NodeTag::Background, 5),
                (NodeTag::Scenario, 8),
            ]
        );

        let scenario = doc.walk().find(|n| n.is(NodeTag::Scenario)).unwrap();
        assert_eq!(scenario.name(), Some("Generate an invoice"));
        let feature = scenario.parent().unwrap();
        assert_eq!(feature.name(), Some("Invoices"));
    }

    #[test]
    fn test_parse_outline_with_examples() {
        let source = r"Feature: Outline

  Scenario Outline: Add <a> and <b>
    Given <a> and <b>

    Examples: small
      | a | b |
      | 1 | 2 |
      # a comment inside the table
      | 3 | 4 |

    Examples:
      | a | b |
      | 5 | 6 |
";
        let doc = parse("outline.feature", source).unwrap();
        let outline = doc.walk().find(|n| n.is(NodeTag::Outline)).unwrap();
        assert_eq!(outline.name(), Some("Add <a> and <b>"));
        assert_eq!(outline.line(), 3);

        let examples: Vec<NodeRef<'_>> = outline.children_of(NodeTag::Examples).collect();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].name(), Some("small"));
        assert_eq!(examples[0].line(), 6);

        let rows: Vec<_> = examples[0].children_of(NodeTag::Row).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].cells(), vec!["a", "b"]);
        assert_eq!(rows[2].cells(), vec!["3", "4"]);
        assert_eq!(rows[2].line(), 10);
    }

    #[test]
    fn test_parse_rules() {
        let source = r"Feature: Rules

  Scenario: Top level

  Rule: First
    Scenario: Inside first

  Rule: Second
    Background:
      Given something
    Scenario Outline: Inside second <x>
      Examples:
        | x |
        | 1 |
";
        let doc = parse("rules.feature", source).unwrap();
        assert_eq!(
            tags(&doc),
            vec![
                (NodeTag::File, 1),
                (NodeTag::Feature, 1),
                (NodeTag::Scenario, 3),
                (NodeTag::Rule, 5),
                (NodeTag::Scenario, 6),
                (NodeTag::Rule, 8),
                (NodeTag::Background, 9),
                (NodeTag::Outline, 11),
                (NodeTag::Examples, 12),
                (NodeTag::Row, 13),
                (NodeTag::Row, 14),
            ]
        );

        let outline = doc.walk().find(|n| n.is(NodeTag::Outline)).unwrap();
        assert_eq!(outline.ancestor(NodeTag::Rule).and_then(NodeRef::name), Some("Second"));
    }

    #[test]
    fn test_doc_strings_are_skipped() {
        let source = r#"Feature: Docs

  Scenario: With a doc string
    Given the payload
      """
      Scenario: not a real scenario
      | not | a | table |
      """
    Then it is accepted

  Scenario: After
"#;
        let doc = parse("docs.feature", source).unwrap();
        let names: Vec<_> = doc
            .walk()
            .filter(|n| n.is(NodeTag::Scenario))
            .filter_map(NodeRef::name)
            .collect();
        assert_eq!(names, vec!["With a doc string", "After"]);
    }

    #[test]
    fn test_step_data_tables_are_skipped() {
        let source = "Feature: F\n  Scenario: S\n    Given users\n      | name |\n      | bob  |\n";
        let doc = parse("f.feature", source).unwrap();
        assert!(doc.walk().all(|n| !n.is(NodeTag::Row)));
    }

    #[test]
    fn test_split_cells_escapes() {
        assert_eq!(split_cells("| a | b |"), vec!["a", "b"]);
        assert_eq!(split_cells(r"| a\|b | c\\d |"), vec!["a|b", r"c\d"]);
        assert_eq!(split_cells(r"| line\nbreak |"), vec!["line\nbreak"]);
        assert_eq!(split_cells("|  |"), vec![""]);
        assert_eq!(split_cells("| a | trailing"), vec!["a"]);
    }

    #[test]
    fn test_error_text_before_feature() {
        let err = parse("bad.feature", "hello\nFeature: F\n").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedLine { line: 1, .. }));
    }

    #[test]
    fn test_error_second_feature() {
        let err = parse("bad.feature", "Feature: A\nFeature: B\n").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateFeature { line: 2, .. }));
    }

    #[test]
    fn test_error_examples_outside_outline() {
        let source = "Feature: A\n  Background:\n    Examples:\n      | x |\n";
        let err = parse("bad.feature", source).unwrap_err();
        assert!(matches!(err, ParseError::ExamplesOutsideOutline { line: 3, .. }));
    }

    #[test]
    fn test_scenario_with_examples_is_outline() {
        let source = "Feature: A\n  Example: Add <x>\n    Given <x>\n    Examples:\n      | x |\n      | 1 |\n  Scenario: Plain\n";
        let doc = parse("modern.feature", source).unwrap();
        assert_eq!(
            tags(&doc),
            vec![
                (NodeTag::File, 1),
                (NodeTag::Feature, 1),
                (NodeTag::Outline, 2),
                (NodeTag::Examples, 4),
                (NodeTag::Row, 5),
                (NodeTag::Row, 6),
                (NodeTag::Scenario, 7),
            ]
        );
    }

    #[test]
    fn test_examples_inside_doc_string_do_not_make_an_outline() {
        let source = "Feature: A\n  Scenario: S\n    Given text\n      \"\"\"\n      Examples:\n      \"\"\"\n";
        let doc = parse("doc.feature", source).unwrap();
        assert!(doc.walk().any(|n| n.is(NodeTag::Scenario)));
        assert!(!doc.walk().any(|n| n.is(NodeTag::Outline)));
    }

    #[test]
    fn test_error_misaligned_row() {
        let source = "Feature: A\n  Scenario Outline: S <x>\n    Examples:\n      | x |\n      | 1 | 2 |\n";
        let err = parse("bad.feature", source).unwrap_err();
        assert_eq!(
            err,
            ParseError::MisalignedRow {
                expected: 1,
                found: 2,
                line: 5,
                span: err.span(),
            }
        );
        assert_eq!(err.line(), 5);
    }

    #[test]
    fn test_error_step_outside_scenario() {
        let err = parse("bad.feature", "Feature: A\n  Given a step\n").unwrap_err();
        assert_eq!(err.line(), 2);
        assert!(err.to_string().contains("unexpected step"));
    }

    #[test]
    fn test_error_unterminated_doc_string() {
        let source = "Feature: A\n  Scenario: S\n    Given x\n      \"\"\"\n      text\n";
        let err = parse("bad.feature", source).unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedDocString { line: 4, .. }));
    }

    #[test]
    fn test_error_span_points_at_line() {
        let source = "Feature: A\n  Feature: B\n";
        let err = parse("bad.feature", source).unwrap_err();
        let span = err.span();
        assert_eq!(&source[span.start..span.end], "Feature: B");
    }
}
