//! Token definitions for Gherkin lines

use logos::Logos;

/// Leading keyword of a Gherkin line
///
/// Only the start of a trimmed line is lexed; the rest of the line is the
/// keyword's payload (a name, step text, or table cells).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `Feature:`
    #[token("Feature:")]
    Feature,

    /// `Rule:`
    #[token("Rule:")]
    Rule,

    /// `Background:`
    #[token("Background:")]
    Background,

    /// `Scenario:` or its synonym `Example:`
    #[token("Scenario:")]
    #[token("Example:")]
    Scenario,

    /// `Scenario Outline:` or its synonym `Scenario Template:`
    #[token("Scenario Outline:")]
    #[token("Scenario Template:")]
    Outline,

    /// `Examples:` or its synonym `Scenarios:`
    #[token("Examples:")]
    #[token("Scenarios:")]
    Examples,

    /// Step keyword
    #[token("Given ")]
    #[token("When ")]
    #[token("Then ")]
    #[token("And ")]
    #[token("But ")]
    #[token("* ")]
    Step,

    /// Table row delimiter
    #[token("|")]
    Pipe,

    /// Tag marker
    #[token("@")]
    Tag,

    /// Comment marker
    #[token("#")]
    Comment,

    /// Doc string fence
    #[token("\"\"\"")]
    #[token("```")]
    DocString,
}

impl Token {
    /// Check if this token opens a scenario-like block
    #[must_use]
    pub const fn starts_scenario(self) -> bool {
        matches!(self, Token::Background | Token::Scenario | Token::Outline)
    }

    /// Check if this token opens any block
    #[must_use]
    pub const fn starts_block(self) -> bool {
        matches!(self, Token::Feature | Token::Rule) || self.starts_scenario()
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Token::Feature => "`Feature:`",
            Token::Rule => "`Rule:`",
            Token::Background => "`Background:`",
            Token::Scenario => "`Scenario:`",
            Token::Outline => "`Scenario Outline:`",
            Token::Examples => "`Examples:`",
            Token::Step => "step",
            Token::Pipe => "table row",
            Token::Tag => "tag",
            Token::Comment => "comment",
            Token::DocString => "doc string",
        };
        write!(f, "{text}")
    }
}
