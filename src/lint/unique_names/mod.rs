//! Duplicate scenario name detection
//!
//! Scenario names must be unique within their scope: the scenarios directly
//! under a feature share one scope per file, and the scenarios of a rule
//! share one scope per rule name. Outlines contribute one name per examples
//! row, so an outline whose title ignores its columns collides with itself.
//!
//! Scenarios and outlines inside a rule are checked when the rule is
//! visited, scenarios first and outlines second. Only the first problem
//! found in a rule is reported for that visit; later duplicates inside the
//! same rule are recorded but not reported.

mod ledger;
mod names;
mod scope;

pub use ledger::{Duplicate, NameLedger};
pub use names::{interpolate, resolve};
pub use scope::{scope_of, Scope, ScopeKey};

use super::{Linter, Location, Problem};
use crate::model::{NodeKind, NodeRef, NodeTag};
use tracing::{debug, trace};

const SCENARIO_SUBJECT: &str = "Scenario name";
const OUTLINE_SUBJECT: &str = "Scenario name created by Scenario Outline";

/// Linter that reports scenarios whose names are not unique in their scope
#[derive(Debug, Default)]
pub struct UniqueScenarioNames {
    ledger: NameLedger,
}

/// How a node takes part in name checking
enum Visit<'doc> {
    NotApplicable,
    Scenario(NodeRef<'doc>),
    Outline(NodeRef<'doc>),
    Rule(NodeRef<'doc>),
}

impl<'doc> Visit<'doc> {
    fn classify(node: NodeRef<'doc>) -> Self {
        match node.kind() {
            NodeKind::Rule { .. } => Visit::Rule(node),
            // Checked by their rule
            NodeKind::Scenario { .. } | NodeKind::Outline { .. }
                if node.ancestor(NodeTag::Rule).is_some() =>
            {
                Visit::NotApplicable
            }
            NodeKind::Scenario { .. } => Visit::Scenario(node),
            NodeKind::Outline { .. } => Visit::Outline(node),
            NodeKind::File { .. }
            | NodeKind::Feature { .. }
            | NodeKind::Background { .. }
            | NodeKind::Examples { .. }
            | NodeKind::Row
            | NodeKind::Cell { .. } => Visit::NotApplicable,
        }
    }
}

impl UniqueScenarioNames {
    /// Linter name
    pub const NAME: &'static str = "UniqueScenarioNamesLinter";

    /// Create a linter with an empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check one node, recording the names it contributes
    pub fn evaluate(&mut self, node: NodeRef<'_>) -> Option<Problem> {
        match Visit::classify(node) {
            Visit::NotApplicable => None,
            Visit::Rule(rule) => check_rule(&mut self.ledger, rule),
            Visit::Scenario(scenario) => check_scenario(&mut self.ledger, scenario),
            Visit::Outline(outline) => check_outline(&mut self.ledger, outline),
        }
    }

    /// Forget every name recorded so far
    pub fn clear_state(&mut self) {
        self.ledger.clear();
    }

    /// Names recorded during the current pass
    #[must_use]
    pub fn ledger(&self) -> &NameLedger {
        &self.ledger
    }
}

impl Linter for UniqueScenarioNames {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Checks that scenario names are unique within their feature file or rule"
    }

    fn lint(&mut self, node: NodeRef<'_>) -> Option<Problem> {
        self.evaluate(node)
    }

    fn clear_state(&mut self) {
        UniqueScenarioNames::clear_state(self);
    }
}

fn check_rule(ledger: &mut NameLedger, rule: NodeRef<'_>) -> Option<Problem> {
    let scenarios = rule
        .children_of(NodeTag::Scenario)
        .map(|scenario| (scenario, true));
    let outlines = rule
        .children_of(NodeTag::Outline)
        .map(|outline| (outline, false));

    let mut first = None;
    for (node, is_scenario) in scenarios.chain(outlines) {
        let problem = if is_scenario {
            check_scenario(ledger, node)
        } else {
            check_outline(ledger, node)
        };

        if first.is_none() {
            first = problem;
        } else if let Some(suppressed) = problem {
            debug!(
                location = %suppressed.location,
                "suppressing further duplicate in rule `{}`",
                rule.name().unwrap_or_default()
            );
        }
    }

    first
}

fn check_scenario(ledger: &mut NameLedger, scenario: NodeRef<'_>) -> Option<Problem> {
    let Some(scope) = scope_of(scenario) else {
        trace!(line = scenario.line(), "scenario is not attached to a file, skipping");
        return None;
    };
    let name = scenario.name().unwrap_or_default();

    ledger.record(name, &scope.key, scenario.line());

    let duplicate = ledger.duplicate(name, &scope.key)?;
    Some(duplicate_problem(
        SCENARIO_SUBJECT,
        name,
        duplicate,
        Location::new(scope.file, scenario.line()),
    ))
}

fn check_outline(ledger: &mut NameLedger, outline: NodeRef<'_>) -> Option<Problem> {
    let Some(scope) = scope_of(outline) else {
        trace!(line = outline.line(), "outline is not attached to a file, skipping");
        return None;
    };
    let names = resolve(outline);

    // Rows carry no lines of their own in the name check; every generated
    // name belongs to the outline
    for name in &names {
        ledger.record(name, &scope.key, outline.line());
    }

    let (name, duplicate) = names
        .iter()
        .find_map(|name| Some((name, ledger.duplicate(name, &scope.key)?)))?;
    Some(duplicate_problem(
        OUTLINE_SUBJECT,
        name,
        duplicate,
        Location::new(scope.file, outline.line()),
    ))
}

fn duplicate_problem(subject: &str, name: &str, duplicate: Duplicate<'_>, location: Location) -> Problem {
    let message = format!(
        "{subject} '{name}' is not unique. \n    Original name is on line: {} \n    Duplicate is on: {}",
        duplicate.original,
        duplicate.duplicate_lines()
    );
    Problem::new(UniqueScenarioNames::NAME, message, location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Document, DocumentBuilder};
    use crate::parser::parse;
    use std::path::PathBuf;

    fn lint(documents: &[Document]) -> Vec<Problem> {
        let mut linter = UniqueScenarioNames::new();
        documents
            .iter()
            .flat_map(Document::walk)
            .filter_map(|node| linter.evaluate(node))
            .collect()
    }

    fn lint_source(path: &str, source: &str) -> Vec<Problem> {
        lint(&[parse(path, source).unwrap()])
    }

    fn scenario_message(name: &str, original: usize, duplicates: &str) -> String {
        format!(
            "Scenario name '{name}' is not unique. \n    Original name is on line: {original} \n    Duplicate is on: {duplicates}"
        )
    }

    fn outline_message(name: &str, original: usize, duplicates: &str) -> String {
        format!(
            "Scenario name created by Scenario Outline '{name}' is not unique. \n    Original name is on line: {original} \n    Duplicate is on: {duplicates}"
        )
    }

    // ========== Unique names ==========

    #[test]
    fn test_same_name_in_different_files() {
        let first = parse(
            "features/first_feature.feature",
            "Feature: First Feature\n\n  Scenario: Common Scenario Name\n    Given some precondition\n",
        )
        .unwrap();
        let second = parse(
            "features/second_feature.feature",
            "Feature: Second Feature\n\n  Scenario: Common Scenario Name\n    When some action\n",
        )
        .unwrap();

        assert!(lint(&[first.clone(), second.clone()]).is_empty());
        assert!(lint(&[second, first]).is_empty());
    }

    #[test]
    fn test_unique_names_within_a_file() {
        let source = r"Feature: Unique Scenarios Feature

  Scenario: First Unique Scenario
    Given a step

  Scenario: Second Unique Scenario
    When another step

  Scenario Outline: Unique Outline Scenario <param>
    Then a different step

  Examples:
    | param  |
    | Param1 |
    | Param2 |
";
        assert!(lint_source("features/unique_feature.feature", source).is_empty());
    }

    #[test]
    fn test_outline_generating_unique_names() {
        let source = r"Feature: Unique Outline Feature

  Scenario Outline: Thing <x>
    Given a step

  Examples:
    | x |
    | A |
    | B |
";
        assert!(lint_source("features/unique_outline.feature", source).is_empty());
    }

    #[test]
    fn test_same_name_in_different_rules() {
        let source = r"Feature: Rules

  Scenario: Shared name

  Rule: First
    Scenario: Shared name

  Rule: Second
    Scenario: Shared name
";
        assert!(lint_source("features/rules.feature", source).is_empty());
    }

    // ========== Duplicate names ==========

    #[test]
    fn test_duplicate_scenarios_in_one_file() {
        let source = r"Feature: Sample Feature

  Scenario: Duplicate Scenario
    Given a step

  Scenario: Duplicate Scenario
    When another step
";
        let problems = lint_source("features/sample_feature.feature", source);
        assert_eq!(
            problems,
            vec![Problem::new(
                UniqueScenarioNames::NAME,
                scenario_message("Duplicate Scenario", 3, "6"),
                Location::new("features/sample_feature.feature", 6),
            )]
        );
        assert_eq!(
            problems[0].location.to_string(),
            "features/sample_feature.feature:6"
        );
    }

    #[test]
    fn test_every_later_duplicate_is_reported() {
        let source = "Feature: F\n  Scenario: A\n  Scenario: A\n  Scenario: A\n";
        let problems = lint_source("f.feature", source);
        let messages: Vec<_> = problems.iter().map(|p| p.message.clone()).collect();
        assert_eq!(
            messages,
            vec![scenario_message("A", 2, "3"), scenario_message("A", 2, "3, 4")]
        );
        assert_eq!(problems[1].location.line, 4);
    }

    #[test]
    fn test_outline_rows_generating_duplicates() {
        let source = r"Feature: Outline Feature

  Scenario Outline: Repeating Scenario <item>
    Given a step with <item>

  Examples:
    | item  |
    | Test1 |
    | Test1 |
";
        let problems = lint_source("features/outline_feature.feature", source);
        assert_eq!(problems.len(), 1);
        assert_eq!(
            problems[0].message,
            outline_message("Repeating Scenario Test1", 3, "3")
        );
        assert_eq!(
            problems[0].location.to_string(),
            "features/outline_feature.feature:3"
        );
    }

    #[test]
    fn test_outline_matching_a_scenario() {
        let source = r"Feature: Mixed Scenarios Feature

  Scenario: Unique Scenario
    Given a unique step

  Scenario Outline: Unique Scenario
    When a step with <value>

  Examples:
    | value  |
    | Unique |
";
        let problems = lint_source("features/mixed_feature.feature", source);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].message, outline_message("Unique Scenario", 3, "6"));
        assert_eq!(problems[0].location.line, 6);
    }

    #[test]
    fn test_scenario_matching_an_earlier_outline() {
        let source = r"Feature: Mixed

  Scenario Outline: Thing <x>
    Examples:
      | x |
      | A |

  Scenario: Thing A
";
        let problems = lint_source("mixed.feature", source);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].message, scenario_message("Thing A", 3, "8"));
        assert_eq!(problems[0].location.line, 8);
    }

    #[test]
    fn test_outlines_generating_the_same_name() {
        let source = r"Feature: Conflicting Outlines Feature

  Scenario Outline: Conflict Scenario <input>
    Given a step

  Examples:
    | input    |
    | Conflict |

  Scenario Outline: Conflict Scenario <input>
    When another step

  Examples:
    | input    |
    | Conflict |
";
        let problems = lint_source("features/conflicting_outlines.feature", source);
        assert_eq!(problems.len(), 1);
        assert_eq!(
            problems[0].message,
            outline_message("Conflict Scenario Conflict", 3, "10")
        );
        assert_eq!(problems[0].location.line, 10);
    }

    #[test]
    fn test_outline_without_placeholders() {
        let source = r"Feature: No Placeholder Outline Feature

  Scenario Outline: Static Scenario Name
    Given a step

  Examples:
    | input  |
    | Value1 |
    | Value2 |
";
        let problems = lint_source("features/no_placeholder_outline.feature", source);
        assert_eq!(problems.len(), 1);
        assert_eq!(
            problems[0].message,
            outline_message("Static Scenario Name", 3, "3")
        );
    }

    #[test]
    fn test_outline_reports_first_duplicated_name_only() {
        let source = r"Feature: F
  Scenario Outline: T <x>
    Examples:
      | x |
      | B |
      | A |
      | A |
      | B |
";
        let problems = lint_source("f.feature", source);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].message, outline_message("T B", 2, "2"));
    }

    // ========== Rules ==========

    #[test]
    fn test_duplicate_inside_a_rule() {
        let source = r"Feature: Rules

  Rule: Only
    Scenario: Twice
    Scenario: Twice
";
        let problems = lint_source("rules.feature", source);
        assert_eq!(
            problems,
            vec![Problem::new(
                UniqueScenarioNames::NAME,
                scenario_message("Twice", 4, "5"),
                Location::new("rules.feature", 5),
            )]
        );
    }

    #[test]
    fn test_rule_checks_scenarios_before_outlines() {
        let source = r"Feature: Rules
  Rule: Ordered
    Scenario Outline: X
      Examples:
        | v |
        | 1 |

    Scenario: X
";
        let problems = lint_source("rules.feature", source);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].message, outline_message("X", 8, "3"));
        assert_eq!(problems[0].location.line, 3);
    }

    #[test]
    fn test_rule_reports_only_its_first_problem() {
        let source = r"Feature: F
  Rule: R
    Scenario: A
    Scenario: A
    Scenario: B
    Scenario: B
";
        let mut linter = UniqueScenarioNames::new();
        let doc = parse("f.feature", source).unwrap();
        let problems: Vec<_> = doc.walk().filter_map(|n| linter.evaluate(n)).collect();

        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].message, scenario_message("A", 3, "4"));
        // The suppressed duplicate was still recorded
        let key = ScopeKey::rule(std::path::Path::new("f.feature"), "R");
        assert!(linter.ledger().is_duplicate("B", &key));
    }

    #[test]
    fn test_same_named_rules_share_a_scope() {
        let source = r"Feature: Rules
  Rule: Same
    Scenario: Twice
  Rule: Same
    Scenario: Twice
";
        let problems = lint_source("rules.feature", source);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].message, scenario_message("Twice", 3, "5"));
    }

    #[test]
    fn test_rule_named_feature_has_its_own_scope() {
        let source = "Feature: F\n  Scenario: A\n  Rule: feature\n    Scenario: A\n";
        assert!(lint_source("f.feature", source).is_empty());
    }

    #[test]
    fn test_rule_and_file_names_with_separator_do_not_collide() {
        let with_rule = parse("x", "Feature: F\n  Rule: y:feature\n    Scenario: A\n").unwrap();
        let top_level = parse("x:y", "Feature: G\n  Scenario: A\n").unwrap();
        assert!(lint(&[with_rule, top_level]).is_empty());
    }

    #[test]
    fn test_scenario_with_examples_is_checked_as_outline() {
        let source = r"Feature: Modern outlines
  Scenario: Pay with <method>
    Examples:
      | method |
      | card   |
      | card   |
";
        let problems = lint_source("pay.feature", source);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].message, outline_message("Pay with card", 2, "2"));
    }

    #[test]
    fn test_scenario_inside_rule_is_not_checked_directly() {
        let doc = parse("r.feature", "Feature: F\n  Rule: R\n    Scenario: A\n").unwrap();
        let scenario = doc.walk().find(|n| n.is(NodeTag::Scenario)).unwrap();

        let mut linter = UniqueScenarioNames::new();
        assert!(linter.evaluate(scenario).is_none());
        assert!(linter.evaluate(scenario).is_none());
        assert!(linter.ledger().is_empty());
    }

    // ========== Skips and state ==========

    #[test]
    fn test_other_nodes_are_not_applicable() {
        let source = "Feature: F\n  Background:\n  Scenario Outline: O <x>\n    Examples:\n      | x |\n      | 1 |\n";
        let doc = parse("f.feature", source).unwrap();
        let mut linter = UniqueScenarioNames::new();

        for node in doc.walk().filter(|n| !n.is(NodeTag::Outline)) {
            assert!(linter.evaluate(node).is_none());
        }
        assert!(linter.ledger().is_empty());
    }

    #[test]
    fn test_fragment_without_file_is_skipped() {
        let mut builder = DocumentBuilder::new(NodeKind::Feature { name: "F".into() }, 1);
        let root = builder.root();
        builder.push(root, NodeKind::Scenario { name: "A".into() }, 2);
        builder.push(root, NodeKind::Scenario { name: "A".into() }, 3);
        let outline = builder.push(root, NodeKind::Outline { name: "A".into() }, 4);
        let examples = builder.push(outline, NodeKind::Examples { name: "".into() }, 5);
        builder.push_row(examples, &["x"], 6);
        builder.push_row(examples, &["1"], 7);
        builder.push_row(examples, &["2"], 8);
        let doc = builder.build();

        let mut linter = UniqueScenarioNames::new();
        assert!(doc.walk().all(|node| linter.evaluate(node).is_none()));
        assert!(linter.ledger().is_empty());
    }

    #[test]
    fn test_built_tree_with_file_root() {
        let mut builder = DocumentBuilder::new(
            NodeKind::File {
                path: PathBuf::from("built.feature"),
            },
            1,
        );
        let feature = builder.push(builder.root(), NodeKind::Feature { name: "F".into() }, 1);
        builder.push(feature, NodeKind::Scenario { name: "A".into() }, 2);
        builder.push(feature, NodeKind::Scenario { name: "A".into() }, 9);
        let doc = builder.build();

        let problems = lint(&[doc]);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].location.to_string(), "built.feature:9");
    }

    #[test]
    fn test_clear_state_makes_passes_repeatable() {
        let source = "Feature: F\n  Scenario: A\n  Scenario: A\n  Scenario: B\n";
        let doc = parse("f.feature", source).unwrap();
        let mut linter = UniqueScenarioNames::new();

        let first: Vec<_> = doc.walk().filter_map(|n| linter.evaluate(n)).collect();
        linter.clear_state();
        let second: Vec<_> = doc.walk().filter_map(|n| linter.evaluate(n)).collect();

        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_state_leaks_without_clearing() {
        let doc = parse("f.feature", "Feature: F\n  Scenario: A\n").unwrap();
        let mut linter = UniqueScenarioNames::new();

        assert_eq!(doc.walk().filter_map(|n| linter.evaluate(n)).count(), 0);
        assert_eq!(doc.walk().filter_map(|n| linter.evaluate(n)).count(), 1);
    }

    #[test]
    fn test_linter_trait() {
        let mut linter = UniqueScenarioNames::new();
        assert_eq!(Linter::name(&linter), "UniqueScenarioNamesLinter");
        assert!(!linter.description().is_empty());

        let doc = parse("f.feature", "Feature: F\n  Scenario: A\n  Scenario: A\n").unwrap();
        let problems: Vec<_> = doc.walk().filter_map(|n| linter.lint(n)).collect();
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].linter, "UniqueScenarioNamesLinter");

        Linter::clear_state(&mut linter);
        assert!(linter.ledger().is_empty());
    }
}
