//! Naming scopes for scenarios

use crate::model::{NodeRef, NodeTag};
use smol_str::SmolStr;
use std::path::{Path, PathBuf};

/// Identifier of the scope within which scenario names must be unique
///
/// Top-level scenarios are scoped by their file, scenarios inside a rule by
/// their file and rule name. Rules are identified by name, so two rules with
/// the same name in one file share a scope. Displayed as `{file}:feature` or
/// `{file}:{rule name}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeKey {
    file: PathBuf,
    rule: Option<SmolStr>,
}

impl ScopeKey {
    /// Scope of the scenarios directly under a file's feature
    #[must_use]
    pub fn feature(file: &Path) -> Self {
        Self {
            file: file.to_path_buf(),
            rule: None,
        }
    }

    /// Scope of the scenarios inside a named rule
    #[must_use]
    pub fn rule(file: &Path, rule: &str) -> Self {
        Self {
            file: file.to_path_buf(),
            rule: Some(rule.into()),
        }
    }

    /// File the scope belongs to
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Name of the rule, if the scope is a rule
    #[must_use]
    pub fn rule_name(&self) -> Option<&str> {
        self.rule.as_deref()
    }
}

impl std::fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.rule {
            Some(rule) => write!(f, "{}:{rule}", self.file.display()),
            None => write!(f, "{}:feature", self.file.display()),
        }
    }
}

/// The resolved scope of a scenario or outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope<'doc> {
    /// Ledger key
    pub key: ScopeKey,
    /// Path of the owning file, for problem locations
    pub file: &'doc Path,
}

/// Compute the naming scope of a node
///
/// Returns `None` when the node is not attached to a file. Such nodes come
/// from fragment trees and cannot be located, so they are not checked.
#[must_use]
pub fn scope_of(node: NodeRef<'_>) -> Option<Scope<'_>> {
    let file = node.ancestor(NodeTag::File)?.file_path()?;

    let rule = node
        .ancestors()
        .take_while(|ancestor| !ancestor.is(NodeTag::File))
        .find(|ancestor| ancestor.is(NodeTag::Rule));

    let key = match rule.and_then(NodeRef::name) {
        Some(name) => ScopeKey::rule(file, name),
        None => ScopeKey::feature(file),
    };

    Some(Scope { key, file })
}
