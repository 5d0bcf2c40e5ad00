//! Per-scope record of scenario names and where they occur

use super::scope::ScopeKey;
use indexmap::IndexMap;

/// Source lines of every resolved name, grouped by scope
///
/// Lines are appended in discovery order and never reordered or
/// deduplicated: an outline that generates the same name twice records its
/// own line twice.
#[derive(Debug, Default)]
pub struct NameLedger {
    scopes: IndexMap<ScopeKey, IndexMap<String, Vec<usize>>>,
}

impl NameLedger {
    /// Create an empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `name` in `scope`
    pub fn record(&mut self, name: &str, scope: &ScopeKey, line: usize) {
        if !self.scopes.contains_key(scope) {
            self.scopes.insert(scope.clone(), IndexMap::new());
        }
        if let Some(names) = self.scopes.get_mut(scope) {
            names.entry(name.to_string()).or_default().push(line);
        }
    }

    /// Lines where `name` occurred in `scope`, in discovery order
    #[must_use]
    pub fn occurrences(&self, name: &str, scope: &ScopeKey) -> &[usize] {
        self.scopes
            .get(scope)
            .and_then(|names| names.get(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check if `name` occurred more than once in `scope`
    #[must_use]
    pub fn is_duplicate(&self, name: &str, scope: &ScopeKey) -> bool {
        self.occurrences(name, scope).len() > 1
    }

    /// The occurrences of `name` split into original and duplicates, if it
    /// is duplicated
    #[must_use]
    pub fn duplicate(&self, name: &str, scope: &ScopeKey) -> Option<Duplicate<'_>> {
        match self.occurrences(name, scope) {
            [original, duplicates @ ..] if !duplicates.is_empty() => Some(Duplicate {
                original: *original,
                duplicates,
            }),
            _ => None,
        }
    }

    /// Number of scopes seen
    #[must_use]
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Check if nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Forget every recorded name
    pub fn clear(&mut self) {
        self.scopes.clear();
    }
}

/// A duplicated name's occurrences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duplicate<'a> {
    /// Line of the first occurrence
    pub original: usize,
    /// Lines of every later occurrence
    pub duplicates: &'a [usize],
}

impl Duplicate<'_> {
    /// Later occurrences joined with `", "`
    #[must_use]
    pub fn duplicate_lines(&self) -> String {
        self.duplicates
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
