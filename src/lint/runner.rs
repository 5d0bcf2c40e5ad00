//! Lint pass driver

use super::{Linter, Problem, UniqueScenarioNames};
use crate::model::Document;
use crate::project::Config;
use tracing::{debug, warn};

/// Runs a set of linters over documents
#[derive(Default)]
pub struct LintRunner {
    linters: Vec<Box<dyn Linter>>,
}

impl LintRunner {
    /// Create a runner without linters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner with every built-in linter
    #[must_use]
    pub fn with_default_linters() -> Self {
        let mut runner = Self::new();
        runner.register(UniqueScenarioNames::new());
        runner
    }

    /// Add a linter
    pub fn register(&mut self, linter: impl Linter + 'static) {
        self.linters.push(Box::new(linter));
    }

    /// Drop the linters the configuration disables
    ///
    /// Configuration entries that name no registered linter are ignored with
    /// a warning.
    pub fn configure(&mut self, config: &Config) {
        for name in config.linters.keys() {
            if !self.linters.iter().any(|linter| linter.name() == name.as_str()) {
                warn!(linter = %name, "configuration names an unknown linter");
            }
        }

        self.linters.retain(|linter| {
            let enabled = config.is_enabled(linter.name());
            if !enabled {
                debug!(linter = linter.name(), "linter disabled by configuration");
            }
            enabled
        });
    }

    /// Registered linters, in registration order
    #[must_use]
    pub fn linters(&self) -> &[Box<dyn Linter>] {
        &self.linters
    }

    /// Run one lint pass over `documents`
    ///
    /// Every node of every document is shown to every linter in pre-order.
    /// Linter state is cleared before and after the pass.
    pub fn lint(&mut self, documents: &[Document]) -> Vec<Problem> {
        self.clear_state();

        let mut problems = Vec::new();
        for document in documents {
            for node in document.walk() {
                for linter in &mut self.linters {
                    if let Some(problem) = linter.lint(node) {
                        problems.push(problem);
                    }
                }
            }
        }

        self.clear_state();
        debug!(
            documents = documents.len(),
            problems = problems.len(),
            "lint pass finished"
        );

        problems
    }

    fn clear_state(&mut self) {
        for linter in &mut self.linters {
            linter.clear_state();
        }
    }
}

impl std::fmt::Debug for LintRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.linters.iter().map(|linter| linter.name()))
            .finish()
    }
}
