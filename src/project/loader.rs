//! Feature file loader
//!
//! Collects feature files from files and directories and parses them into
//! documents.

use super::config::Config;
use crate::model::Document;
use crate::parser::{self, ParseError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Loads feature files into documents
#[derive(Debug, Clone)]
pub struct Loader {
    /// Extension of files picked up inside directories
    extension: String,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new("feature")
    }
}

impl Loader {
    /// Create a loader that picks up `*.{extension}` files in directories
    #[must_use]
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// Create a loader from a configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.source.extension.as_str())
    }

    /// Extension of files picked up inside directories
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Load every feature file reachable from `paths`
    ///
    /// Files are loaded as given. Directories are walked recursively and
    /// their matching files loaded in sorted order.
    ///
    /// # Errors
    ///
    /// Returns the first error hit while collecting, reading, or parsing.
    pub fn load_paths(&self, paths: &[PathBuf]) -> Result<Vec<Document>, LoadError> {
        let files = self.collect(paths)?;
        info!(files = files.len(), "loading feature files");

        files.iter().map(|path| Self::load_file(path)).collect()
    }

    /// Load and parse a single feature file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(path: &Path) -> Result<Document, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let document = parser::parse(path, &text).map_err(|error| LoadError::Parse {
            path: path.to_path_buf(),
            text: text.clone(),
            error,
        })?;

        debug!(path = %path.display(), nodes = document.len(), "parsed feature file");
        Ok(document)
    }

    /// Resolve `paths` to the list of files to load
    ///
    /// # Errors
    ///
    /// Returns an error if a path does not exist or a directory cannot be
    /// read.
    pub fn collect(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>, LoadError> {
        let mut files = Vec::new();

        for path in paths {
            if path.is_dir() {
                let mut found = Vec::new();
                self.collect_files_recursive(path, &mut found)?;
                found.sort();
                files.extend(found);
            } else if path.is_file() {
                files.push(path.clone());
            } else {
                return Err(LoadError::NotFound { path: path.clone() });
            }
        }

        Ok(files)
    }

    fn collect_files_recursive(
        &self,
        dir: &Path,
        files: &mut Vec<PathBuf>,
    ) -> Result<(), LoadError> {
        let entries = std::fs::read_dir(dir).map_err(|e| LoadError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| LoadError::Io {
                path: dir.to_path_buf(),
                source: e,
            })?;

            let path = entry.path();

            if path.is_dir() {
                self.collect_files_recursive(&path, files)?;
            } else if path.extension().and_then(|s| s.to_str()) == Some(&self.extension) {
                files.push(path);
            }
        }

        Ok(())
    }
}

/// Errors that can occur when loading feature files
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        /// Path that caused the error
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
    /// Parse error
    #[error("Parse error in {}: {error}", path.display())]
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// Contents of the file, for rendering the error
        text: String,
        /// Parse error
        #[source]
        error: ParseError,
    },
    /// A path that is neither a file nor a directory
    #[error("No such file or directory: {}", path.display())]
    NotFound {
        /// Missing path
        path: PathBuf,
    },
}

impl LoadError {
    /// Path the error relates to
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Io { path, .. }
            | LoadError::Parse { path, .. }
            | LoadError::NotFound { path } => path,
        }
    }
}
