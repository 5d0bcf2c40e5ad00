//! Linter configuration (gherlint.toml)
//!
//! Defines which files are linted and which linters are enabled.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for by [`Config::find`]
pub const CONFIG_FILE_NAME: &str = "gherlint.toml";

/// Configuration loaded from `gherlint.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Source configuration
    #[serde(default)]
    pub source: SourceConfig,

    /// Per-linter settings, keyed by linter name
    #[serde(default)]
    pub linters: IndexMap<String, LinterConfig>,
}

impl Config {
    /// Create a configuration that lists the given linters as enabled
    #[must_use]
    pub fn with_linters<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            source: SourceConfig::default(),
            linters: names
                .into_iter()
                .map(|name| (name.to_string(), LinterConfig::default()))
                .collect(),
        }
    }

    /// Load a configuration from a file path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save a configuration to a file path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            path: path.to_path_buf(),
            source: e,
        })?;

        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Find a configuration file by searching upward from `start`
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration file is found.
    pub fn find(start: &Path) -> Result<PathBuf, ConfigError> {
        let mut current = start.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                return Ok(config_path);
            }

            if !current.pop() {
                return Err(ConfigError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Check if a linter is enabled; linters missing from the file are
    /// enabled
    #[must_use]
    pub fn is_enabled(&self, linter: &str) -> bool {
        self.linters.get(linter).map_or(true, |config| config.enabled)
    }
}

/// Which files are linted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Files or directories to lint (relative to the configuration file)
    #[serde(default = "default_paths")]
    pub paths: Vec<PathBuf>,
    /// Extension of feature files inside directories
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            paths: default_paths(),
            extension: default_extension(),
        }
    }
}

fn default_paths() -> Vec<PathBuf> {
    vec![PathBuf::from(".")]
}

fn default_extension() -> String {
    "feature".to_string()
}

/// Settings of a single linter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinterConfig {
    /// Whether the linter runs
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

const fn default_true() -> bool {
    true
}

/// Errors that can occur when working with configuration files
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading/writing the file
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        /// Path that caused the error
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
    /// Parse error in TOML
    #[error("Parse error in {}: {source}", path.display())]
    Parse {
        /// Path that caused the error
        path: PathBuf,
        /// Underlying parse error
        source: toml::de::Error,
    },
    /// Serialization error
    #[error("Serialization error for {}: {source}", path.display())]
    Serialize {
        /// Path that caused the error
        path: PathBuf,
        /// Underlying serialization error
        source: toml::ser::Error,
    },
    /// No configuration file found
    #[error("No {} found searching from {}", CONFIG_FILE_NAME, searched_from.display())]
    NotFound {
        /// Directory searched from
        searched_from: PathBuf,
    },
}
