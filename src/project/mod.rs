//! Project setup
//!
//! - `Config`: linter configuration from `gherlint.toml`
//! - `Loader`: collects and parses feature files

mod config;
mod loader;

pub use config::{Config, ConfigError, LinterConfig, SourceConfig, CONFIG_FILE_NAME};
pub use loader::{LoadError, Loader};
