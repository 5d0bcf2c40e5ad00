//! Command-line interface
//!
//! - `gherlint lint` - Lint feature files
//! - `gherlint linters` - List the available linters
//! - `gherlint init` - Write a default configuration

mod commands;

pub use commands::{run, Cli, CliError, Commands};
