//! CLI commands implementation

use crate::lint::LintRunner;
use crate::project::{Config, ConfigError, LoadError, Loader, CONFIG_FILE_NAME};
use crate::report::Format;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Gherkin feature file linter
#[derive(Parser, Debug)]
#[command(name = "gherlint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log what the linter is doing (overridden by `RUST_LOG`)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lint feature files
    Lint {
        /// Files or directories to lint (defaults to the configured paths)
        paths: Vec<PathBuf>,
        /// Configuration file (defaults to the nearest gherlint.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List the available linters
    Linters {
        /// Configuration file (defaults to the nearest gherlint.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a default gherlint.toml
    Init {
        /// Directory to create the configuration in
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

/// Run the CLI with the given arguments
///
/// # Errors
///
/// Returns an error if the command fails or the lint finds problems.
pub fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Lint {
            paths,
            config,
            format,
            out,
        } => cmd_lint(&paths, config.as_deref(), format, out.as_deref()),
        Commands::Linters { config } => cmd_linters(config.as_deref()),
        Commands::Init { path } => cmd_init(&path),
    }
}

fn cmd_lint(
    paths: &[PathBuf],
    config_path: Option<&Path>,
    format: Format,
    out: Option<&Path>,
) -> Result<(), CliError> {
    let (config, root) = load_config(config_path)?;

    let paths = if paths.is_empty() {
        config
            .source
            .paths
            .iter()
            .map(|path| root.join(path))
            .collect()
    } else {
        paths.to_vec()
    };

    let documents = Loader::from_config(&config).load_paths(&paths)?;

    let mut runner = LintRunner::with_default_linters();
    runner.configure(&config);
    let problems = runner.lint(&documents);

    let report = format.render(&problems)?;
    match out {
        Some(out) => {
            fs::write(out, &report).map_err(|e| CliError::Io {
                path: out.to_path_buf(),
                source: e,
            })?;
            info!(path = %out.display(), "wrote report");
        }
        None => print!("{report}"),
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CliError::ProblemsFound(problems.len()))
    }
}

fn cmd_linters(config_path: Option<&Path>) -> Result<(), CliError> {
    let (config, _) = load_config(config_path)?;
    let runner = LintRunner::with_default_linters();

    for linter in runner.linters() {
        let status = if config.is_enabled(linter.name()) {
            "enabled"
        } else {
            "disabled"
        };
        println!("{} ({status})", linter.name());
        println!("  {}", linter.description());
    }

    Ok(())
}

fn cmd_init(dir: &Path) -> Result<(), CliError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        return Err(CliError::AlreadyInitialized(config_path));
    }

    fs::create_dir_all(dir).map_err(|e| CliError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let runner = LintRunner::with_default_linters();
    let config = Config::with_linters(runner.linters().iter().map(|linter| linter.name()));
    config.save(&config_path)?;

    println!("Created {}", config_path.display());

    Ok(())
}

/// Load the configuration and the directory its paths are relative to
///
/// An explicit path must exist. Otherwise the nearest `gherlint.toml` above
/// the working directory is used, falling back to the defaults.
fn load_config(path: Option<&Path>) -> Result<(Config, PathBuf), CliError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let cwd = std::env::current_dir().map_err(|e| CliError::Io {
                path: PathBuf::from("."),
                source: e,
            })?;
            match Config::find(&cwd) {
                Ok(found) => found,
                Err(ConfigError::NotFound { .. }) => {
                    debug!("no configuration file, using defaults");
                    return Ok((Config::default(), PathBuf::new()));
                }
                Err(e) => return Err(e.into()),
            }
        }
    };

    debug!(path = %path.display(), "loading configuration");
    let config = Config::load(&path)?;
    let root = path.parent().map_or_else(PathBuf::new, Path::to_path_buf);

    Ok((config, root))
}

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error
    #[error("IO error at {}: {source}", path.display())]
    Io {
        /// Path that caused the error
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Feature files could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The report could not be rendered
    #[error("Failed to render report: {0}")]
    Report(#[from] serde_json::Error),
    /// Lint finished with problems
    #[error("Lint failed with {0} issue(s)")]
    ProblemsFound(usize),
    /// A configuration file already exists
    #[error("{} already exists", .0.display())]
    AlreadyInitialized(PathBuf),
}

impl CliError {
    /// Render the error for the terminal
    ///
    /// Parse errors are shown with the offending source lines.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            CliError::Load(LoadError::Parse { path, text, error }) => {
                let report = miette::Report::new(error.clone()).with_source_code(
                    miette::NamedSource::new(path.display().to_string(), text.clone()),
                );
                format!("{report:?}")
            }
            other => format!("Error: {other}"),
        }
    }
}
