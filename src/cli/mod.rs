//! Command-line interface for alertgraph.
//!
//! Every command reads one definitions document (see
//! [`crate::store::DefinitionsDocument`]) and works on the entities it
//! declares. Nothing is ever written back.
//!
//! # Commands
//!
//! - `resolve` - print the dependency-ordered entities of one root
//! - `assemble` - print the assembled template text of one root
//! - `assemble-all` - assemble every alert, reporting failures per alert
//! - `tree` - print the reference tree of one root
//! - `validate` - report every dangling reference and cycle in the document
//!
//! # Global Options
//!
//! - `-v, --verbose` - debug logging on stderr
//! - `-q, --quiet` - errors only
//! - `--config <PATH>` - assembly configuration file (defaults to
//!   `$ALERTGRAPH_CONFIG`, then `~/.alertgraph/config.toml`)
//!
//! Without either verbosity flag the `RUST_LOG` environment variable is
//! honored, defaulting to `warn`.
//!
//! # Exit Status
//!
//! Commands exit with status 1 when a resolution fails, when `assemble-all`
//! could not assemble every alert, or when `validate` finds a problem.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod assemble;
mod resolve;
mod tree;
mod validate;

pub use assemble::{AssembleAllCommand, AssembleCommand};
pub use resolve::ResolveCommand;
pub use tree::TreeCommand;
pub use validate::ValidateCommand;

/// Output format shared by commands that can emit JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Text,
    /// Structured JSON on stdout.
    Json,
}

/// Settings derived from the global flags before a command runs.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive, or `None` to defer to `RUST_LOG`.
    pub log_level: Option<String>,

    /// Explicit assembly configuration path from `--config`.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// The filter used for stderr logging.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        }
    }

    /// Install the global tracing subscriber.
    ///
    /// Logs go to stderr so that stdout only carries command output. Calling
    /// this more than once is harmless; later calls are ignored.
    pub fn init_logging(&self) {
        let _ = tracing_subscriber::registry()
            .with(self.env_filter())
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init();
    }
}

/// Resolve and assemble alert configuration dependencies.
#[derive(Parser)]
#[command(name = "alertgraph", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the assembly configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dependency-ordered entities of one root.
    Resolve(ResolveCommand),

    /// Print the assembled template text of one root.
    Assemble(AssembleCommand),

    /// Assemble every alert in the document.
    AssembleAll(AssembleAllCommand),

    /// Print the reference tree of one root.
    Tree(TreeCommand),

    /// Report every dangling reference and cycle in the document.
    Validate(ValidateCommand),
}

impl Cli {
    /// Execute the parsed command line.
    ///
    /// # Errors
    ///
    /// Returns the command's failure; `main` renders it with
    /// [`user_friendly_error`](crate::core::user_friendly_error).
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Same as [`Cli::execute`].
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Resolve(cmd) => cmd.execute().await,
            Commands::Assemble(cmd) => cmd.execute(config.config_path).await,
            Commands::AssembleAll(cmd) => cmd.execute(config.config_path).await,
            Commands::Tree(cmd) => cmd.execute().await,
            Commands::Validate(cmd) => cmd.execute().await,
        }
    }
}
