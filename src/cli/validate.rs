//! The `validate` command.
//!
//! Checks a whole definitions document instead of one root, reporting every
//! dangling reference and every cycle rather than stopping at the first.
//!
//! ```bash
//! alertgraph validate alerts.toml
//! alertgraph validate alerts.toml --format json   # for CI
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::OutputFormat;
use crate::core::{AlertGraphError, format_path};
use crate::resolver::validate_store;
use crate::store::load_definitions;

/// Report every dangling reference and cycle in a document.
#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Definitions document to validate
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ValidateCommand {
    /// Run the command.
    ///
    /// # Errors
    ///
    /// Fails if the document cannot be loaded or contains any problem.
    pub async fn execute(self) -> Result<()> {
        let store = load_definitions(&self.file).await?;
        let report = validate_store(&store);

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                for dangling in &report.undefined {
                    let mut line =
                        format!("{} {} references undefined {}", "✗".red(), dangling.referrer, dangling.missing);
                    if let Some(first) = dangling.suggestions.first() {
                        line.push_str(&format!(" (did you mean '{first}'?)"));
                    }
                    println!("{line}");
                }
                for cycle in &report.cycles {
                    println!("{} Circular reference: {}", "✗".red(), format_path(cycle));
                }
                if report.is_ok() {
                    println!("{} {} entities, no problems found", "✓".green(), store.len());
                }
            }
        }

        if report.is_ok() {
            Ok(())
        } else {
            Err(AlertGraphError::Other {
                message: format!(
                    "{} problem(s) found in {}",
                    report.problem_count(),
                    self.file.display()
                ),
            }
            .into())
        }
    }
}
