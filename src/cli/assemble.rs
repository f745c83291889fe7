//! The `assemble` and `assemble-all` commands.
//!
//! ```bash
//! alertgraph assemble alerts.toml os.cpu
//! alertgraph assemble-all alerts.toml --format json
//! alertgraph --config ./assembly.toml assemble-all alerts.toml --templates
//! ```
//!
//! Both load the [`AssemblyConfig`] first: `--config` when given, otherwise
//! the default location.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::OutputFormat;
use crate::config::AssemblyConfig;
use crate::core::{AlertGraphError, EntityKind};
use crate::store::load_definitions;
use crate::templating::Assembler;

/// Print the assembled template text of one root.
#[derive(Args, Debug)]
pub struct AssembleCommand {
    /// Definitions document to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Name of the root entity
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Kind of the root entity
    #[arg(short, long, default_value = "alert")]
    pub kind: EntityKind,
}

impl AssembleCommand {
    /// Run the command.
    ///
    /// # Errors
    ///
    /// Fails if the configuration or document cannot be loaded, or if the
    /// root does not resolve.
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let config = AssemblyConfig::load_with_optional(config_path).await?;
        let store = load_definitions(&self.file).await?;

        let text = Assembler::with_config(&store, config).assemble(self.kind, &self.name)?;
        println!("{text}");
        Ok(())
    }
}

/// Assemble every alert (or every template) in the document.
#[derive(Args, Debug)]
pub struct AssembleAllCommand {
    /// Definitions document to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Assemble templates instead of alerts
    #[arg(long)]
    pub templates: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl AssembleAllCommand {
    /// Run the command.
    ///
    /// Every entity that assembled is printed even when others failed.
    ///
    /// # Errors
    ///
    /// Fails if the configuration or document cannot be loaded, or if at
    /// least one entity could not be assembled.
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let config = AssemblyConfig::load_with_optional(config_path).await?;
        let store = load_definitions(&self.file).await?;

        let assembler = Assembler::with_config(&store, config);
        let (kind, batch) = if self.templates {
            (EntityKind::Template, assembler.assemble_all_templates())
        } else {
            (EntityKind::Alert, assembler.assemble_all())
        };

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&batch)?);
            }
            OutputFormat::Text => {
                for (name, text) in &batch.assembled {
                    println!("{} {}:{}", "==>".cyan(), kind, name);
                    println!("{text}");
                    println!();
                }
                for (name, err) in &batch.errors {
                    eprintln!("{} {}:{}: {}", "✗".red(), kind, name, err);
                }
            }
        }

        if batch.is_complete() {
            Ok(())
        } else {
            Err(AlertGraphError::Other {
                message: format!(
                    "{} of {} {} entities could not be assembled",
                    batch.errors.len(),
                    batch.errors.len() + batch.assembled.len(),
                    kind
                ),
            }
            .into())
        }
    }
}
