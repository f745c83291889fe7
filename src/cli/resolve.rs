//! The `resolve` command.
//!
//! ```bash
//! alertgraph resolve alerts.toml os.cpu
//! alertgraph resolve alerts.toml host_based --kind macro --format json
//! ```

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use super::OutputFormat;
use crate::core::{EntityKey, EntityKind};
use crate::resolver::Resolver;
use crate::store::load_definitions;

/// Print the dependency-ordered entities of one root.
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Definitions document to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Name of the root entity
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Kind of the root entity
    #[arg(short, long, default_value = "alert")]
    pub kind: EntityKind,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ResolveOutput<'a> {
    root: &'a EntityKey,
    order: Vec<&'a EntityKey>,
}

impl ResolveCommand {
    /// Run the command.
    ///
    /// # Errors
    ///
    /// Fails if the document cannot be loaded or the root does not resolve.
    pub async fn execute(self) -> Result<()> {
        let store = load_definitions(&self.file).await?;
        let resolution = Resolver::new(&store).resolve(self.kind, &self.name)?;

        match self.format {
            OutputFormat::Text => {
                for key in resolution.keys() {
                    println!("{key}");
                }
            }
            OutputFormat::Json => {
                let output = ResolveOutput {
                    root: resolution.root().key(),
                    order: resolution.keys(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }

        Ok(())
    }
}
