//! The `tree` command.
//!
//! Prints the references of one root as a tree, in the order resolution
//! visits them. An entity reached a second time is marked `(see above)` and
//! not expanded again.
//!
//! ```text
//! $ alertgraph tree alerts.toml always.good
//! alert:always.good
//! ├── macro:host_based
//! │   └── alert:scollector.down
//! │       ├── alert:ping.host
//! │       │   └── notification:default
//! │       └── notification:default (see above)
//! └── notification:default (see above)
//! ```

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::core::EntityKind;
use crate::resolver::Resolver;
use crate::store::load_definitions;

/// Print the reference tree of one root.
#[derive(Args, Debug)]
pub struct TreeCommand {
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

impl TreeCommand {
    /// Run the command.
    ///
    /// # Errors
    ///
    /// Fails if the document cannot be loaded or the root does not resolve.
    pub async fn execute(self) -> Result<()> {
        let store = load_definitions(&self.file).await?;
        let tree = Resolver::new(&store).tree(self.kind, &self.name)?;
        print!("{tree}");
        Ok(())
    }
}
