//! Configuration management for alertgraph
//!
//! alertgraph reads two kinds of input:
//!
//! 1. **Definitions documents** - the entities to resolve. Loaded by
//!    [`crate::store::load_definitions`].
//! 2. **Assembly configuration** (`~/.alertgraph/config.toml`) - how output is
//!    produced. Loaded by [`AssemblyConfig::load_with_optional`].
//!
//! Only the second lives here. The resolver itself has no settings; resolution
//! order is fully determined by the definitions.
//!
//! # Example
//!
//! ```rust,no_run
//! use alertgraph::config::AssemblyConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AssemblyConfig::load().await?;
//! println!("separator: {:?}, parallel: {}", config.separator, config.parallel);
//! # Ok(())
//! # }
//! ```

pub mod assembly;

pub use assembly::{AssemblyConfig, CONFIG_PATH_ENV, DEFAULT_SEPARATOR};
