//! Assembly configuration (`~/.alertgraph/config.toml`).
//!
//! ```toml
//! # Text inserted between consecutive entity bodies
//! separator = "\n"
//!
//! # Assemble alerts on all cores in batch operations
//! parallel = true
//! ```
//!
//! # Location
//!
//! 1. An explicit path (the CLI's `--config` flag)
//! 2. The `ALERTGRAPH_CONFIG` environment variable
//! 3. `~/.alertgraph/config.toml` (`%LOCALAPPDATA%\alertgraph\config.toml` on Windows)
//!
//! A missing file yields [`AssemblyConfig::default`]. A file that exists but
//! does not parse is an error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::AlertGraphError;

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "ALERTGRAPH_CONFIG";

/// Default separator between assembled bodies.
pub const DEFAULT_SEPARATOR: &str = "\n";

/// Settings consumed by the [`Assembler`](crate::templating::Assembler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssemblyConfig {
    /// Text inserted between consecutive entity bodies.
    pub separator: String,

    /// Run batch assembly in parallel.
    ///
    /// Only the scheduling changes; every alert's output is identical either
    /// way.
    pub parallel: bool,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            parallel: true,
        }
    }
}

impl AssemblyConfig {
    /// Load from the default location, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if no default location can be determined.
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load from `path` if given, otherwise from the default location.
    ///
    /// # Errors
    ///
    /// Same as [`AssemblyConfig::load`].
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };

        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid config.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| AlertGraphError::FileSystemError {
                operation: "read config".to_string(),
                path: path.display().to_string(),
            })?;

        Self::parse(&content).with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Parse a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`AlertGraphError::ConfigError`] for invalid TOML or unknown keys.
    pub fn parse(content: &str) -> Result<Self, AlertGraphError> {
        toml::from_str(content).map_err(|e| AlertGraphError::ConfigError {
            message: e.message().to_string(),
        })
    }

    /// The default configuration path.
    ///
    /// Honors `ALERTGRAPH_CONFIG` when set.
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory is unknown.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV)
            && !path.is_empty()
        {
            return Ok(PathBuf::from(path));
        }

        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| AlertGraphError::ConfigError {
                    message: "Unable to determine local data directory".to_string(),
                })?
                .join("alertgraph")
        } else {
            dirs::home_dir()
                .ok_or_else(|| AlertGraphError::ConfigError {
                    message: "Unable to determine home directory".to_string(),
                })?
                .join(".alertgraph")
        };

        Ok(config_dir.join("config.toml"))
    }
}
