//! Common test utilities for alertgraph integration tests

// Not every helper is used by every test module
#![allow(dead_code)]

use alertgraph::test_utils::DefinitionsFixture;
use anyhow::Result;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding definitions and configuration files.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a fixture and return its path.
    pub fn write_fixture(&self, fixture: &DefinitionsFixture) -> Result<PathBuf> {
        fixture.write_to(self.path())
    }

    /// Write arbitrary content to `name` inside the project.
    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// An `alertgraph` command isolated from the user's configuration.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("alertgraph").expect("alertgraph binary is built");
        cmd.current_dir(self.path())
            .env("ALERTGRAPH_CONFIG", self.path().join("absent-config.toml"))
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}
