//! Integration test suite for alertgraph
//!
//! End-to-end tests over the public library API and the `alertgraph` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **scenarios**: resolution of the reference configurations
//! - **properties**: ordering guarantees checked over every root of a store
//! - **assembly**: template assembly and batch isolation
//! - **validation**: whole-store validation
//! - **cli**: the `alertgraph` binary

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod assembly;
mod cli;
mod properties;
mod validation;
