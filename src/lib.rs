//! alertgraph - dependency resolution for alert configurations
//!
//! An alerting configuration is a set of named entities: alerts, plus the
//! macros, notifications, lookup tables and templates they refer to. Before an
//! alert can be rendered, validated or shipped as a self-contained document,
//! everything it depends on has to be collected in an order where each entity
//! comes after the entities it references.
//!
//! alertgraph computes that order.
//!
//! # Architecture Overview
//!
//! - Definitions are parsed into an immutable [`store::EntityStore`]. Each
//!   entity's references are extracted once, when it is built.
//! - A [`resolver::Resolver`] walks the references of one root depth-first,
//!   emitting every entity after its dependencies, each exactly once.
//! - A [`templating::Assembler`] joins the raw bodies of a resolution into one
//!   string, for one alert or for every alert at once.
//!
//! Cycles and references to undefined entities are reported as
//! [`core::ResolveError`]s and only ever fail the call that found them.
//!
//! # Core Modules
//!
//! - [`cli`] - the `alertgraph` command-line interface
//! - [`config`] - assembly configuration (`~/.alertgraph/config.toml`)
//! - [`core`] - entity types and error handling
//! - [`resolver`] - per-root resolution, trees and whole-store validation
//! - [`store`] - the entity store and the TOML definitions loader
//! - [`templating`] - template assembly
//!
//! # Example
//!
//! ```rust
//! use alertgraph::core::EntityKind;
//! use alertgraph::resolver::Resolver;
//! use alertgraph::store::parse_definitions;
//!
//! let store = parse_definitions(
//!     r#"
//! [notification.default]
//! email = "ops@example.com"
//!
//! [alert."ping.host"]
//! warnNotification = "default"
//! "#,
//!     "example.toml",
//! )
//! .unwrap();
//!
//! let resolution = Resolver::new(&store).resolve(EntityKind::Alert, "ping.host").unwrap();
//! assert_eq!(resolution.names(), vec!["default", "ping.host"]);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod resolver;
pub mod store;
pub mod templating;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
