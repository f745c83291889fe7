//! Dependency resolution for alert configurations.
//!
//! This module turns the flat set of entities in an
//! [`EntityStore`](crate::store::EntityStore) into dependency-ordered
//! sequences.
//!
//! # Architecture Overview
//!
//! - [`reference_extractor`] - maps recognized entity fields to typed
//!   references, applied once when an entity is built
//! - [`dependency_resolver`] - [`Resolver`] and [`Resolution`]: per-root,
//!   order-preserving depth-first traversal with deduplication and a cycle guard
//! - [`tree`] - renders one root's references as an indented tree
//! - [`dependency_graph`] - whole-store graph used by [`validate_store`] to
//!   report every dangling reference and cycle at once
//!
//! # Resolution Guarantees
//!
//! For a successful [`Resolver::resolve`] call:
//! - every reference of an entity appears before that entity
//! - no entity appears twice, however many paths reach it
//! - the requested root is the last element
//! - nothing unreachable from the root is included
//! - repeating the call on the same store returns the same sequence
//!
//! # Errors
//!
//! A cycle reachable from the root, or a reference to an entity that does not
//! exist, aborts that one call with a [`ResolveError`](crate::core::ResolveError).
//! The store is never modified, so other calls are unaffected.
//!
//! # Concurrency
//!
//! A [`Resolver`] only borrows the store. It is `Copy`, `Send` and `Sync`, and
//! every call allocates its own traversal state, so resolutions can run in
//! parallel without locking.
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
//! [alert."ping.host"]
//! warn = "$q"
//!
//! [alert."scollector.down"]
//! depends = 'alert("ping.host", "warn")'
//!
//! [macro.host_based]
//! depends = 'alert("scollector.down", "warn")'
//!
//! [alert."os.cpu"]
//! macro = "host_based"
//! "#,
//!     "example.toml",
//! )
//! .unwrap();
//!
//! let resolution = Resolver::new(&store).resolve(EntityKind::Alert, "os.cpu").unwrap();
//! assert_eq!(
//!     resolution.names(),
//!     vec!["ping.host", "scollector.down", "host_based", "os.cpu"]
//! );
//! ```

pub mod dependency_graph;
pub mod dependency_resolver;
pub mod reference_extractor;
pub mod tree;

pub use dependency_graph::{DanglingReference, DependencyGraph, ValidationReport, validate_store};
pub use dependency_resolver::{Resolution, Resolver};
pub use reference_extractor::{FieldValue, RecognizedField, extract_references};
