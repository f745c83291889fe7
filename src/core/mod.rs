//! Core types and error handling for alertgraph
//!
//! This module defines the vocabulary the rest of the crate is written in:
//!
//! - [`EntityKind`], [`EntityKey`] and [`Entity`] - typed configuration objects
//! - [`ResolveError`] - failures of a single resolution request
//! - [`AlertGraphError`] - crate-wide error enum
//! - [`ErrorContext`] and [`user_friendly_error`] - terminal-ready error reports
//!
//! Entities are plain immutable values. All graph behaviour lives in
//! [`crate::resolver`], and all text output lives in [`crate::templating`].

pub mod entity;
pub mod error;

pub use entity::{Entity, EntityKey, EntityKind};
pub use error::{AlertGraphError, ErrorContext, ResolveError, format_path, user_friendly_error};
