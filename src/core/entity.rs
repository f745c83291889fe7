//! Entity kinds, keys and records
//!
//! Every object in an alert configuration is an [`Entity`] identified by an
//! [`EntityKey`]: the pair of its [`EntityKind`] and its name. Names are only
//! unique within a kind, so a macro and an alert may share a name without
//! colliding.
//!
//! Entities are immutable once built. The references an entity carries are
//! derived from its declared fields when it is constructed (see
//! [`crate::resolver::reference_extractor`]), so downstream code only ever
//! handles typed keys.
//!
//! # Examples
//!
//! ```rust
//! use alertgraph::core::{Entity, EntityKey, EntityKind};
//!
//! let entity = Entity::new(
//!     EntityKind::Alert,
//!     "os.cpu",
//!     "alert os.cpu {\n\tmacro = host_based\n}",
//!     vec![EntityKey::new(EntityKind::Macro, "host_based")],
//! );
//!
//! assert_eq!(entity.key().to_string(), "alert:os.cpu");
//! assert_eq!(entity.references().len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::AlertGraphError;

/// The kinds of named entity an alert configuration can declare.
///
/// `EntityKind` serializes to its lowercase name (`"alert"`, `"macro"`, ...),
/// which is also the table name used in definitions documents.
///
/// ```rust
/// use alertgraph::core::EntityKind;
///
/// let kind: EntityKind = "Notification".parse().unwrap();
/// assert_eq!(kind, EntityKind::Notification);
/// assert_eq!(kind.to_string(), "notification");
/// assert!("channel".parse::<EntityKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A rule evaluated against time-series data.
    Alert,
    /// A reusable fragment an alert includes by name.
    Macro,
    /// A delivery channel an alert sends through.
    Notification,
    /// A keyed table of overrides consulted by alert expressions.
    Lookup,
    /// A rendering template an alert formats its notifications with.
    Template,
}

impl EntityKind {
    /// All kinds, in the order definitions documents list them.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Alert,
        EntityKind::Macro,
        EntityKind::Notification,
        EntityKind::Lookup,
        EntityKind::Template,
    ];

    /// The lowercase keyword for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Alert => "alert",
            EntityKind::Macro => "macro",
            EntityKind::Notification => "notification",
            EntityKind::Lookup => "lookup",
            EntityKind::Template => "template",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = AlertGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alert" => Ok(EntityKind::Alert),
            "macro" => Ok(EntityKind::Macro),
            "notification" => Ok(EntityKind::Notification),
            "lookup" => Ok(EntityKind::Lookup),
            "template" => Ok(EntityKind::Template),
            _ => Err(AlertGraphError::UnknownEntityKind {
                kind: s.to_string(),
            }),
        }
    }
}

/// The identity of an entity: its kind plus its name.
///
/// Ordering is by kind first and then by name, which gives stores and
/// validation reports a stable iteration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    /// Kind of the entity.
    pub kind: EntityKind,
    /// Name, unique within `kind`.
    pub name: String,
}

impl EntityKey {
    /// Create a key from a kind and a name.
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Shorthand for an alert key.
    pub fn alert(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Alert, name)
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

/// A single named configuration object.
///
/// `body` is the raw definition text. It is opaque to this crate: it is
/// carried through resolution and concatenated by the assembler, never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    key: EntityKey,
    body: String,
    references: Vec<EntityKey>,
}

impl Entity {
    /// Build an entity from already-derived references.
    ///
    /// References are kept in the order given; that order is the order the
    /// resolver visits them in.
    pub fn new(
        kind: EntityKind,
        name: impl Into<String>,
        body: impl Into<String>,
        references: Vec<EntityKey>,
    ) -> Self {
        Self {
            key: EntityKey::new(kind, name),
            body: body.into(),
            references,
        }
    }

    /// The entity's key.
    #[must_use]
    pub fn key(&self) -> &EntityKey {
        &self.key
    }

    /// The entity's kind.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.key.kind
    }

    /// The entity's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.key.name
    }

    /// Raw definition text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// References in declaration order.
    #[must_use]
    pub fn references(&self) -> &[EntityKey] {
        &self.references
    }
}
