//! The immutable entity store.
//!
//! An [`EntityStore`] maps every [`EntityKey`] of a configuration to its
//! [`Entity`]. It is built once, through [`StoreBuilder`], and never mutated
//! afterwards; resolvers and assemblers borrow it read-only, so any number of
//! them can run against the same store concurrently.
//!
//! Entities are kept in key order (kind, then name) so that every iteration
//! over the store is deterministic.
//!
//! # Example
//!
//! ```rust
//! use alertgraph::core::EntityKind;
//! use alertgraph::resolver::reference_extractor::FieldValue;
//! use alertgraph::store::EntityStore;
//!
//! # fn main() -> Result<(), alertgraph::core::AlertGraphError> {
//! let mut builder = EntityStore::builder();
//! builder.define(EntityKind::Alert, "ping.host", "alert ping.host {}", &[])?;
//! builder.define(
//!     EntityKind::Alert,
//!     "scollector.down",
//!     "alert scollector.down {}",
//!     &[("depends".to_string(), FieldValue::text(r#"alert("ping.host", "warn")"#))],
//! )?;
//! let store = builder.build();
//!
//! assert_eq!(store.len(), 2);
//! assert_eq!(store.names_of(EntityKind::Alert), vec!["ping.host", "scollector.down"]);
//! # Ok(())
//! # }
//! ```

pub mod document;

use std::collections::BTreeMap;
use strsim::levenshtein;

use crate::core::{AlertGraphError, Entity, EntityKey, EntityKind};
use crate::resolver::reference_extractor::{FieldValue, extract_references};

pub use document::{DefinitionsDocument, load_definitions, parse_definitions};

/// Maximum Levenshtein distance, as a percentage of the requested name's
/// length, for a stored name to be offered as a suggestion.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Maximum number of suggestions attached to an error.
const MAX_SUGGESTIONS: usize = 3;

/// Read-only mapping from [`EntityKey`] to [`Entity`].
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: BTreeMap<EntityKey, Entity>,
}

impl EntityStore {
    /// Start building a store.
    #[must_use]
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Build a store from ready-made entities.
    ///
    /// # Errors
    ///
    /// Returns [`AlertGraphError::DuplicateEntity`] if two entities share a key.
    pub fn from_entities(
        entities: impl IntoIterator<Item = Entity>,
    ) -> Result<Self, AlertGraphError> {
        let mut builder = Self::builder();
        for entity in entities {
            builder.insert(entity)?;
        }
        Ok(builder.build())
    }

    /// Look up an entity by key.
    #[must_use]
    pub fn get(&self, key: &EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Whether an entity with this key exists.
    #[must_use]
    pub fn contains(&self, key: &EntityKey) -> bool {
        self.entities.contains_key(key)
    }

    /// Total number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the store holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All entities, in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// All entities of one kind, in name order.
    pub fn entities_of(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities.values().filter(move |entity| entity.kind() == kind)
    }

    /// Names of all entities of one kind, in name order.
    #[must_use]
    pub fn names_of(&self, kind: EntityKind) -> Vec<&str> {
        self.entities_of(kind).map(Entity::name).collect()
    }

    /// Existing names of `key.kind` that are close to `key.name`.
    ///
    /// Returns at most three names, closest first.
    #[must_use]
    pub fn similar_names(&self, key: &EntityKey) -> Vec<String> {
        let limit = key.name.len() * SIMILARITY_THRESHOLD_PERCENT / 100;
        let mut scored: Vec<_> = self
            .entities_of(key.kind)
            .map(|entity| (levenshtein(&key.name, entity.name()), entity.name()))
            .filter(|(distance, _)| *distance <= limit)
            .collect();

        // Stable sort keeps name order among equal distances
        scored.sort_by_key(|(distance, _)| *distance);
        scored.into_iter().take(MAX_SUGGESTIONS).map(|(_, name)| name.to_string()).collect()
    }
}

/// Builder enforcing key uniqueness while a store is assembled.
#[derive(Debug, Default)]
pub struct StoreBuilder {
    entities: BTreeMap<EntityKey, Entity>,
}

impl StoreBuilder {
    /// Add an entity whose references are already derived.
    ///
    /// # Errors
    ///
    /// Returns [`AlertGraphError::DuplicateEntity`] if the key is taken.
    pub fn insert(&mut self, entity: Entity) -> Result<&mut Self, AlertGraphError> {
        if self.entities.contains_key(entity.key()) {
            return Err(AlertGraphError::DuplicateEntity {
                key: entity.key().clone(),
            });
        }
        self.entities.insert(entity.key().clone(), entity);
        Ok(self)
    }

    /// Add an entity from its declared fields, deriving its references.
    ///
    /// `fields` must be in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`AlertGraphError::InvalidEntityName`] for an empty name or
    /// one containing whitespace, [`AlertGraphError::InvalidFieldValue`] for
    /// a malformed recognized field, or [`AlertGraphError::DuplicateEntity`].
    pub fn define(
        &mut self,
        kind: EntityKind,
        name: impl Into<String>,
        body: impl Into<String>,
        fields: &[(String, FieldValue)],
    ) -> Result<&mut Self, AlertGraphError> {
        let key = EntityKey::new(kind, name);
        if key.name.is_empty() {
            return Err(AlertGraphError::InvalidEntityName {
                key,
                reason: "name is empty".to_string(),
            });
        }
        if key.name.chars().any(char::is_whitespace) {
            return Err(AlertGraphError::InvalidEntityName {
                key,
                reason: "names cannot contain whitespace".to_string(),
            });
        }
        let references = extract_references(&key, fields)?;
        self.insert(Entity::new(key.kind, key.name, body, references))
    }

    /// Number of entities added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether nothing has been added yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Freeze the store.
    #[must_use]
    pub fn build(self) -> EntityStore {
        tracing::debug!("Built entity store with {} entities", self.entities.len());
        EntityStore {
            entities: self.entities,
        }
    }
}
