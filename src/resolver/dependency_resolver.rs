//! Order-preserving dependency resolution.
//!
//! [`Resolver::resolve`] walks the references of one root entity depth-first
//! and returns a [`Resolution`]: every entity the root transitively needs,
//! each appearing exactly once and only after everything it references, with
//! the root itself last.
//!
//! # Algorithm
//!
//! Each call keeps its own state:
//! - `emitted` - entities already appended to the output
//! - `in_progress` - entities open on the current path
//! - a stack of frames, each an entity plus the index of its next reference
//!
//! Visiting a reference that is already emitted is a no-op (this is how an
//! entity reached through several paths is deduplicated). Visiting one that
//! is still in progress is a cycle; the error carries the path from that
//! entity's frame back to itself. A reference to a missing entity is an
//! undefined reference. When a frame runs out of references its entity is
//! appended to the output.
//!
//! The explicit stack replaces recursion so that arbitrarily deep reference
//! chains cannot overflow the call stack. The output order and the cycle
//! path are the same as for the recursive formulation.
//!
//! # Example
//!
//! ```rust
//! use alertgraph::core::{Entity, EntityKey, EntityKind};
//! use alertgraph::resolver::Resolver;
//! use alertgraph::store::EntityStore;
//!
//! let store = EntityStore::from_entities([
//!     Entity::new(EntityKind::Alert, "ping.host", "", vec![]),
//!     Entity::new(EntityKind::Alert, "scollector.down", "", vec![EntityKey::alert("ping.host")]),
//! ])
//! .unwrap();
//!
//! let resolution = Resolver::new(&store).resolve(EntityKind::Alert, "scollector.down").unwrap();
//! assert_eq!(resolution.names(), vec!["ping.host", "scollector.down"]);
//! ```

use std::collections::HashSet;
use tracing::{debug, trace};

use crate::core::{Entity, EntityKey, EntityKind, ResolveError};
use crate::store::EntityStore;

/// One open entity on the traversal path.
struct Frame<'a> {
    entity: &'a Entity,
    next: usize,
}

/// Resolves entities against a borrowed, read-only [`EntityStore`].
///
/// A `Resolver` holds no state between calls, so one instance can be shared
/// across threads and used for any number of concurrent resolutions.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    store: &'a EntityStore,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over `store`.
    #[must_use]
    pub const fn new(store: &'a EntityStore) -> Self {
        Self {
            store,
        }
    }

    /// The store this resolver reads from.
    #[must_use]
    pub const fn store(&self) -> &'a EntityStore {
        self.store
    }

    /// Resolve the entity `kind:name`.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::EntityNotFound`] if the root itself does not exist
    /// - [`ResolveError::UndefinedReference`] if a reachable reference is dangling
    /// - [`ResolveError::Cycle`] if a reachable reference path loops
    pub fn resolve(&self, kind: EntityKind, name: &str) -> Result<Resolution<'a>, ResolveError> {
        self.resolve_key(&EntityKey::new(kind, name))
    }

    /// Resolve the entity identified by `root`.
    ///
    /// # Errors
    ///
    /// Same as [`Resolver::resolve`].
    pub fn resolve_key(&self, root: &EntityKey) -> Result<Resolution<'a>, ResolveError> {
        let Some(root_entity) = self.store.get(root) else {
            return Err(ResolveError::EntityNotFound {
                key: root.clone(),
                suggestions: self.store.similar_names(root),
            });
        };

        debug!("Resolving {}", root);

        let mut emitted: HashSet<&'a EntityKey> = HashSet::new();
        let mut in_progress: HashSet<&'a EntityKey> = HashSet::new();
        let mut order: Vec<&'a Entity> = Vec::new();
        let mut stack = vec![Frame {
            entity: root_entity,
            next: 0,
        }];
        in_progress.insert(root_entity.key());

        while let Some(frame) = stack.last_mut() {
            let entity = frame.entity;

            let Some(reference) = entity.references().get(frame.next) else {
                // All references satisfied
                stack.pop();
                in_progress.remove(entity.key());
                emitted.insert(entity.key());
                order.push(entity);
                trace!("Emitted {} at position {}", entity.key(), order.len() - 1);
                continue;
            };
            frame.next += 1;

            if emitted.contains(reference) {
                continue;
            }

            if in_progress.contains(reference) {
                let start = stack
                    .iter()
                    .position(|open| open.entity.key() == reference)
                    .unwrap_or_default();
                let mut path: Vec<EntityKey> =
                    stack[start..].iter().map(|open| open.entity.key().clone()).collect();
                path.push(reference.clone());
                debug!("Cycle while resolving {}: {} entities on the loop", root, path.len() - 1);
                return Err(ResolveError::Cycle {
                    path,
                });
            }

            let Some(target) = self.store.get(reference) else {
                return Err(ResolveError::UndefinedReference {
                    referrer: entity.key().clone(),
                    missing: reference.clone(),
                    suggestions: self.store.similar_names(reference),
                });
            };

            trace!("{} -> {}", entity.key(), target.key());
            in_progress.insert(target.key());
            stack.push(Frame {
                entity: target,
                next: 0,
            });
        }

        debug!("Resolved {} to {} entities", root, order.len());
        Ok(Resolution {
            entities: order,
        })
    }
}

/// The dependency-ordered entities needed to render one root.
///
/// Invariants:
/// - no key appears twice
/// - every entity appears after all entities it references
/// - the root is the last element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    entities: Vec<&'a Entity>,
}

impl<'a> Resolution<'a> {
    /// The resolved entities in order.
    #[must_use]
    pub fn entities(&self) -> &[&'a Entity] {
        &self.entities
    }

    /// The requested root (always the last entity).
    #[must_use]
    pub fn root(&self) -> &'a Entity {
        // A resolution always contains at least its root
        self.entities[self.entities.len() - 1]
    }

    /// Keys in order.
    #[must_use]
    pub fn keys(&self) -> Vec<&'a EntityKey> {
        self.entities.iter().map(|entity| entity.key()).collect()
    }

    /// Names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&'a str> {
        self.entities.iter().map(|entity| entity.name()).collect()
    }

    /// Number of entities, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Always `false`: a resolution contains at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Position of `key` in the sequence.
    #[must_use]
    pub fn position(&self, key: &EntityKey) -> Option<usize> {
        self.entities.iter().position(|entity| entity.key() == key)
    }

    /// Whether `key` is part of the sequence.
    #[must_use]
    pub fn contains(&self, key: &EntityKey) -> bool {
        self.position(key).is_some()
    }

    /// Iterate the entities in order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Entity> + '_ {
        self.entities.iter().copied()
    }
}

impl<'a> IntoIterator for Resolution<'a> {
    type Item = &'a Entity;
    type IntoIter = std::vec::IntoIter<&'a Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}
