//! Human-readable dependency trees.
//!
//! ```text
//! alert:always.good
//! ├── macro:host_based
//! │   └── alert:scollector.down
//! │       ├── alert:ping.host
//! │       │   └── notification:default
//! │       └── notification:default (see above)
//! └── notification:default (see above)
//! ```
//!
//! Children are listed in declaration order. An entity that was already
//! expanded earlier in the tree is printed again with a `(see above)` marker
//! and not expanded a second time.

use std::collections::HashSet;

use super::Resolver;
use crate::core::{Entity, EntityKey, EntityKind, ResolveError};

/// One open entity while rendering.
struct TreeFrame<'a> {
    entity: &'a Entity,
    next: usize,
    /// Length of the shared prefix before this entity's indentation.
    prefix_len: usize,
}

impl<'a> Resolver<'a> {
    /// Render the dependency tree of `kind:name`.
    ///
    /// # Errors
    ///
    /// Fails exactly when [`Resolver::resolve`] fails for the same root, so a
    /// tree is only ever rendered for an acyclic, fully defined configuration.
    pub fn tree(&self, kind: EntityKind, name: &str) -> Result<String, ResolveError> {
        let root = EntityKey::new(kind, name);
        let root_entity = self.resolve_key(&root)?.root();

        let mut result = format!("{root}\n");
        let mut expanded: HashSet<&'a EntityKey> = HashSet::from([root_entity.key()]);
        let mut prefix = String::new();
        let mut stack = vec![TreeFrame {
            entity: root_entity,
            next: 0,
            prefix_len: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let entity = frame.entity;
            let children = entity.references();
            let Some(child) = children.get(frame.next) else {
                prefix.truncate(frame.prefix_len);
                stack.pop();
                continue;
            };
            let is_last = frame.next + 1 == children.len();
            frame.next += 1;

            let connector = if is_last {
                "└── "
            } else {
                "├── "
            };

            if !expanded.insert(child) {
                result.push_str(&format!("{prefix}{connector}{child} (see above)\n"));
                continue;
            }
            result.push_str(&format!("{prefix}{connector}{child}\n"));

            // Resolution succeeded, so every reachable key is present
            let Some(target) = self.store().get(child) else {
                continue;
            };
            let prefix_len = prefix.len();
            prefix.push_str(if is_last {
                "    "
            } else {
                "│   "
            });
            stack.push(TreeFrame {
                entity: target,
                next: 0,
                prefix_len,
            });
        }

        Ok(result)
    }
}
