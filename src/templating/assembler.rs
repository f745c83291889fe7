//! Template assembly: resolved entities to one text per alert.
//!
//! [`Assembler::assemble`] resolves a root and joins the raw bodies of the
//! resolved entities, in resolution order, with the configured separator.
//! Bodies are copied verbatim; nothing inside them is interpreted.
//!
//! [`Assembler::assemble_all`] does this for every alert in the store. Each
//! alert is resolved independently, so a broken alert is reported in
//! [`BatchAssembly::errors`] while every other alert still assembles.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::config::AssemblyConfig;
use crate::core::{EntityKind, ResolveError};
use crate::resolver::{Resolution, Resolver};
use crate::store::EntityStore;

/// Outcome of assembling every entity of one kind.
///
/// Both maps are keyed and ordered by entity name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchAssembly {
    /// Assembled text per successfully resolved entity.
    pub assembled: BTreeMap<String, String>,
    /// Failure per entity that could not be resolved.
    #[serde(serialize_with = "serialize_errors")]
    pub errors: BTreeMap<String, ResolveError>,
}

impl BatchAssembly {
    /// Whether every entity assembled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Assembled text for `name`, if it succeeded.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.assembled.get(name).map(String::as_str)
    }
}

fn serialize_errors<S>(errors: &BTreeMap<String, ResolveError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_map(errors.iter().map(|(name, err)| (name, err.to_string())))
}

/// Joins resolved entity bodies into template strings.
#[derive(Debug, Clone)]
pub struct Assembler<'a> {
    resolver: Resolver<'a>,
    config: AssemblyConfig,
}

impl<'a> Assembler<'a> {
    /// Create an assembler with the default configuration.
    #[must_use]
    pub fn new(store: &'a EntityStore) -> Self {
        Self::with_config(store, AssemblyConfig::default())
    }

    /// Create an assembler with an explicit configuration.
    #[must_use]
    pub fn with_config(store: &'a EntityStore, config: AssemblyConfig) -> Self {
        Self {
            resolver: Resolver::new(store),
            config,
        }
    }

    /// The resolver used for every assembly.
    #[must_use]
    pub const fn resolver(&self) -> &Resolver<'a> {
        &self.resolver
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    /// Join the bodies of an already computed resolution.
    #[must_use]
    pub fn join(&self, resolution: &Resolution<'_>) -> String {
        resolution.iter().map(|entity| entity.body()).collect::<Vec<_>>().join(&self.config.separator)
    }

    /// Assemble the template text for `kind:name`.
    ///
    /// # Errors
    ///
    /// Propagates the [`ResolveError`] of the underlying resolution.
    pub fn assemble(&self, kind: EntityKind, name: &str) -> Result<String, ResolveError> {
        let resolution = self.resolver.resolve(kind, name)?;
        Ok(self.join(&resolution))
    }

    /// Assemble every alert in the store.
    #[must_use]
    pub fn assemble_all(&self) -> BatchAssembly {
        self.assemble_kind(EntityKind::Alert)
    }

    /// Assemble every template in the store.
    #[must_use]
    pub fn assemble_all_templates(&self) -> BatchAssembly {
        self.assemble_kind(EntityKind::Template)
    }

    fn assemble_kind(&self, kind: EntityKind) -> BatchAssembly {
        let names = self.resolver.store().names_of(kind);
        debug!("Assembling {} {} entities (parallel: {})", names.len(), kind, self.config.parallel);

        let results: Vec<(&str, Result<String, ResolveError>)> = if self.config.parallel {
            names.par_iter().map(|name| (*name, self.assemble(kind, name))).collect()
        } else {
            names.iter().map(|name| (*name, self.assemble(kind, name))).collect()
        };

        let mut batch = BatchAssembly::default();
        for (name, result) in results {
            match result {
                Ok(text) => {
                    batch.assembled.insert(name.to_string(), text);
                }
                Err(err) => {
                    warn!("Failed to assemble {}:{}: {}", kind, name, err);
                    batch.errors.insert(name.to_string(), err);
                }
            }
        }

        batch
    }
}
