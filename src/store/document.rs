//! TOML definitions documents.
//!
//! A definitions document declares entities as TOML tables, one top-level
//! table per kind and one sub-table per entity:
//!
//! ```toml
//! [notification.default]
//! email = "ops@example.com"
//!
//! [macro.host_based]
//! depends = 'alert("scollector.down", "warn")'
//!
//! [alert."os.cpu"]
//! macro = "host_based"
//! warn = 'avg(q("avg:os.cpu{host=*}", "1m", "")) > 50'
//! warnNotification = "default"
//! ```
//!
//! Keys inside an entity table keep their declaration order, which is the
//! order the entity's references are visited in. Each entity's body is the
//! canonical block rendering of its table:
//!
//! ```text
//! alert os.cpu {
//! 	macro = host_based
//! 	warn = avg(q("avg:os.cpu{host=*}", "1m", "")) > 50
//! 	warnNotification = default
//! }
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

use crate::core::{AlertGraphError, EntityKind};
use crate::resolver::reference_extractor::FieldValue;
use crate::store::EntityStore;

/// Raw shape of a definitions document.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefinitionsDocument {
    /// `[alert.<name>]` tables
    #[serde(default)]
    pub alert: BTreeMap<String, toml::Table>,
    /// `[macro.<name>]` tables
    #[serde(default, rename = "macro")]
    pub macros: BTreeMap<String, toml::Table>,
    /// `[notification.<name>]` tables
    #[serde(default)]
    pub notification: BTreeMap<String, toml::Table>,
    /// `[lookup.<name>]` tables
    #[serde(default)]
    pub lookup: BTreeMap<String, toml::Table>,
    /// `[template.<name>]` tables
    #[serde(default)]
    pub template: BTreeMap<String, toml::Table>,
}

impl DefinitionsDocument {
    fn tables(&self, kind: EntityKind) -> &BTreeMap<String, toml::Table> {
        match kind {
            EntityKind::Alert => &self.alert,
            EntityKind::Macro => &self.macros,
            EntityKind::Notification => &self.notification,
            EntityKind::Lookup => &self.lookup,
            EntityKind::Template => &self.template,
        }
    }

    /// Build the entity store, deriving each entity's references.
    ///
    /// # Errors
    ///
    /// Returns [`AlertGraphError::InvalidFieldValue`] if a recognized field is
    /// malformed.
    pub fn into_store(self) -> Result<EntityStore, AlertGraphError> {
        let mut builder = EntityStore::builder();

        for kind in EntityKind::ALL {
            for (name, table) in self.tables(kind) {
                let fields: Vec<(String, FieldValue)> =
                    table.iter().map(|(key, value)| (key.clone(), field_value(value))).collect();
                builder.define(kind, name.clone(), render_body(kind, name, table), &fields)?;
            }
        }

        Ok(builder.build())
    }
}

fn field_value(value: &toml::Value) -> FieldValue {
    match value {
        toml::Value::String(s) => FieldValue::Text(s.clone()),
        toml::Value::Array(items) => {
            let strings: Option<Vec<String>> =
                items.iter().map(|item| item.as_str().map(str::to_string)).collect();
            match strings {
                Some(list) => FieldValue::List(list),
                None => FieldValue::Other(value.to_string()),
            }
        }
        other => FieldValue::Other(other.to_string()),
    }
}

fn render_value(value: &toml::Value) -> String {
    match field_value(value) {
        FieldValue::Text(s) => s,
        FieldValue::List(items) => items.join(","),
        FieldValue::Other(s) => s,
    }
}

/// Render an entity table as a `kind name { ... }` block.
fn render_body(kind: EntityKind, name: &str, table: &toml::Table) -> String {
    let mut body = format!("{kind} {name} {{\n");
    for (key, value) in table {
        body.push_str(&format!("\t{key} = {}\n", render_value(value)));
    }
    body.push('}');
    body
}

/// Parse a definitions document and build its store.
///
/// `file` is only used for error messages.
///
/// # Errors
///
/// Returns [`AlertGraphError::DefinitionsParseError`] for invalid TOML or an
/// unknown top-level table, and the errors of
/// [`DefinitionsDocument::into_store`].
pub fn parse_definitions(content: &str, file: &str) -> Result<EntityStore, AlertGraphError> {
    let document: DefinitionsDocument =
        toml::from_str(content).map_err(|e| AlertGraphError::DefinitionsParseError {
            file: file.to_string(),
            reason: e.to_string(),
        })?;
    document.into_store()
}

/// Read and parse a definitions document from disk.
///
/// # Errors
///
/// Fails if the file cannot be read or does not parse.
pub async fn load_definitions(path: &Path) -> Result<EntityStore> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| AlertGraphError::FileSystemError {
            operation: "read definitions".to_string(),
            path: path.display().to_string(),
        })?;

    let store = parse_definitions(&content, &path.display().to_string())?;
    tracing::debug!("Loaded {} entities from {}", store.len(), path.display());
    Ok(store)
}
