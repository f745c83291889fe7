//! Reference extraction from declared entity fields.
//!
//! Entities reference each other through a fixed set of recognized fields.
//! This module maps each of those fields to the kind of entity it points at
//! and pulls the referenced names out of the field value, turning raw field
//! text into typed [`EntityKey`]s once, at entity construction.
//!
//! # Recognized Fields
//!
//! | field                                  | target         | value                         |
//! |----------------------------------------|----------------|-------------------------------|
//! | `depends`                              | alert          | expression with `alert("name", ...)` calls |
//! | `macro`                                | macro          | name or list of names         |
//! | `warnNotification`, `critNotification` | notification   | name, `a,b` list, or list     |
//! | `lookup`                               | lookup         | name or list of names         |
//! | `template`                             | template       | name                          |
//! | `warn`, `crit`, `$var`                 | lookup         | expression with `lookup("table", ...)` calls |
//!
//! Any other field is carried in the body but contributes no reference.
//!
//! # Ordering
//!
//! References come out in field declaration order, and within a field in the
//! order they are written. The resolver visits them in exactly this order.
//!
//! # Example
//!
//! ```rust
//! use alertgraph::core::{EntityKey, EntityKind};
//! use alertgraph::resolver::reference_extractor::{FieldValue, extract_references};
//!
//! let owner = EntityKey::alert("always.good");
//! let fields = vec![
//!     ("macro".to_string(), FieldValue::text("host_based")),
//!     ("warn".to_string(), FieldValue::text("$q > 200")),
//!     ("warnNotification".to_string(), FieldValue::text("default")),
//! ];
//!
//! let refs = extract_references(&owner, &fields).unwrap();
//! assert_eq!(
//!     refs,
//!     vec![
//!         EntityKey::new(EntityKind::Macro, "host_based"),
//!         EntityKey::new(EntityKind::Notification, "default"),
//!     ]
//! );
//! ```

use regex::Regex;
use std::sync::LazyLock;

use crate::core::{AlertGraphError, EntityKey, EntityKind};

static ALERT_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\balert\(\s*"([^"]+)""#).expect("alert call pattern is valid")
});

static LOOKUP_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\blookup\(\s*"([^"]+)""#).expect("lookup call pattern is valid")
});

/// The value of a declared field, as handed over by the definitions loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A single string value.
    Text(String),
    /// A list of string values.
    List(Vec<String>),
    /// Any other value (number, boolean, table, mixed array), rendered as text.
    Other(String),
}

impl FieldValue {
    /// Shorthand for [`FieldValue::Text`].
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Shorthand for [`FieldValue::List`].
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }

    fn strings(&self) -> Option<Vec<&str>> {
        match self {
            FieldValue::Text(s) => Some(vec![s.as_str()]),
            FieldValue::List(items) => Some(items.iter().map(String::as_str).collect()),
            FieldValue::Other(_) => None,
        }
    }
}

/// How a recognized field encodes its names.
#[derive(Clone, Copy)]
enum Encoding {
    /// One bare name per value.
    Name,
    /// Comma-separated bare names.
    NameList,
    /// Names inside function calls of an expression.
    Calls(&'static LazyLock<Regex>),
}

/// The static field → reference-kind mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizedField {
    /// `depends`: suppression by upstream alerts
    Depends,
    /// `macro`: included fragment
    Macro,
    /// `warnNotification` / `critNotification`: delivery channels
    Notification,
    /// `lookup`: table referenced by name
    Lookup,
    /// `template`: rendering template
    Template,
    /// `warn`, `crit` and `$variables`: expressions that may call `lookup()`
    Expression,
}

impl RecognizedField {
    /// Recognize a field by its declared name.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "depends" => Some(RecognizedField::Depends),
            "macro" => Some(RecognizedField::Macro),
            "warnNotification" | "critNotification" => Some(RecognizedField::Notification),
            "lookup" => Some(RecognizedField::Lookup),
            "template" => Some(RecognizedField::Template),
            "warn" | "crit" => Some(RecognizedField::Expression),
            k if k.starts_with('$') => Some(RecognizedField::Expression),
            _ => None,
        }
    }

    /// The kind of entity this field references.
    #[must_use]
    pub const fn target_kind(&self) -> EntityKind {
        match self {
            RecognizedField::Depends => EntityKind::Alert,
            RecognizedField::Macro => EntityKind::Macro,
            RecognizedField::Notification => EntityKind::Notification,
            RecognizedField::Lookup | RecognizedField::Expression => EntityKind::Lookup,
            RecognizedField::Template => EntityKind::Template,
        }
    }

    fn encoding(&self) -> Encoding {
        match self {
            RecognizedField::Depends => Encoding::Calls(&ALERT_CALL),
            RecognizedField::Expression => Encoding::Calls(&LOOKUP_CALL),
            RecognizedField::Notification => Encoding::NameList,
            RecognizedField::Macro | RecognizedField::Lookup | RecognizedField::Template => {
                Encoding::Name
            }
        }
    }

    /// Pull referenced names out of one field value, in written order.
    fn names(&self, owner: &EntityKey, key: &str, value: &FieldValue) -> Result<Vec<String>, AlertGraphError> {
        let invalid = |reason: String| AlertGraphError::InvalidFieldValue {
            entity: owner.clone(),
            field: key.to_string(),
            reason,
        };

        let Some(values) = value.strings() else {
            // Non-string expressions (e.g. `warn = 1`) reference nothing
            if *self == RecognizedField::Expression {
                return Ok(Vec::new());
            }
            return Err(invalid("expected a string or an array of strings".to_string()));
        };

        let mut names = Vec::new();
        for raw in values {
            match self.encoding() {
                Encoding::Calls(pattern) => {
                    names.extend(pattern.captures_iter(raw).map(|cap| cap[1].trim().to_string()));
                }
                Encoding::NameList => {
                    names.extend(raw.split(',').map(|s| s.trim().to_string()));
                }
                Encoding::Name => names.push(raw.trim().to_string()),
            }
        }

        names.retain(|name| !name.is_empty());
        if let Some(bad) = names.iter().find(|name| name.chars().any(char::is_whitespace)) {
            return Err(invalid(format!("'{bad}' is not a valid entity name")));
        }

        Ok(names)
    }
}

/// Derive the ordered references of an entity from its declared fields.
///
/// `fields` must be in declaration order. Unrecognized fields are skipped.
///
/// # Errors
///
/// Returns [`AlertGraphError::InvalidFieldValue`] if a recognized field holds
/// a value of the wrong shape or a name containing whitespace.
pub fn extract_references(
    owner: &EntityKey,
    fields: &[(String, FieldValue)],
) -> Result<Vec<EntityKey>, AlertGraphError> {
    let mut references = Vec::new();

    for (key, value) in fields {
        let Some(field) = RecognizedField::from_key(key) else {
            continue;
        };
        let kind = field.target_kind();
        references.extend(
            field.names(owner, key, value)?.into_iter().map(|name| EntityKey::new(kind, name)),
        );
    }

    tracing::trace!("{} declares {} reference(s)", owner, references.len());
    Ok(references)
}
