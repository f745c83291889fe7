//! Error handling for alertgraph
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** for precise handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`ResolveError`] - failures of a single resolution (cycle, undefined
//!   reference, unknown root). These abort only the call in progress.
//! - [`AlertGraphError`] - crate-wide error enum. Wraps [`ResolveError`] and adds
//!   store construction, definitions loading and configuration failures.
//! - [`ErrorContext`] - wrapper adding details and a suggestion for display.
//!
//! Use [`user_friendly_error`] to turn any [`anyhow::Error`] into an
//! [`ErrorContext`] ready for the terminal.
//!
//! # Examples
//!
//! ```rust,no_run
//! use alertgraph::core::{EntityKey, ResolveError, user_friendly_error};
//!
//! let err = ResolveError::Cycle {
//!     path: vec![EntityKey::alert("a"), EntityKey::alert("b"), EntityKey::alert("a")],
//! };
//! assert_eq!(
//!     err.to_string(),
//!     "Circular reference detected: alert:a → alert:b → alert:a"
//! );
//!
//! let ctx = user_friendly_error(anyhow::Error::from(err));
//! ctx.display(); // colored error with a suggestion
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::core::EntityKey;

/// Render a key path as `kind:name → kind:name → ...`.
#[must_use]
pub fn format_path(path: &[EntityKey]) -> String {
    path.iter().map(ToString::to_string).collect::<Vec<_>>().join(" → ")
}

fn format_suggestions(suggestions: &[String]) -> String {
    suggestions.iter().map(|s| format!("'{s}'")).collect::<Vec<_>>().join(", ")
}

/// Failure of one resolution request.
///
/// Resolution errors are detected eagerly and abort only the request in
/// progress. No partial sequence is ever returned alongside one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A reference path returned to an entity still open on that path.
    ///
    /// `path` starts and ends with the revisited entity, e.g.
    /// `[alert:a, alert:b, alert:a]`.
    #[error("Circular reference detected: {}", format_path(path))]
    Cycle {
        /// Closed reference path, first element equal to last
        path: Vec<EntityKey>,
    },

    /// A declared reference names an entity that does not exist.
    #[error("{referrer} references undefined {missing}")]
    UndefinedReference {
        /// Entity declaring the reference
        referrer: EntityKey,
        /// The key that could not be found
        missing: EntityKey,
        /// Existing names of the same kind that look similar
        suggestions: Vec<String>,
    },

    /// The requested root entity does not exist.
    #[error("{key} is not defined")]
    EntityNotFound {
        /// The requested key
        key: EntityKey,
        /// Existing names of the same kind that look similar
        suggestions: Vec<String>,
    },
}

impl ResolveError {
    /// Similar names recorded with the error, if any.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        match self {
            ResolveError::Cycle { .. } => &[],
            ResolveError::UndefinedReference { suggestions, .. }
            | ResolveError::EntityNotFound { suggestions, .. } => suggestions,
        }
    }
}

/// The main error type for alertgraph operations.
///
/// # Error Categories
///
/// - **Resolution**: [`Resolve`] wraps a [`ResolveError`]
/// - **Store construction**: [`DuplicateEntity`], [`InvalidFieldValue`],
///   [`InvalidEntityName`]
/// - **Input**: [`UnknownEntityKind`], [`DefinitionsParseError`], [`ConfigError`]
/// - **File system**: [`FileSystemError`]
///
/// [`Resolve`]: AlertGraphError::Resolve
/// [`DuplicateEntity`]: AlertGraphError::DuplicateEntity
/// [`InvalidFieldValue`]: AlertGraphError::InvalidFieldValue
/// [`InvalidEntityName`]: AlertGraphError::InvalidEntityName
/// [`UnknownEntityKind`]: AlertGraphError::UnknownEntityKind
/// [`DefinitionsParseError`]: AlertGraphError::DefinitionsParseError
/// [`ConfigError`]: AlertGraphError::ConfigError
/// [`FileSystemError`]: AlertGraphError::FileSystemError
#[derive(Error, Debug, Clone)]
pub enum AlertGraphError {
    /// Resolution of a single entity failed
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Two entities were registered under the same key
    ///
    /// Names only need to be unique within a kind, so this is raised for
    /// e.g. two `alert:os.cpu` definitions but not for `alert:x` and `macro:x`.
    #[error("Duplicate definition of {key}")]
    DuplicateEntity {
        /// The key defined more than once
        key: EntityKey,
    },

    /// A recognized field holds a value of the wrong shape
    #[error("Invalid value for field '{field}' in {entity}: {reason}")]
    InvalidFieldValue {
        /// Entity declaring the field
        entity: EntityKey,
        /// Field name as written in the definition
        field: String,
        /// What was wrong with it
        reason: String,
    },

    /// An entity was declared under a name no reference could ever spell
    #[error("Invalid entity name {key}: {reason}")]
    InvalidEntityName {
        /// The declared key
        key: EntityKey,
        /// What was wrong with the name
        reason: String,
    },

    /// An entity kind keyword was not recognized
    #[error("Unknown entity kind: {kind}")]
    UnknownEntityKind {
        /// The unrecognized keyword
        kind: String,
    },

    /// A definitions document could not be parsed
    #[error("Invalid definitions file syntax in {file}")]
    DefinitionsParseError {
        /// Path of the document
        file: String,
        /// Parser message
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// File system operation failed
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// The operation that failed (e.g. "read")
        operation: String,
        /// The path involved
        path: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error with user-facing details and a suggestion.
///
/// ```rust,no_run
/// use alertgraph::core::{AlertGraphError, ErrorContext};
///
/// let context = ErrorContext::new(AlertGraphError::ConfigError {
///     message: "separator must be a string".to_string(),
/// })
/// .with_suggestion("Quote the separator value in config.toml");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: AlertGraphError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context with no suggestion or details.
    #[must_use]
    pub const fn new(error: AlertGraphError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print to stderr: error in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

fn io_suggestion(kind: std::io::ErrorKind) -> Option<&'static str> {
    match kind {
        std::io::ErrorKind::NotFound => Some("Check that the file exists and the path is correct"),
        std::io::ErrorKind::PermissionDenied => Some("Check the file's permissions and ownership"),
        _ => None,
    }
}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// Recognizes [`AlertGraphError`], [`ResolveError`], [`std::io::Error`] and
/// [`toml::de::Error`]; anything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(err) = error.downcast_ref::<AlertGraphError>() {
        let ctx = create_error_context(err.clone());
        if let AlertGraphError::FileSystemError { .. } = err
            && let Some(io_error) = error.root_cause().downcast_ref::<std::io::Error>()
        {
            let ctx = ctx.with_details(io_error.to_string());
            return match io_suggestion(io_error.kind()) {
                Some(suggestion) => ctx.with_suggestion(suggestion),
                None => ctx,
            };
        }
        return ctx;
    }

    if let Some(err) = error.downcast_ref::<ResolveError>() {
        return create_error_context(AlertGraphError::Resolve(err.clone()));
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>()
        && let Some(suggestion) = io_suggestion(io_error.kind())
    {
        return ErrorContext::new(AlertGraphError::FileSystemError {
            operation: "file access".to_string(),
            path: "unknown".to_string(),
        })
        .with_details(error.to_string())
        .with_suggestion(suggestion);
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(AlertGraphError::DefinitionsParseError {
            file: "definitions".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax. Verify quotes, brackets and table headers")
        .with_details(toml_error.to_string());
    }

    // Generic error - include the full chain
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(AlertGraphError::Other {
        message,
    })
}

fn create_error_context(error: AlertGraphError) -> ErrorContext {
    match &error {
        AlertGraphError::Resolve(ResolveError::Cycle { path }) => {
            let first = path.first().map(ToString::to_string).unwrap_or_default();
            ErrorContext::new(error.clone())
                .with_details(format!(
                    "{first} is reachable from itself through {} reference(s)",
                    path.len().saturating_sub(1)
                ))
                .with_suggestion(
                    "Remove one of the 'depends', 'macro', notification or lookup references along the path",
                )
        }

        AlertGraphError::Resolve(ResolveError::UndefinedReference {
            referrer,
            missing,
            suggestions,
        }) => {
            let ctx = ErrorContext::new(error.clone()).with_details(format!(
                "The definition of {referrer} names a {} called '{}' which is not declared",
                missing.kind, missing.name
            ));
            if suggestions.is_empty() {
                ctx.with_suggestion(format!("Declare {} or remove the reference", missing))
            } else {
                ctx.with_suggestion(format!("Did you mean {}?", format_suggestions(suggestions)))
            }
        }

        AlertGraphError::Resolve(ResolveError::EntityNotFound { key, suggestions }) => {
            let ctx = ErrorContext::new(error.clone());
            if suggestions.is_empty() {
                ctx.with_suggestion(format!("Check the {} name for typos", key.kind))
            } else {
                ctx.with_suggestion(format!("Did you mean {}?", format_suggestions(suggestions)))
            }
        }

        AlertGraphError::DuplicateEntity { key } => ErrorContext::new(error.clone())
            .with_suggestion(format!("Rename or remove one of the {} definitions", key)),

        AlertGraphError::InvalidFieldValue { field, .. } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "'{field}' expects a name, a comma-separated list of names, or an array of names"
            )),

        AlertGraphError::InvalidEntityName { key, .. } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Rename the {} so it is non-empty and has no whitespace, e.g. [{}.\"os.cpu\"]",
                key.kind, key.kind
            )),

        AlertGraphError::UnknownEntityKind { .. } => ErrorContext::new(error.clone())
            .with_suggestion("Valid kinds are: alert, macro, notification, lookup, template"),

        AlertGraphError::DefinitionsParseError { file, reason } => {
            ErrorContext::new(error.clone()).with_details(reason.clone()).with_suggestion(
                format!("Check the TOML syntax in {file}. Each entity is a table such as [alert.\"os.cpu\"]"),
            )
        }

        AlertGraphError::ConfigError { .. } => ErrorContext::new(error.clone())
            .with_suggestion("Check config.toml; supported keys are 'separator' and 'parallel'"),

        _ => ErrorContext::new(error),
    }
}
