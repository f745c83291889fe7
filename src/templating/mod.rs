//! Template assembly for alert configurations.
//!
//! To document or validate an alert, everything it depends on has to be known
//! first: upstream alerts it is suppressed by, macros it includes, the
//! notifications and templates it uses, the lookup tables its expressions
//! consult. The [`Assembler`] resolves an alert and concatenates the raw
//! definition text of all of those entities, dependencies first, into a
//! single self-contained string.
//!
//! # Example
//!
//! ```rust
//! use alertgraph::store::parse_definitions;
//! use alertgraph::templating::Assembler;
//!
//! let store = parse_definitions(
//!     r#"
//! [notification.default]
//! email = "ops@example.com"
//!
//! [alert."ping.host"]
//! warnNotification = "default"
//! "#,
//!     "example.toml",
//! )
//! .unwrap();
//!
//! let batch = Assembler::new(&store).assemble_all();
//! assert_eq!(
//!     batch.get("ping.host"),
//!     Some("notification default {\n\temail = ops@example.com\n}\nalert ping.host {\n\twarnNotification = default\n}")
//! );
//! ```

pub mod assembler;

pub use assembler::{Assembler, BatchAssembly};
