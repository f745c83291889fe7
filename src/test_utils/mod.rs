//! Test utilities for alertgraph
//!
//! Shared by unit tests and, through the `test-utils` feature, by the
//! integration tests:
//! - [`init_test_logging`] installs a tracing subscriber once per process
//! - [`DefinitionsFixture`] provides sample definitions documents
//!
//! # Example
//!
//! ```rust,no_run
//! use alertgraph::test_utils::{DefinitionsFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let store = DefinitionsFixture::dependency_chain().store().unwrap();
//! assert_eq!(store.len(), 4);
//! ```

pub mod fixtures;

pub use fixtures::DefinitionsFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`. With neither, nothing is
/// installed and tests run silently.
///
/// ```bash
/// RUST_LOG=alertgraph=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
