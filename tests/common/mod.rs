//! Common test utilities shared across integration test files.

use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

/// Initialize the test environment. Safe to call from every test.
pub fn init() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .init();
    });
}
