//! Helpers for test code that uses the mock.
//!
//! Rust runs tests in parallel threads, and all clients built with
//! `Client::new` share one process-wide registry. Tests that use it should
//! hold a `ResetGuard`, which serializes them and clears the registry before
//! and after each test. Tests that don't need the shared registry can use
//! `isolated_client` and run fully in parallel.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::client::Client;
use crate::registry::Registry;

static GLOBAL_TEST_LOCK: Mutex<()> = Mutex::new(());

/// Exclusive, freshly cleared access to the process-wide registry.
///
/// The registry is cleared on creation and again on drop.
#[must_use = "the registry is only reserved while the guard is alive"]
pub struct ResetGuard {
    _lock: MutexGuard<'static, ()>,
}

impl ResetGuard {
    /// Wait for other guard holders, then clear the registry.
    pub fn new() -> Self {
        // A test that panicked while holding the guard still released it.
        let lock = GLOBAL_TEST_LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Registry::global().clear();
        Self { _lock: lock }
    }
}

impl Default for ResetGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ResetGuard {
    fn drop(&mut self) {
        Registry::global().clear();
    }
}

/// A client on a private, empty registry.
#[must_use]
pub fn isolated_client(base_id: &str) -> Client {
    Client::with_registry(Arc::new(Registry::new()), base_id, "")
}
