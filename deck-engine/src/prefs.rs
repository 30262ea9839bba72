//! Client-local preference storage.
//!
//! The display order is the only durable client-local state. It lives in a
//! key/value capability shaped like browser local storage: read once at
//! engine construction, rewritten after every structural change to the
//! list collection.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Key/value persistence for client-local preferences.
///
/// Implementations can back this with browser local storage, a file, or
/// anything else; the engine never assumes a mechanism. Reads and writes
/// are synchronous and infallible, matching the local-storage shape; an
/// implementation that can lose writes should log rather than fail the
/// calling operation.
pub trait PreferenceStore: Send + Sync {
    /// Read a value, or `None` if the key has never been written.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str);
}

/// In-memory preference store.
///
/// Clones share state, so tests can seed and inspect the same map the
/// engine writes to.
#[derive(Debug, Default)]
pub struct MemoryPrefs {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl Clone for MemoryPrefs {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl MemoryPrefs {
    /// Create an empty preference store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.inner
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}
