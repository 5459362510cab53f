//! Key/value storage backends for persisted browser state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `CredentialStore` talks to storage only through `KeyValueStorage`, so the
//! browser `localStorage` binding and the in-memory fake are interchangeable.
//! Both are `Send + Sync` to satisfy Leptos context bounds.
//!
//! TRADE-OFFS
//! ==========
//! Storage access is best-effort: an unavailable backend reads as empty and
//! swallows writes rather than surfacing errors into the UI.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Minimal string key/value store with `localStorage` semantics.
pub trait KeyValueStorage: Send + Sync {
    /// Read the raw value for `key`, or `None` when missing or unreadable.
    fn get(&self, key: &str) -> Option<String>;
    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);
    /// Delete `key`. Removing a missing key is a no-op.
    fn remove(&self, key: &str);
    /// Whether the backend can currently be read and written.
    fn is_available(&self) -> bool;
}

/// Origin-scoped browser `localStorage`.
///
/// The handle is resolved on every call; `web_sys::Storage` is not `Send`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        local::get(key)
    }

    fn set(&self, key: &str, value: &str) {
        local::set(key, value);
    }

    fn remove(&self, key: &str) {
        local::remove(key);
    }

    fn is_available(&self) -> bool {
        local::available()
    }
}

#[cfg(feature = "csr")]
mod local {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }

    pub(super) fn get(key: &str) -> Option<String> {
        storage()?.get_item(key).ok().flatten()
    }

    pub(super) fn set(key: &str, value: &str) {
        let Some(storage) = storage() else {
            return;
        };
        if storage.set_item(key, value).is_err() {
            log::warn!("localStorage write failed for {key}");
        }
    }

    pub(super) fn remove(key: &str) {
        let Some(storage) = storage() else {
            return;
        };
        if storage.remove_item(key).is_err() {
            log::warn!("localStorage remove failed for {key}");
        }
    }

    pub(super) fn available() -> bool {
        storage().is_some()
    }
}

/// Outside the browser there is no `localStorage`: reads are empty, writes vanish.
#[cfg(not(feature = "csr"))]
mod local {
    pub(super) fn get(_key: &str) -> Option<String> {
        None
    }

    pub(super) fn set(_key: &str, _value: &str) {}

    pub(super) fn remove(_key: &str) {}

    pub(super) fn available() -> bool {
        false
    }
}

/// In-memory storage used by tests and non-browser builds.
#[derive(Debug)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    available: AtomicBool,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate storage becoming unreadable (private mode, quota, etc.).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Relaxed);
    }

    /// Number of stored keys, ignoring availability.
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |e| e.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        if !self.is_available() {
            return None;
        }
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if !self.is_available() {
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if !self.is_available() {
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}

/// Load a JSON value stored under `key`. Missing or malformed data is `None`.
pub fn load_json<T: DeserializeOwned>(storage: &dyn KeyValueStorage, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("discarding malformed {key} entry: {e}");
            None
        }
    }
}

/// Save a JSON value under `key`.
pub fn save_json<T: Serialize>(storage: &dyn KeyValueStorage, key: &str, value: &T) {
    let Ok(raw) = serde_json::to_string(value) else {
        return;
    };
    storage.set(key, &raw);
}
