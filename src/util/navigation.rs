//! Location access and forced navigation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Router-level navigation (`use_navigate`) covers user actions. A forced
//! location change outside the router is reserved for the HTTP client's 401
//! handling and cross-tab logout, and goes through `Navigator` so those
//! policies can be tested without a window.

use std::sync::Mutex;

/// Read the current path and force a full location change.
pub trait Navigator: Send + Sync {
    /// Path portion of the current location (e.g. `/admin/dashboard`).
    fn current_path(&self) -> String;
    /// Replace the current document location with `path`.
    fn force_navigate(&self, path: &str);
}

/// `window.location` backed navigator.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        location::pathname().unwrap_or_else(|| "/".to_owned())
    }

    fn force_navigate(&self, path: &str) {
        location::assign(path);
    }
}

#[cfg(feature = "csr")]
mod location {
    pub(super) fn pathname() -> Option<String> {
        web_sys::window().and_then(|w| w.location().pathname().ok())
    }

    pub(super) fn assign(path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if window.location().set_href(path).is_err() {
            log::warn!("forced navigation to {path} failed");
        }
    }
}

#[cfg(not(feature = "csr"))]
mod location {
    pub(super) fn pathname() -> Option<String> {
        None
    }

    pub(super) fn assign(_path: &str) {}
}

/// Navigator that records forced navigations instead of performing them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    current: Mutex<String>,
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        Self {
            current: Mutex::new(path.to_owned()),
            visits: Mutex::new(Vec::new()),
        }
    }

    /// Move to `path` as a router navigation would (not recorded as forced).
    pub fn set_current(&self, path: &str) {
        if let Ok(mut current) = self.current.lock() {
            path.clone_into(&mut current);
        }
    }

    /// Forced navigations in the order they happened.
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.current.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn force_navigate(&self, path: &str) {
        self.set_current(path);
        if let Ok(mut visits) = self.visits.lock() {
            visits.push(path.to_owned());
        }
    }
}
