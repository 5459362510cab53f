//! Once-per-load session bootstrap and the cross-tab credential feed.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` runs `SessionBootstrap::run` when it mounts and `teardown` from
//! `on_cleanup`. Between the two, credential changes made by other tabs
//! arrive through an `ExternalCredentialFeed`:
//!
//! - admin token removed while viewing an `/admin/` path forces `/admin/login`
//! - user token removed while viewing `/report-issue` forces `/login`
//!
//! Every other change only refreshes the display snapshot via `on_change`.
//!
//! DESIGN
//! ======
//! The feed is a trait so the two-tab logout scenario runs against
//! an in-process feed in tests; `BrowserCredentialFeed` wraps the window
//! `storage` event, which the browser only delivers to *other* tabs.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex};

use crate::net::http::{ApiClient, Transport};
use crate::state::credentials::{CredentialKind, CredentialStore};
use crate::util::auth::{ADMIN_LOGIN_PATH, LOGIN_PATH, REPORT_ISSUE_PATH};
use crate::util::navigation::Navigator;

/// A credential written or removed outside this tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialChange {
    Stored(CredentialKind),
    Removed(CredentialKind),
}

impl CredentialChange {
    pub fn kind(self) -> CredentialKind {
        match self {
            Self::Stored(kind) | Self::Removed(kind) => kind,
        }
    }

    /// Map a raw storage event to credential changes.
    ///
    /// `key == None` means storage was cleared wholesale, which removes both
    /// tokens. Keys other than the two token keys yield nothing.
    pub fn from_storage_event(key: Option<&str>, new_value: Option<&str>) -> Vec<Self> {
        let Some(key) = key else {
            return vec![
                Self::Removed(CredentialKind::User),
                Self::Removed(CredentialKind::Admin),
            ];
        };
        let Some(kind) = CredentialKind::from_storage_key(key) else {
            return Vec::new();
        };
        match new_value {
            Some(value) if !value.is_empty() => vec![Self::Stored(kind)],
            _ => vec![Self::Removed(kind)],
        }
    }
}

/// Forced destination for `change` while the tab shows `current_path`.
pub fn cross_tab_redirect(change: CredentialChange, current_path: &str) -> Option<&'static str> {
    match change {
        CredentialChange::Removed(CredentialKind::Admin) if current_path.starts_with("/admin/") => {
            Some(ADMIN_LOGIN_PATH)
        }
        CredentialChange::Removed(CredentialKind::User)
            if current_path.trim_end_matches('/') == REPORT_ISSUE_PATH =>
        {
            Some(LOGIN_PATH)
        }
        _ => None,
    }
}

pub type ChangeCallback = Arc<dyn Fn(CredentialChange) + Send + Sync>;

/// Handle that cancels a feed registration when cancelled or dropped.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Source of credential changes made outside this tab.
pub trait ExternalCredentialFeed {
    /// Deliver every change to `kind` to `callback` until the returned
    /// subscription is cancelled.
    fn subscribe(&self, kind: CredentialKind, callback: ChangeCallback) -> Subscription;
}

/// Window `storage` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserCredentialFeed;

impl ExternalCredentialFeed for BrowserCredentialFeed {
    fn subscribe(&self, kind: CredentialKind, callback: ChangeCallback) -> Subscription {
        listen_storage_events(kind, callback)
    }
}

#[cfg(feature = "csr")]
fn listen_storage_events(kind: CredentialKind, callback: ChangeCallback) -> Subscription {
    let handle = leptos::prelude::window_event_listener(leptos::ev::storage, move |ev| {
        let key = ev.key();
        let new_value = ev.new_value();
        for change in CredentialChange::from_storage_event(key.as_deref(), new_value.as_deref()) {
            if change.kind() == kind {
                callback(change);
            }
        }
    });
    Subscription::new(move || handle.remove())
}

/// No other tabs exist outside the browser.
#[cfg(not(feature = "csr"))]
fn listen_storage_events(_kind: CredentialKind, _callback: ChangeCallback) -> Subscription {
    Subscription::new(|| {})
}

/// Which sessions were found in storage at load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub user_restored: bool,
    pub admin_restored: bool,
}

impl SessionSnapshot {
    pub fn from_store(store: &CredentialStore) -> Self {
        Self {
            user_restored: store.user_token().is_some(),
            admin_restored: store.admin_token().is_some(),
        }
    }
}

/// Live cross-tab registrations for the current app instance.
pub struct SessionBootstrap {
    subscriptions: Mutex<Vec<Subscription>>,
}

impl SessionBootstrap {
    /// Prime the client with the stored citizen token and start listening
    /// for removals from other tabs.
    pub fn run<T: Transport>(
        client: &ApiClient<T>,
        feed: &dyn ExternalCredentialFeed,
        navigator: Arc<dyn Navigator>,
        on_change: ChangeCallback,
    ) -> Self {
        let store = client.store();
        let snapshot = SessionSnapshot::from_store(store);
        client.prime_user_bearer(store.user_token());
        log::info!(
            "session bootstrap: user session {}, admin session {}",
            presence(snapshot.user_restored),
            presence(snapshot.admin_restored),
        );

        let handler: ChangeCallback = Arc::new(move |change| {
            let current = navigator.current_path();
            if let Some(target) = cross_tab_redirect(change, &current) {
                log::info!("credential removed in another tab; leaving {current} for {target}");
                navigator.force_navigate(target);
            }
            on_change(change);
        });
        let subscriptions = [CredentialKind::User, CredentialKind::Admin]
            .into_iter()
            .map(|kind| feed.subscribe(kind, Arc::clone(&handler)))
            .collect();

        Self {
            subscriptions: Mutex::new(subscriptions),
        }
    }

    /// Cancel the cross-tab registrations. Safe to call more than once.
    pub fn teardown(&self) {
        let drained: Vec<Subscription> = self
            .subscriptions
            .lock()
            .map(|mut subs| subs.drain(..).collect())
            .unwrap_or_default();
        for subscription in drained {
            subscription.cancel();
        }
    }
}

fn presence(present: bool) -> &'static str {
    if present { "restored" } else { "absent" }
}
