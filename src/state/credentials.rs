//! Persisted citizen/admin credentials and one-shot navigation hints.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HTTP client, route guards, session bootstrap and login pages all share
//! one `CredentialStore` handle provided through Leptos context.
//!
//! INVARIANTS
//! ==========
//! - The user and admin tokens live under separate keys; clearing one never
//!   touches the other.
//! - The redirect hint and the user-only flag are read-and-clear: a second
//!   `take_*` call yields nothing.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use std::sync::Arc;

use crate::net::types::UserProfile;
use crate::util::storage::{BrowserStorage, KeyValueStorage, load_json, save_json};

pub const USER_TOKEN_KEY: &str = "user-token";
pub const USER_PROFILE_KEY: &str = "user-profile";
pub const ADMIN_TOKEN_KEY: &str = "admin-token";
pub const REDIRECT_HINT_KEY: &str = "redirect-hint";
pub const USER_ONLY_FLAG_KEY: &str = "user-only-login-flag";

/// Which of the two independent bearer credentials is meant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CredentialKind {
    /// Citizen session.
    User,
    /// Administrator session.
    Admin,
}

impl CredentialKind {
    /// Storage key holding this credential's token.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::User => USER_TOKEN_KEY,
            Self::Admin => ADMIN_TOKEN_KEY,
        }
    }

    /// Reverse of [`CredentialKind::storage_key`].
    pub fn from_storage_key(key: &str) -> Option<Self> {
        match key {
            USER_TOKEN_KEY => Some(Self::User),
            ADMIN_TOKEN_KEY => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Typed access to the persisted session keys.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("user_token", &self.user_token().is_some())
            .field("admin_token", &self.admin_token().is_some())
            .finish()
    }
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Store backed by the browser's `localStorage`.
    pub fn browser() -> Self {
        Self::new(Arc::new(BrowserStorage))
    }

    pub fn storage_available(&self) -> bool {
        self.storage.is_available()
    }

    pub fn token(&self, kind: CredentialKind) -> Option<String> {
        self.storage.get(kind.storage_key()).filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, kind: CredentialKind, token: &str) {
        self.storage.set(kind.storage_key(), token);
    }

    pub fn clear(&self, kind: CredentialKind) {
        self.storage.remove(kind.storage_key());
    }

    pub fn set_user_token(&self, token: &str) {
        self.set_token(CredentialKind::User, token);
    }

    pub fn user_token(&self) -> Option<String> {
        self.token(CredentialKind::User)
    }

    pub fn clear_user_token(&self) {
        self.clear(CredentialKind::User);
    }

    pub fn set_admin_token(&self, token: &str) {
        self.set_token(CredentialKind::Admin, token);
    }

    pub fn admin_token(&self) -> Option<String> {
        self.token(CredentialKind::Admin)
    }

    pub fn clear_admin_token(&self) {
        self.clear(CredentialKind::Admin);
    }

    pub fn set_user_profile(&self, profile: &UserProfile) {
        save_json(self.storage.as_ref(), USER_PROFILE_KEY, profile);
    }

    /// Cached profile; malformed JSON reads as absent.
    pub fn user_profile(&self) -> Option<UserProfile> {
        load_json(self.storage.as_ref(), USER_PROFILE_KEY)
    }

    pub fn clear_user_profile(&self) {
        self.storage.remove(USER_PROFILE_KEY);
    }

    /// Record where to return after the next successful login. Last write wins.
    pub fn set_redirect_hint(&self, path: &str) {
        self.storage.set(REDIRECT_HINT_KEY, path);
    }

    /// Read and delete the pending redirect hint.
    pub fn take_redirect_hint(&self) -> Option<String> {
        let hint = self.storage.get(REDIRECT_HINT_KEY);
        self.storage.remove(REDIRECT_HINT_KEY);
        hint.filter(|h| !h.is_empty())
    }

    /// Ask the login screen to hide the admin-login shortcut once.
    pub fn set_user_only_flag(&self) {
        self.storage.set(USER_ONLY_FLAG_KEY, "true");
    }

    /// Read and delete the user-only flag.
    pub fn take_user_only_flag(&self) -> bool {
        let flag = self.storage.get(USER_ONLY_FLAG_KEY);
        self.storage.remove(USER_ONLY_FLAG_KEY);
        flag.is_some_and(|v| v == "true")
    }

    /// Citizen logout: drop the token and the cached profile.
    pub fn sign_out_user(&self) {
        self.clear_user_token();
        self.clear_user_profile();
    }
}
