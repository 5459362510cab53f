//! Display snapshot of who is signed in.
//!
//! SYSTEM CONTEXT
//! ==============
//! The navbar and pages read `RwSignal<AuthState>` from context for
//! identity-dependent rendering. Access decisions never use it; the guards
//! and the HTTP client read `CredentialStore` directly. The app refreshes the
//! snapshot after logins, logouts and cross-tab changes.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::UserProfile;
use crate::state::credentials::CredentialStore;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    /// Cached citizen profile, present only alongside a user token.
    pub user: Option<UserProfile>,
    pub user_signed_in: bool,
    pub admin_signed_in: bool,
}

impl AuthState {
    pub fn from_store(store: &CredentialStore) -> Self {
        let user_signed_in = store.user_token().is_some();
        Self {
            user: if user_signed_in { store.user_profile() } else { None },
            user_signed_in,
            admin_signed_in: store.admin_token().is_some(),
        }
    }

    /// Greeting name for the navbar.
    pub fn display_name(&self) -> Option<String> {
        self.user.as_ref().map(UserProfile::display_name)
    }

    /// City the citizen registered with, if known.
    pub fn city(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.city.as_deref())
            .filter(|c| !c.trim().is_empty())
    }
}
