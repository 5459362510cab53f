//! Route paths and the pure access policies behind the route guards.
//!
//! The guard components in `components::guards` only render what these
//! functions decide, so the decisions can be tested against a
//! `MemoryStorage`-backed store without mounting anything.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::credentials::CredentialStore;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";
pub const ADMIN_DASHBOARD_PATH: &str = "/admin/dashboard";
pub const REPORT_ISSUE_PATH: &str = "/report-issue";
pub const TENDERS_PATH: &str = "/tenders";
pub const NEWS_PATH: &str = "/news";
pub const PROJECTS_PATH: &str = "/projects";
pub const COMMUNITY_PATH: &str = "/community";

/// What a guard does for the current navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(String),
}

impl GuardDecision {
    fn redirect(path: &str) -> Self {
        Self::Redirect(path.to_owned())
    }
}

/// Citizen-only screens: no user token means `/login`.
pub fn user_protected(store: &CredentialStore) -> GuardDecision {
    if store.user_token().is_some() {
        GuardDecision::Render
    } else {
        GuardDecision::redirect(LOGIN_PATH)
    }
}

/// Admin-only screens: no admin token means `/admin/login`, remembering
/// `current_path` so the admin lands back here after signing in.
pub fn admin_protected(store: &CredentialStore, current_path: &str) -> GuardDecision {
    if store.admin_token().is_some() {
        GuardDecision::Render
    } else {
        store.set_redirect_hint(current_path);
        GuardDecision::redirect(ADMIN_LOGIN_PATH)
    }
}

/// Login/signup screens: a signed-in citizen goes home.
pub fn auth_only(store: &CredentialStore) -> GuardDecision {
    if store.user_token().is_some() {
        GuardDecision::redirect(HOME_PATH)
    } else {
        GuardDecision::Render
    }
}

/// Navbar "Report Issue" entry point.
///
/// Anonymous users are sent to the citizen login with the admin shortcut
/// hidden and `/report-issue` remembered.
pub fn begin_report_issue(store: &CredentialStore) -> &'static str {
    if store.user_token().is_some() {
        REPORT_ISSUE_PATH
    } else {
        store.set_user_only_flag();
        store.set_redirect_hint(REPORT_ISSUE_PATH);
        LOGIN_PATH
    }
}

/// Public tenders "Add Tender" entry point.
pub fn add_tender_destination(store: &CredentialStore) -> &'static str {
    if store.admin_token().is_some() {
        ADMIN_DASHBOARD_PATH
    } else {
        store.set_redirect_hint(TENDERS_PATH);
        ADMIN_LOGIN_PATH
    }
}

/// Where to go after a successful login: the pending hint, else `default`.
pub fn post_login_destination(store: &CredentialStore, default: &str) -> String {
    store
        .take_redirect_hint()
        .unwrap_or_else(|| default.to_owned())
}
