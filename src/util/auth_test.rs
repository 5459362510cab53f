use std::sync::Arc;

use super::*;
use crate::util::storage::MemoryStorage;

fn store() -> CredentialStore {
    CredentialStore::new(Arc::new(MemoryStorage::new()))
}

#[test]
fn user_protected_requires_user_token_only() {
    let store = store();
    store.set_admin_token("a1");
    assert_eq!(user_protected(&store), GuardDecision::Redirect("/login".to_owned()));

    store.set_user_token("u1");
    assert_eq!(user_protected(&store), GuardDecision::Render);
}

#[test]
fn admin_protected_redirects_and_remembers_path() {
    let store = store();
    store.set_user_token("u1");

    assert_eq!(
        admin_protected(&store, "/admin/dashboard"),
        GuardDecision::Redirect("/admin/login".to_owned())
    );
    assert_eq!(store.take_redirect_hint().as_deref(), Some("/admin/dashboard"));

    store.set_admin_token("a1");
    assert_eq!(admin_protected(&store, "/admin/dashboard"), GuardDecision::Render);
    assert_eq!(store.take_redirect_hint(), None);
}

#[test]
fn auth_only_sends_signed_in_citizens_home() {
    let store = store();
    assert_eq!(auth_only(&store), GuardDecision::Render);
    store.set_user_token("u1");
    assert_eq!(auth_only(&store), GuardDecision::Redirect("/".to_owned()));
}

#[test]
fn auth_only_ignores_admin_token() {
    let store = store();
    store.set_admin_token("a1");
    assert_eq!(auth_only(&store), GuardDecision::Render);
}

#[test]
fn anonymous_report_issue_round_trips_through_login() {
    let store = store();

    assert_eq!(begin_report_issue(&store), "/login");
    // The login screen consumes the flag on mount.
    assert!(store.take_user_only_flag());
    assert!(!store.take_user_only_flag());

    store.set_user_token("u1");
    assert_eq!(post_login_destination(&store, "/"), "/report-issue");
    assert_eq!(user_protected(&store), GuardDecision::Render);
    assert_eq!(post_login_destination(&store, "/"), "/");
}

#[test]
fn signed_in_report_issue_goes_straight_there() {
    let store = store();
    store.set_user_token("u1");
    assert_eq!(begin_report_issue(&store), "/report-issue");
    assert!(!store.take_user_only_flag());
    assert_eq!(store.take_redirect_hint(), None);
}

#[test]
fn add_tender_routes_by_admin_token() {
    let store = store();
    assert_eq!(add_tender_destination(&store), "/admin/login");
    assert_eq!(post_login_destination(&store, "/admin/dashboard"), "/tenders");

    store.set_admin_token("a1");
    assert_eq!(add_tender_destination(&store), "/admin/dashboard");
}
