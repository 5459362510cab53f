use std::sync::{Arc, Mutex};

use super::*;
use crate::net::test_support::{LocalCredentialFeed, harness};
use crate::util::navigation::RecordingNavigator;

fn recorder() -> (ChangeCallback, Arc<Mutex<Vec<CredentialChange>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let callback: ChangeCallback = Arc::new(move |change| sink.lock().unwrap().push(change));
    (callback, seen)
}

#[test]
fn storage_events_map_to_credential_changes() {
    assert_eq!(
        CredentialChange::from_storage_event(Some("admin-token"), None),
        vec![CredentialChange::Removed(CredentialKind::Admin)]
    );
    assert_eq!(
        CredentialChange::from_storage_event(Some("user-token"), Some("u2")),
        vec![CredentialChange::Stored(CredentialKind::User)]
    );
    assert_eq!(
        CredentialChange::from_storage_event(Some("user-token"), Some("")),
        vec![CredentialChange::Removed(CredentialKind::User)]
    );
    assert!(CredentialChange::from_storage_event(Some("redirect-hint"), None).is_empty());
    assert_eq!(CredentialChange::from_storage_event(None, None).len(), 2);
}

#[test]
fn cross_tab_redirect_policy() {
    let admin_gone = CredentialChange::Removed(CredentialKind::Admin);
    let user_gone = CredentialChange::Removed(CredentialKind::User);

    assert_eq!(cross_tab_redirect(admin_gone, "/admin/dashboard"), Some("/admin/login"));
    assert_eq!(cross_tab_redirect(admin_gone, "/tenders"), None);
    assert_eq!(cross_tab_redirect(user_gone, "/report-issue"), Some("/login"));
    assert_eq!(cross_tab_redirect(user_gone, "/admin/dashboard"), None);
    assert_eq!(cross_tab_redirect(user_gone, "/"), None);
    assert_eq!(
        cross_tab_redirect(CredentialChange::Stored(CredentialKind::Admin), "/admin/dashboard"),
        None
    );
}

#[test]
fn bootstrap_primes_client_and_reports_restored_sessions() {
    let h = harness("/");
    h.client.store().set_user_token("u1");
    let (on_change, _) = recorder();

    assert_eq!(
        SessionSnapshot::from_store(h.client.store()),
        SessionSnapshot {
            user_restored: true,
            admin_restored: false
        }
    );
    let _session = SessionBootstrap::run(&h.client, &LocalCredentialFeed::new(), h.navigator.clone(), on_change);

    h.storage.set_available(false);
    assert_eq!(h.client.bearer_for(crate::net::scope::RequestScope::User).as_deref(), Some("u1"));
}

#[test]
fn admin_logout_in_other_tab_forces_admin_login() {
    let h = harness("/admin/dashboard");
    h.client.store().set_admin_token("a1");
    let feed = LocalCredentialFeed::new();
    let (on_change, seen) = recorder();
    let _session = SessionBootstrap::run(&h.client, &feed, h.navigator.clone(), on_change);

    // Tab A logs out: the shared storage loses the token, then tab B hears about it.
    h.client.store().clear_admin_token();
    feed.emit(CredentialChange::Removed(CredentialKind::Admin));

    assert_eq!(h.navigator.visits(), vec!["/admin/login".to_owned()]);
    assert_eq!(*seen.lock().unwrap(), vec![CredentialChange::Removed(CredentialKind::Admin)]);
}

#[test]
fn user_logout_elsewhere_only_moves_report_issue_tab() {
    let navigator = Arc::new(RecordingNavigator::at("/news"));
    let h = harness("/news");
    let feed = LocalCredentialFeed::new();
    let (on_change, seen) = recorder();
    let _session = SessionBootstrap::run(&h.client, &feed, navigator.clone(), on_change);

    feed.emit(CredentialChange::Removed(CredentialKind::User));
    assert!(navigator.visits().is_empty());

    navigator.set_current("/report-issue");
    feed.emit(CredentialChange::Removed(CredentialKind::User));
    assert_eq!(navigator.visits(), vec!["/login".to_owned()]);
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn teardown_deregisters_listeners() {
    let h = harness("/admin/dashboard");
    let feed = LocalCredentialFeed::new();
    let (on_change, seen) = recorder();
    let session = SessionBootstrap::run(&h.client, &feed, h.navigator.clone(), on_change);
    assert_eq!(feed.listener_count(), 2);

    session.teardown();
    session.teardown();
    feed.emit(CredentialChange::Removed(CredentialKind::Admin));

    assert_eq!(feed.listener_count(), 0);
    assert!(h.navigator.visits().is_empty());
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn dropping_a_subscription_cancels_it() {
    let feed = LocalCredentialFeed::new();
    let (callback, seen) = recorder();
    let subscription = feed.subscribe(CredentialKind::User, callback);
    feed.emit(CredentialChange::Stored(CredentialKind::Admin));
    feed.emit(CredentialChange::Stored(CredentialKind::User));
    drop(subscription);
    feed.emit(CredentialChange::Stored(CredentialKind::User));

    assert_eq!(*seen.lock().unwrap(), vec![CredentialChange::Stored(CredentialKind::User)]);
}

#[cfg(not(feature = "csr"))]
#[test]
fn browser_feed_is_inert_outside_the_browser() {
    let (callback, seen) = recorder();
    let subscription = BrowserCredentialFeed.subscribe(CredentialKind::Admin, callback);
    subscription.cancel();
    assert!(seen.lock().unwrap().is_empty());
}
