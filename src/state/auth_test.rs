use std::sync::Arc;

use super::*;
use crate::util::storage::MemoryStorage;

fn profile() -> UserProfile {
    UserProfile {
        id: Some("7".to_owned()),
        name: Some("Asha".to_owned()),
        email: "asha@example.in".to_owned(),
        city: Some("Jaipur".to_owned()),
    }
}

#[test]
fn auth_state_defaults_to_signed_out() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(!state.user_signed_in);
    assert!(!state.admin_signed_in);
}

#[test]
fn from_store_reflects_both_tokens_independently() {
    let store = CredentialStore::new(Arc::new(MemoryStorage::new()));
    store.set_admin_token("a1");

    let state = AuthState::from_store(&store);
    assert!(state.admin_signed_in);
    assert!(!state.user_signed_in);

    store.set_user_token("u1");
    store.set_user_profile(&profile());
    let state = AuthState::from_store(&store);
    assert!(state.user_signed_in);
    assert_eq!(state.display_name().as_deref(), Some("Asha"));
    assert_eq!(state.city(), Some("Jaipur"));
}

#[test]
fn stale_profile_without_token_is_hidden() {
    let store = CredentialStore::new(Arc::new(MemoryStorage::new()));
    store.set_user_profile(&profile());
    assert_eq!(AuthState::from_store(&store).user, None);
}
