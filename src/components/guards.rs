//! Route guards.
//!
//! Each guard evaluates its `util::auth` policy against the live
//! `CredentialStore` when the route renders: token presence gates rendering,
//! validity is left to the first API call the page makes.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use crate::state::credentials::CredentialStore;
use crate::util::auth::{GuardDecision, admin_protected, auth_only, user_protected};

fn render(decision: GuardDecision, children: Children) -> AnyView {
    match decision {
        GuardDecision::Render => children().into_any(),
        GuardDecision::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
    }
}

/// Citizen-only content.
#[component]
pub fn UserProtected(children: Children) -> impl IntoView {
    let store = expect_context::<CredentialStore>();
    render(user_protected(&store), children)
}

/// Admin-only content; remembers the requested path for after login.
#[component]
pub fn AdminProtected(children: Children) -> impl IntoView {
    let store = expect_context::<CredentialStore>();
    let current = use_location().pathname.get_untracked();
    render(admin_protected(&store, &current), children)
}

/// Login and signup screens, hidden from signed-in citizens.
#[component]
pub fn AuthOnly(children: Children) -> impl IntoView {
    let store = expect_context::<CredentialStore>();
    render(auth_only(&store), children)
}
