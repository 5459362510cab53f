//! Citizen login page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached directly, through the Report Issue entry point (which sets the
//! user-only flag to hide the admin shortcut) or after a user-scope 401 left
//! a redirect hint. A successful login returns to the hint, else home.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::refresh_auth;
use crate::components::notice_bar::push_notice;
use crate::net::api;
use crate::net::error::AppError;
use crate::net::http::BrowserApiClient;
use crate::net::types::{Credentials, UserProfile};
use crate::state::auth::AuthState;
use crate::state::notice::{NoticeKind, NoticeState};
use crate::util::auth::{ADMIN_LOGIN_PATH, HOME_PATH, SIGNUP_PATH, post_login_destination};

/// Trimmed credentials, or the message to show.
pub fn validate_credentials(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    Ok(Credentials {
        email: email.to_owned(),
        password: password.to_owned(),
    })
}

/// Notice text for a failed login attempt.
///
/// A 401 from a login endpoint means wrong credentials, not an expired
/// session.
pub fn login_failure_message(err: &AppError, fallback: &str) -> String {
    match err {
        AppError::Unauthorized { .. } => "Invalid email or password.".to_owned(),
        other => other.user_message(fallback),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let client = expect_context::<BrowserApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();

    let show_admin_option = !client.store().take_user_only_flag();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let credentials = match validate_credentials(&email.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(message) => {
                push_notice(notices, NoticeKind::Error, message);
                return;
            }
        };
        busy.set(true);

        let client = client.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api::citizen_login(&client, &credentials).await {
                Ok(response) => {
                    let profile = response
                        .user
                        .unwrap_or_else(|| UserProfile::from_email(&credentials.email));
                    api::store_citizen_session(&client, &response.token, &profile);
                    refresh_auth(auth, client.store());
                    push_notice(notices, NoticeKind::Success, "Login successful!");
                    let target = post_login_destination(client.store(), HOME_PATH);
                    navigate(&target, NavigateOptions::default());
                }
                Err(err) => {
                    log::warn!("citizen login failed: {err}");
                    push_notice(
                        notices,
                        NoticeKind::Error,
                        login_failure_message(&err, "Login failed. Please try again."),
                    );
                }
            }
            busy.try_set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Login"</h1>
                <p class="auth-card__subtitle">"Access your SheherConnect account"</p>
                <Show when=move || show_admin_option>
                    <div class="auth-card__switch">
                        <span>"User Login"</span>
                        <A href=ADMIN_LOGIN_PATH attr:class="auth-card__admin">"Admin Login"</A>
                    </div>
                </Show>
                <form class="auth-form" on:submit=on_submit>
                    <label>
                        "Email Address"
                        <input
                            type="email"
                            autocomplete="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Password"
                        <input
                            type="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <button type="submit" class="auth-form__submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Login" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "New to SheherConnect? "
                    <A href=SIGNUP_PATH>"Create an account"</A>
                </p>
            </div>
        </div>
    }
}
