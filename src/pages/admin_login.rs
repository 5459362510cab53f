//! Administrator login page.
//!
//! A stored admin token is verified on mount; a valid one skips the form.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::refresh_auth;
use crate::components::notice_bar::push_notice;
use crate::net::api;
use crate::net::http::BrowserApiClient;
use crate::pages::login::{login_failure_message, validate_credentials};
use crate::state::auth::AuthState;
use crate::state::notice::{NoticeKind, NoticeState};
use crate::util::auth::{ADMIN_DASHBOARD_PATH, LOGIN_PATH, post_login_destination};

#[component]
pub fn AdminLoginPage() -> impl IntoView {
    let client = expect_context::<BrowserApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    if client.store().admin_token().is_some() {
        let client = client.clone();
        let navigate = navigate.clone();
        busy.set(true);
        leptos::task::spawn_local(async move {
            match api::verify_admin(&client).await {
                Ok(verify) if verify.valid => {
                    log::info!("stored admin session still valid");
                    let target = post_login_destination(client.store(), ADMIN_DASHBOARD_PATH);
                    navigate(&target, NavigateOptions::default());
                }
                Ok(_) => {
                    client.store().clear_admin_token();
                    refresh_auth(auth, client.store());
                }
                Err(err) => {
                    log::info!("stored admin session rejected: {err}");
                    refresh_auth(auth, client.store());
                }
            }
            busy.try_set(false);
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let credentials = match validate_credentials(&email.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        let client = client.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api::admin_login(&client, &credentials).await {
                Ok(token) => {
                    client.store().set_admin_token(&token);
                    refresh_auth(auth, client.store());
                    log::info!("admin signed in");
                    push_notice(notices, NoticeKind::Success, "Admin login successful!");
                    let target = post_login_destination(client.store(), ADMIN_DASHBOARD_PATH);
                    navigate(&target, NavigateOptions::default());
                }
                Err(err) => {
                    log::warn!("admin login failed: {err}");
                    let message = login_failure_message(&err, "Admin login failed. Please try again.");
                    error.try_set(Some(message.clone()));
                    push_notice(notices, NoticeKind::Error, message);
                }
            }
            busy.try_set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card auth-card--admin">
                <h1>"Admin Login"</h1>
                <p class="auth-card__subtitle">"Municipal staff only"</p>
                <div class="auth-card__switch">
                    <A href=LOGIN_PATH>"User Login"</A>
                    <span>"Admin Login"</span>
                </div>
                <form class="auth-form" on:submit=on_submit>
                    <label>
                        "Admin Email"
                        <input
                            type="email"
                            autocomplete="username"
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
                    {move || error.get().map(|message| view! { <p class="auth-form__error">{message}</p> })}
                    <button type="submit" class="auth-form__submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Login as Admin" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
