//! Citizen signup page.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::refresh_auth;
use crate::components::notice_bar::push_notice;
use crate::net::api;
use crate::net::http::BrowserApiClient;
use crate::net::types::{SignupRequest, UserProfile};
use crate::state::auth::AuthState;
use crate::state::notice::{NoticeKind, NoticeState};
use crate::util::auth::{HOME_PATH, LOGIN_PATH, post_login_destination};

pub const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub city: String,
    pub password: String,
    pub confirm: String,
}

impl SignupForm {
    /// Request body, or the first problem with the form.
    pub fn validate(&self) -> Result<SignupRequest, &'static str> {
        let name = self.name.trim();
        let email = self.email.trim();
        let city = self.city.trim();
        if name.is_empty() || email.is_empty() || city.is_empty() {
            return Err("Name, email and city are required.");
        }
        if !email.contains('@') {
            return Err("Enter a valid email address.");
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err("Password must be at least 6 characters.");
        }
        if self.password != self.confirm {
            return Err("Passwords do not match.");
        }
        Ok(SignupRequest {
            name: name.to_owned(),
            email: email.to_owned(),
            password: self.password.clone(),
            city: city.to_owned(),
        })
    }
}

/// Profile to cache when the signup response signs the user in.
fn profile_for(request: &SignupRequest, returned: Option<UserProfile>) -> UserProfile {
    returned.unwrap_or_else(|| UserProfile {
        id: None,
        name: Some(request.name.clone()),
        email: request.email.clone(),
        city: Some(request.city.clone()),
    })
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let client = expect_context::<BrowserApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();

    let form = RwSignal::new(SignupForm::default());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let request = match form.with_untracked(SignupForm::validate) {
            Ok(request) => request,
            Err(message) => {
                push_notice(notices, NoticeKind::Error, message);
                return;
            }
        };
        busy.set(true);

        let client = client.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api::signup(&client, &request).await {
                Ok(response) => match response.token.filter(|t| !t.is_empty()) {
                    Some(token) => {
                        let profile = profile_for(&request, response.user);
                        api::store_citizen_session(&client, &token, &profile);
                        refresh_auth(auth, client.store());
                        push_notice(notices, NoticeKind::Success, "Account created. Welcome!");
                        let target = post_login_destination(client.store(), HOME_PATH);
                        navigate(&target, NavigateOptions::default());
                    }
                    None => {
                        push_notice(notices, NoticeKind::Success, "Account created. Please login.");
                        navigate(LOGIN_PATH, NavigateOptions::default());
                    }
                },
                Err(err) => {
                    log::warn!("signup failed: {err}");
                    push_notice(notices, NoticeKind::Error, err.user_message("Signup failed. Please try again."));
                }
            }
            busy.try_set(false);
        });
    };

    let field = move |label: &'static str, kind: &'static str, get: fn(&SignupForm) -> String, set: fn(&mut SignupForm, String)| {
        view! {
            <label>
                {label}
                <input
                    type=kind
                    prop:value=move || form.with(get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| set(f, value));
                    }
                />
            </label>
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create account"</h1>
                <p class="auth-card__subtitle">"Report issues and follow your city"</p>
                <form class="auth-form" on:submit=on_submit>
                    {field("Full Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                    {field("Email Address", "email", |f| f.email.clone(), |f, v| f.email = v)}
                    {field("City", "text", |f| f.city.clone(), |f, v| f.city = v)}
                    {field("Password", "password", |f| f.password.clone(), |f, v| f.password = v)}
                    {field("Confirm Password", "password", |f| f.confirm.clone(), |f, v| f.confirm = v)}
                    <button type="submit" class="auth-form__submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Sign up" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Already registered? "
                    <A href=LOGIN_PATH>"Login"</A>
                </p>
            </div>
        </div>
    }
}
