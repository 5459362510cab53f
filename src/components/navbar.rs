//! Top navigation with the Report Issue entry point and citizen logout.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::refresh_auth;
use crate::components::notice_bar::push_notice;
use crate::net::http::BrowserApiClient;
use crate::state::auth::AuthState;
use crate::state::notice::{NoticeKind, NoticeState};
use crate::util::auth::{
    ADMIN_DASHBOARD_PATH, COMMUNITY_PATH, HOME_PATH, LOGIN_PATH, NEWS_PATH, PROJECTS_PATH, SIGNUP_PATH, TENDERS_PATH,
    begin_report_issue,
};

#[component]
pub fn Navbar() -> impl IntoView {
    let client = expect_context::<BrowserApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();

    let report_client = client.clone();
    let report_navigate = navigate.clone();
    let on_report_issue = move |_: leptos::ev::MouseEvent| {
        let target = begin_report_issue(report_client.store());
        if target == LOGIN_PATH {
            push_notice(notices, NoticeKind::Info, "Please login to report an issue.");
        }
        report_navigate(target, NavigateOptions::default());
    };

    let on_logout = move |_: leptos::ev::MouseEvent| {
        client.store().sign_out_user();
        client.prime_user_bearer(None);
        refresh_auth(auth, client.store());
        log::info!("citizen signed out");
        push_notice(notices, NoticeKind::Success, "Logged out successfully.");
        navigate(LOGIN_PATH, NavigateOptions::default());
    };

    view! {
        <nav class="navbar">
            <A href=HOME_PATH attr:class="navbar__brand">"SheherConnect"</A>
            <div class="navbar__links">
                <A href=HOME_PATH>"Home"</A>
                <A href=NEWS_PATH>"News"</A>
                <A href=PROJECTS_PATH>"Projects"</A>
                <A href=TENDERS_PATH>"Tenders"</A>
                <A href=COMMUNITY_PATH>"Community"</A>
                <button class="navbar__report" on:click=on_report_issue>
                    "Report Issue"
                </button>
                <Show when=move || auth.get().admin_signed_in>
                    <A href=ADMIN_DASHBOARD_PATH>"Admin"</A>
                </Show>
            </div>
            <div class="navbar__session">
                <Show
                    when=move || auth.get().user_signed_in
                    fallback=|| view! {
                        <A href=LOGIN_PATH>"Login"</A>
                        <A href=SIGNUP_PATH attr:class="navbar__signup">"Sign up"</A>
                    }
                >
                    <span class="navbar__user">
                        {move || auth.get().display_name().unwrap_or_else(|| "Citizen".to_owned())}
                    </span>
                    <button class="navbar__logout" on:click=on_logout.clone()>
                        "Logout"
                    </button>
                </Show>
            </div>
        </nav>
    }
}
