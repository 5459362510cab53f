//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds the shared session services once per load, provides them
//! through context, and runs the session bootstrap. Contexts:
//!
//! - `AppConfig`
//! - `CredentialStore`
//! - `BrowserApiClient`
//! - `RwSignal<AuthState>` and `RwSignal<NoticeState>`

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::components::guards::{AdminProtected, AuthOnly, UserProtected};
use crate::components::navbar::Navbar;
use crate::components::notice_bar::NoticeBar;
use crate::components::recovery::RecoveryScreen;
use crate::net::http::{ApiClient, BrowserApiClient, GlooTransport};
use crate::pages::{
    admin_dashboard::AdminDashboardPage, admin_login::AdminLoginPage, community::CommunityPage, home::HomePage,
    login::LoginPage, news::NewsPage, not_found::NotFoundPage, projects::ProjectsPage, report_issue::ReportIssuePage,
    signup::SignupPage, tenders::TendersPage,
};
use crate::state::auth::AuthState;
use crate::state::credentials::CredentialStore;
use crate::state::notice::NoticeState;
use crate::state::session::{BrowserCredentialFeed, ChangeCallback, SessionBootstrap};
use crate::util::config::AppConfig;
use crate::util::navigation::{BrowserNavigator, Navigator};

/// Re-read the credential store into the display snapshot.
///
/// Writes into a disposed signal are ignored.
pub fn refresh_auth(auth: RwSignal<AuthState>, store: &CredentialStore) {
    auth.try_set(AuthState::from_store(store));
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::load();
    let store = CredentialStore::browser();
    let navigator: Arc<dyn Navigator> = Arc::new(BrowserNavigator);
    let auth = RwSignal::new(AuthState::from_store(&store));

    let cleared_store = store.clone();
    let client: BrowserApiClient = ApiClient::new(GlooTransport, store.clone(), Arc::clone(&navigator), &config.api_base_url)
        .with_on_cleared(Arc::new(move |scope| {
            log::info!("{scope:?} session expired; refreshing auth state");
            refresh_auth(auth, &cleared_store);
        }));
    let notices = RwSignal::new(NoticeState::default());

    let refresh_store = store.clone();
    let on_change: ChangeCallback = Arc::new(move |change| {
        log::debug!("credential change from another tab: {change:?}");
        refresh_auth(auth, &refresh_store);
    });
    let session = Arc::new(SessionBootstrap::run(&client, &BrowserCredentialFeed, navigator, on_change));
    on_cleanup(move || session.teardown());

    provide_context(config);
    provide_context(store);
    provide_context(client);
    provide_context(auth);
    provide_context(notices);

    view! {
        <Stylesheet id="leptos" href="/pkg/sheher-connect.css"/>
        <Title text="SheherConnect"/>

        <Router>
            <Navbar/>
            <NoticeBar/>
            <main class="app-main">
                <ErrorBoundary fallback=|errors| view! { <RecoveryScreen errors=errors/> }>
                    <Routes fallback=|| view! { <NotFoundPage/> }>
                        <Route path=path!("/") view=HomePage/>
                        <Route path=path!("/news") view=NewsPage/>
                        <Route path=path!("/projects") view=ProjectsPage/>
                        <Route path=path!("/community") view=CommunityPage/>
                        <Route path=path!("/tenders") view=TendersPage/>
                        <Route
                            path=path!("/report-issue")
                            view=|| view! { <UserProtected><ReportIssuePage/></UserProtected> }
                        />
                        <Route path=path!("/login") view=|| view! { <AuthOnly><LoginPage/></AuthOnly> }/>
                        <Route path=path!("/signup") view=|| view! { <AuthOnly><SignupPage/></AuthOnly> }/>
                        <Route path=path!("/admin/login") view=AdminLoginPage/>
                        <Route
                            path=path!("/admin/dashboard")
                            view=|| view! { <AdminProtected><AdminDashboardPage/></AdminProtected> }
                        />
                    </Routes>
                </ErrorBoundary>
            </main>
        </Router>
    }
}
