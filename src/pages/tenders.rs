//! Public tender list and the "Add Tender" entry point.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::notice_bar::push_notice;
use crate::components::tender_card::TenderCard;
use crate::net::api;
use crate::net::http::BrowserApiClient;
use crate::net::scope::RequestScope;
use crate::net::types::Tender;
use crate::state::notice::{NoticeKind, NoticeState};
use crate::state::tenders::TenderFilter;
use crate::util::auth::{ADMIN_LOGIN_PATH, add_tender_destination};

/// Fetch the tender list into `tenders`, toggling `loading` around the call.
pub(crate) fn spawn_tender_load(
    client: BrowserApiClient,
    scope: RequestScope,
    tenders: RwSignal<Vec<Tender>>,
    loading: RwSignal<bool>,
    notices: RwSignal<NoticeState>,
) {
    loading.try_set(true);
    leptos::task::spawn_local(async move {
        match api::list_tenders(&client, scope).await {
            Ok(list) => {
                log::debug!("loaded {} tenders", list.len());
                tenders.try_set(list);
            }
            Err(err) if err.is_unauthorized() => {
                push_notice(notices, NoticeKind::Error, "Session expired. Please login again.");
            }
            Err(err) => {
                log::warn!("tender list failed: {err}");
                push_notice(notices, NoticeKind::Error, err.user_message("Failed to load tenders."));
            }
        }
        loading.try_set(false);
    });
}

#[component]
pub fn TendersPage() -> impl IntoView {
    let client = expect_context::<BrowserApiClient>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();

    let tenders = RwSignal::new(Vec::<Tender>::new());
    let loading = RwSignal::new(false);
    let search = RwSignal::new(String::new());
    spawn_tender_load(client.clone(), RequestScope::User, tenders, loading, notices);

    let on_add = move |_: leptos::ev::MouseEvent| {
        let target = add_tender_destination(client.store());
        if target == ADMIN_LOGIN_PATH {
            push_notice(notices, NoticeKind::Info, "Admin login required to add tenders.");
        }
        navigate(target, NavigateOptions::default());
    };

    let visible = move || {
        let filter = TenderFilter {
            search: search.get(),
            ..TenderFilter::default()
        };
        let now = chrono::Utc::now();
        tenders.with(|list| {
            filter
                .apply(list, now)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    view! {
        <section class="tenders-page">
            <header class="page-header">
                <h1>"Public Tenders"</h1>
                <button class="page-header__action" on:click=on_add>"Add Tender"</button>
            </header>
            <input
                class="search-input"
                type="search"
                placeholder="Search by title, department or description"
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />
            <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Loading tenders..."</p> }>
                {move || {
                    let now = chrono::Utc::now();
                    let list = visible();
                    if list.is_empty() {
                        view! { <p class="empty">"No tenders found."</p> }.into_any()
                    } else {
                        list.into_iter()
                            .map(|tender| view! { <TenderCard tender=tender now=now/> })
                            .collect_view()
                            .into_any()
                    }
                }}
            </Show>
        </section>
    }
}
