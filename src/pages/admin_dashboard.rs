//! Admin tender dashboard: stats, filters, create and delete.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::refresh_auth;
use crate::components::notice_bar::push_notice;
use crate::components::tender_card::TenderCard;
use crate::net::api::{self, NewTender};
use crate::net::http::{BrowserApiClient, Upload};
use crate::net::scope::RequestScope;
use crate::net::types::Tender;
use crate::pages::tenders::spawn_tender_load;
use crate::state::auth::AuthState;
use crate::state::notice::{NoticeKind, NoticeState};
use crate::state::tenders::{TENDER_TYPES, TenderFilter, TenderStats, TenderTab};
use crate::util::auth::ADMIN_LOGIN_PATH;

#[cfg(feature = "csr")]
fn selected_file(ev: &leptos::ev::Event) -> Option<Upload> {
    use wasm_bindgen::JsCast;

    let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    input.files()?.get(0).map(Upload::from_file)
}

#[cfg(not(feature = "csr"))]
fn selected_file(_ev: &leptos::ev::Event) -> Option<Upload> {
    None
}

#[cfg(feature = "csr")]
fn confirm_delete(title: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(&format!("Delete tender \"{title}\"?")).ok())
        .unwrap_or(false)
}

#[cfg(not(feature = "csr"))]
fn confirm_delete(_title: &str) -> bool {
    true
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let client = expect_context::<BrowserApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();

    let tenders = RwSignal::new(Vec::<Tender>::new());
    let loading = RwSignal::new(false);
    let filter = RwSignal::new(TenderFilter::default());
    let draft = RwSignal::new_local(NewTender::default());
    let show_form = RwSignal::new(false);
    let form_error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let reload = {
        let client = client.clone();
        move || spawn_tender_load(client.clone(), RequestScope::Admin, tenders, loading, notices)
    };
    reload();

    let create_client = client.clone();
    let create_reload = reload.clone();
    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let tender = draft.get_untracked();
        if let Err(err) = tender.validate() {
            form_error.set(Some(err.user_message("Check the form.")));
            return;
        }
        form_error.set(None);
        saving.set(true);

        let client = create_client.clone();
        let reload = create_reload.clone();
        leptos::task::spawn_local(async move {
            match api::create_tender(&client, &tender).await {
                Ok(()) => {
                    log::info!("tender created: {}", tender.title.trim());
                    push_notice(notices, NoticeKind::Success, "Tender created successfully!");
                    draft.try_set(NewTender::default());
                    show_form.try_set(false);
                    reload();
                }
                Err(err) if err.is_unauthorized() => {
                    push_notice(notices, NoticeKind::Error, "Session expired. Please login again.");
                }
                Err(err) => {
                    log::warn!("tender create failed: {err}");
                    let message = err.user_message("Failed to create tender.");
                    form_error.try_set(Some(message.clone()));
                    push_notice(notices, NoticeKind::Error, message);
                }
            }
            saving.try_set(false);
        });
    };

    let delete_client = client.clone();
    let on_delete = Callback::new(move |id: String| {
        let title = tenders.with_untracked(|list| {
            list.iter()
                .find(|t| t.id == id)
                .map(|t| t.title.clone())
                .unwrap_or_default()
        });
        if !confirm_delete(&title) {
            return;
        }
        let client = delete_client.clone();
        leptos::task::spawn_local(async move {
            match api::delete_tender(&client, &id).await {
                Ok(()) => {
                    log::info!("tender {id} deleted");
                    tenders.try_update(|list| list.retain(|t| t.id != id));
                    push_notice(notices, NoticeKind::Success, "Tender deleted.");
                }
                Err(err) if err.is_unauthorized() => {
                    push_notice(notices, NoticeKind::Error, "Session expired. Please login again.");
                }
                Err(err) => {
                    log::warn!("tender delete failed: {err}");
                    push_notice(notices, NoticeKind::Error, err.user_message("Failed to delete tender."));
                }
            }
        });
    });

    let on_logout = move |_: leptos::ev::MouseEvent| {
        client.store().clear_admin_token();
        refresh_auth(auth, client.store());
        log::info!("admin signed out");
        push_notice(notices, NoticeKind::Success, "Logged out successfully.");
        navigate(ADMIN_LOGIN_PATH, NavigateOptions::default());
    };

    let stats = move || tenders.with(|list| TenderStats::compute(list, chrono::Utc::now()));

    let text_input = move |label: &'static str, kind: &'static str, get: fn(&NewTender) -> String, set: fn(&mut NewTender, String)| {
        view! {
            <label>
                {label}
                <input
                    type=kind
                    prop:value=move || draft.with(get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| set(d, value));
                    }
                />
            </label>
        }
    };

    view! {
        <section class="admin-dashboard">
            <header class="page-header">
                <h1>"Tender Dashboard"</h1>
                <div class="page-header__actions">
                    <button on:click=move |_| show_form.update(|open| *open = !*open)>
                        {move || if show_form.get() { "Close" } else { "Add Tender" }}
                    </button>
                    <button class="page-header__logout" on:click=on_logout>"Logout"</button>
                </div>
            </header>

            <div class="stats">
                <div class="stats__item"><span>{move || stats().active}</span>"Active"</div>
                <div class="stats__item"><span>{move || stats().expired}</span>"Expired"</div>
                <div class="stats__item"><span>{move || stats().open}</span>"Open"</div>
                <div class="stats__item"><span>{move || stats().limited}</span>"Limited"</div>
            </div>

            <Show when=move || show_form.get()>
                <form class="tender-form" on:submit=on_create.clone()>
                    {text_input("Title", "text", |d| d.title.clone(), |d, v| d.title = v)}
                    {text_input("Department", "text", |d| d.department.clone(), |d, v| d.department = v)}
                    <label>
                        "Description"
                        <textarea
                            rows="4"
                            prop:value=move || draft.with(|d| d.description.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.description = value);
                            }
                        ></textarea>
                    </label>
                    <label>
                        "Type"
                        <select on:change=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.kind = value);
                        }>
                            {TENDER_TYPES
                                .into_iter()
                                .map(|kind| view! {
                                    <option value=kind selected=move || draft.with(|d| d.kind == kind)>{kind}</option>
                                })
                                .collect_view()}
                        </select>
                    </label>
                    {text_input("Deadline", "date", |d| d.deadline.clone(), |d, v| d.deadline = v)}
                    <label>
                        "Document"
                        <input
                            type="file"
                            accept=".pdf,.doc,.docx"
                            on:change=move |ev| {
                                let file = selected_file(&ev);
                                draft.update(|d| d.file = file);
                            }
                        />
                    </label>
                    {move || form_error.get().map(|message| view! { <p class="tender-form__error">{message}</p> })}
                    <button type="submit" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Create Tender" }}
                    </button>
                </form>
            </Show>

            <div class="filters">
                <input
                    type="search"
                    placeholder="Search tenders"
                    prop:value=move || filter.with(|f| f.search.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        filter.update(|f| f.search = value);
                    }
                />
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    filter.update(|f| f.kind = value);
                }>
                    {move || {
                        let choices = tenders.with(|list| filter.with_untracked(|f| f.type_choices(list)));
                        choices
                            .into_iter()
                            .map(|(kind, selected)| {
                                let label = kind.clone();
                                view! { <option value=kind selected=selected>{label}</option> }
                            })
                            .collect_view()
                    }}
                </select>
                <div class="tabs">
                    {TenderTab::ALL
                        .into_iter()
                        .map(|tab| view! {
                            <button
                                class="tabs__tab"
                                class:tabs__tab--active=move || filter.with(|f| f.tab == tab)
                                on:click=move |_| filter.update(|f| f.tab = tab)
                            >
                                {tab.label()}
                            </button>
                        })
                        .collect_view()}
                </div>
            </div>

            <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Loading tenders..."</p> }>
                {move || {
                    let now = chrono::Utc::now();
                    let visible = tenders.with(|list| {
                        filter.with(|f| f.apply(list, now).into_iter().cloned().collect::<Vec<_>>())
                    });
                    if visible.is_empty() {
                        view! { <p class="empty">"No tenders match the current filters."</p> }.into_any()
                    } else {
                        visible
                            .into_iter()
                            .map(|tender| view! { <TenderCard tender=tender now=now on_delete=on_delete/> })
                            .collect_view()
                            .into_any()
                    }
                }}
            </Show>
        </section>
    }
}
