//! Card for one tender, shared by the public list and the admin dashboard.

use chrono::{DateTime, Utc};
use leptos::prelude::*;

use crate::net::types::Tender;
use crate::state::tenders::{format_deadline, is_upcoming};

#[component]
pub fn TenderCard(
    tender: Tender,
    now: DateTime<Utc>,
    #[prop(optional)] on_delete: Option<Callback<String>>,
) -> impl IntoView {
    let open = is_upcoming(&tender, now);
    let deadline = format_deadline(&tender.deadline);
    let id = tender.id.clone();
    let file_url = tender.file_url.clone().filter(|url| !url.trim().is_empty());

    view! {
        <article class="tender-card" class:tender-card--expired=!open>
            <header class="tender-card__header">
                <h3>{tender.title}</h3>
                <span class="tender-card__type">{tender.kind}</span>
            </header>
            <p class="tender-card__department">{tender.department}</p>
            <p class="tender-card__description">{tender.description}</p>
            <footer class="tender-card__footer">
                <span class="tender-card__deadline">
                    {if open { "Closes " } else { "Closed " }}
                    {deadline}
                </span>
                {file_url.map(|url| view! {
                    <a href=url target="_blank" rel="noopener noreferrer">"View Document"</a>
                })}
                {on_delete.map(|on_delete| {
                    let id = id.clone();
                    view! {
                        <button
                            class="tender-card__delete"
                            on:click=move |_| on_delete.run(id.clone())
                        >
                            "Delete"
                        </button>
                    }
                })}
            </footer>
        </article>
    }
}
