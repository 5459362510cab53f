//! Toast-style notice stack.

use leptos::prelude::*;

use crate::state::notice::{NoticeKind, NoticeState};

/// How long a notice stays up before it dismisses itself.
#[cfg(feature = "csr")]
const NOTICE_TTL_MS: u64 = 4_000;

/// Queue a notice and schedule its dismissal.
///
/// Safe to call from a task that outlived its page: a disposed signal makes
/// this a no-op.
pub fn push_notice(notices: RwSignal<NoticeState>, kind: NoticeKind, text: impl Into<String>) {
    let text = text.into();
    let Some(id) = notices.try_update(|n| n.push(kind, text)) else {
        return;
    };
    schedule_dismiss(notices, id);
}

#[cfg(feature = "csr")]
fn schedule_dismiss(notices: RwSignal<NoticeState>, id: u64) {
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(std::time::Duration::from_millis(NOTICE_TTL_MS)).await;
        notices.try_update(|n| n.dismiss(id));
    });
}

/// Without a browser event loop notices stay until dismissed.
#[cfg(not(feature = "csr"))]
fn schedule_dismiss(_notices: RwSignal<NoticeState>, _id: u64) {}

fn kind_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "notice notice--success",
        NoticeKind::Error => "notice notice--error",
        NoticeKind::Info => "notice notice--info",
    }
}

#[component]
pub fn NoticeBar() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <div class="notice-bar" role="status" aria-live="polite">
            <For
                each=move || notices.get().items
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=kind_class(notice.kind)>
                            <span class="notice__text">{notice.text}</span>
                            <button
                                class="notice__close"
                                aria-label="Dismiss"
                                on:click=move |_| notices.update(|n| n.dismiss(id))
                            >
                                "✕"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
