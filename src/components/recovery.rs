//! Top-level error boundary fallback.
//!
//! One failing screen is replaced by this recovery view; the navbar and the
//! rest of the shell stay up. Error details are shown in debug builds only.

use leptos::prelude::*;

#[component]
pub fn RecoveryScreen(errors: ArcRwSignal<Errors>) -> impl IntoView {
    let details = move || {
        if cfg!(debug_assertions) {
            errors
                .get()
                .into_iter()
                .map(|(_, err)| view! { <li>{err.to_string()}</li> })
                .collect::<Vec<_>>()
        } else {
            Vec::new()
        }
    };

    let on_reload = move |_| {
        log::warn!("reloading after render failure");
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.location().reload() {
                    log::error!("page reload failed: {err:?}");
                }
            }
        }
    };

    view! {
        <section class="recovery">
            <h1>"Something went wrong"</h1>
            <p>"This page failed to load. The rest of SheherConnect is still available."</p>
            <ul class="recovery__details">{details}</ul>
            <button class="recovery__reload" on:click=on_reload>
                "Reload page"
            </button>
        </section>
    }
}
