//! Full news feed with a city picker.

use leptos::prelude::*;

use crate::components::news_card::NewsCard;
use crate::net::news::NEWS_PAGE_LIMIT;
use crate::net::types::NewsArticle;
use crate::pages::home::{news_city, spawn_news_load};
use crate::state::auth::AuthState;
use crate::util::config::AppConfig;

#[component]
pub fn NewsPage() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let auth = expect_context::<RwSignal<AuthState>>();

    let city = RwSignal::new(auth.with_untracked(|a| news_city(a, &config)));
    let shown_city = RwSignal::new(city.get_untracked());
    let articles = RwSignal::new(Vec::<NewsArticle>::new());
    let loading = RwSignal::new(false);

    let load = move || {
        let wanted = city.get_untracked().trim().to_owned();
        if wanted.is_empty() {
            return;
        }
        shown_city.set(wanted.clone());
        spawn_news_load(config.clone(), wanted, NEWS_PAGE_LIMIT, articles, loading);
    };
    load();

    let on_search = {
        let load = load.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            load();
        }
    };

    view! {
        <section class="news-page">
            <header class="page-header">
                <h1>{move || format!("News from {}", shown_city.get())}</h1>
                <form class="news-page__city" on:submit=on_search>
                    <input
                        type="text"
                        placeholder="City"
                        prop:value=move || city.get()
                        on:input=move |ev| city.set(event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || loading.get()>"Show"</button>
                </form>
            </header>
            <Show
                when=move || !articles.with(Vec::is_empty)
                fallback=move || view! {
                    <p class="empty">
                        {move || if loading.get() { "Loading news..." } else { "No news available right now." }}
                    </p>
                }
            >
                <div class="news-grid">
                    <For
                        each=move || articles.get()
                        key=|article| article.url.clone()
                        children=|article| view! { <NewsCard article=article/> }
                    />
                </div>
            </Show>
        </section>
    }
}
