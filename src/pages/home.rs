//! Landing page with city news.
//!
//! News refreshes on demand and on a timer while the page is mounted.
//! Overlapping refreshes are not coalesced; whichever resolves last wins.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::components::news_card::NewsCard;
use crate::components::notice_bar::push_notice;
use crate::net::http::{BrowserApiClient, GlooTransport};
use crate::net::news::{HOME_NEWS_LIMIT, fetch_city_news};
use crate::net::types::NewsArticle;
use crate::state::auth::AuthState;
use crate::state::notice::{NoticeKind, NoticeState};
use crate::util::auth::{LOGIN_PATH, NEWS_PATH, TENDERS_PATH, begin_report_issue};
use crate::util::config::AppConfig;
use crate::util::ticker::Ticker;

/// City whose news is shown: the citizen's, else the configured default.
pub(crate) fn news_city(auth: &AuthState, config: &AppConfig) -> String {
    auth.city().map_or_else(|| config.default_city.clone(), str::to_owned)
}

/// Load news for the current city into `articles`.
pub(crate) fn spawn_news_load(
    config: AppConfig,
    city: String,
    limit: usize,
    articles: RwSignal<Vec<NewsArticle>>,
    loading: RwSignal<bool>,
) {
    loading.try_set(true);
    leptos::task::spawn_local(async move {
        let fetched = fetch_city_news(&GlooTransport, &config, &city, limit).await;
        log::debug!("{} news articles for {city}", fetched.len());
        articles.try_set(fetched);
        loading.try_set(false);
    });
}

#[component]
pub fn HomePage() -> impl IntoView {
    let client = expect_context::<BrowserApiClient>();
    let config = expect_context::<AppConfig>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();

    let articles = RwSignal::new(Vec::<NewsArticle>::new());
    let loading = RwSignal::new(false);
    let city = Memo::new({
        let config = config.clone();
        move |_| auth.with(|a| news_city(a, &config))
    });

    let refresh = {
        let config = config.clone();
        move || spawn_news_load(config.clone(), city.get_untracked(), HOME_NEWS_LIMIT, articles, loading)
    };
    refresh();

    let period = std::time::Duration::from_secs(u64::from(config.news_refresh_secs.max(1)));
    let ticker = StoredValue::new_local(Some(Ticker::every(period, refresh.clone())));
    on_cleanup(move || {
        ticker.try_update_value(|ticker| {
            if let Some(mut ticker) = ticker.take() {
                ticker.cancel();
            }
        });
    });

    let on_report_issue = move |_: leptos::ev::MouseEvent| {
        let target = begin_report_issue(client.store());
        if target == LOGIN_PATH {
            push_notice(notices, NoticeKind::Info, "Please login to report an issue.");
        }
        navigate(target, NavigateOptions::default());
    };

    view! {
        <section class="home-page">
            <div class="hero">
                <h1>"SheherConnect"</h1>
                <p>"Your city, your voice. Report civic issues, track tenders and stay informed."</p>
                <div class="hero__actions">
                    <button class="hero__primary" on:click=on_report_issue>"Report an Issue"</button>
                    <A href=TENDERS_PATH attr:class="hero__secondary">"View Tenders"</A>
                </div>
            </div>

            <div class="home-news">
                <header class="home-news__header">
                    <h2>{move || format!("Latest from {}", city.get())}</h2>
                    <button disabled=move || loading.get() on:click=move |_| refresh()>
                        {move || if loading.get() { "Refreshing..." } else { "Refresh" }}
                    </button>
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
                <A href=NEWS_PATH attr:class="home-news__more">"More news"</A>
            </div>
        </section>
    }
}
