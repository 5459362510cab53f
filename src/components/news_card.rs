use leptos::prelude::*;

use crate::net::types::NewsArticle;

/// `publishedAt` date part for display.
fn published_date(article: &NewsArticle) -> Option<String> {
    let raw = article.published_at.as_deref()?;
    Some(raw.split('T').next().unwrap_or(raw).to_owned())
}

#[component]
pub fn NewsCard(article: NewsArticle) -> impl IntoView {
    let published = published_date(&article);
    let source = article.source.as_ref().and_then(|s| s.name.clone());

    view! {
        <article class="news-card">
            {article.image_url.clone().map(|src| view! {
                <img class="news-card__image" src=src alt="" loading="lazy"/>
            })}
            <div class="news-card__body">
                <h3>
                    <a href=article.url.clone() target="_blank" rel="noopener noreferrer">
                        {article.title.clone()}
                    </a>
                </h3>
                {article.description.clone().map(|text| view! { <p>{text}</p> })}
                <p class="news-card__meta">
                    {source}
                    {published.map(|date| format!(" · {date}"))}
                </p>
            </div>
        </article>
    }
}
