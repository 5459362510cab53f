//! City news from the external news API.
//!
//! News is decoration: every failure (transport, status, body) collapses to
//! an empty list and a `warn` log line. Requests bypass `ApiClient` since the
//! news API takes its key in the query string, never a bearer.

#[cfg(test)]
#[path = "news_test.rs"]
mod news_test;

use super::http::{Method, PreparedRequest, RequestBody, Transport};
use super::types::{NewsArticle, NewsResponse};
use crate::util::config::AppConfig;

/// Articles shown on the home page.
pub const HOME_NEWS_LIMIT: usize = 3;
/// Articles shown on the news page.
pub const NEWS_PAGE_LIMIT: usize = 12;

/// `everything` query for `city`; over-fetches twice `limit` to survive
/// articles without titles. `timestamp_ms` defeats intermediate caches.
pub fn news_url(config: &AppConfig, city: &str, limit: usize, timestamp_ms: i64) -> String {
    format!(
        "{}/everything?q={}&apiKey={}&sortBy=publishedAt&pageSize={}&language=en&timestamp={timestamp_ms}",
        config.news_api_base_url.trim_end_matches('/'),
        urlencoding::encode(city.trim()),
        urlencoding::encode(&config.news_api_key),
        limit.saturating_mul(2),
    )
}

/// Latest articles about `city`, at most `limit`.
pub async fn fetch_city_news<T: Transport>(
    transport: &T,
    config: &AppConfig,
    city: &str,
    limit: usize,
) -> Vec<NewsArticle> {
    let url = news_url(config, city, limit, chrono::Utc::now().timestamp_millis());
    let request = PreparedRequest {
        method: Method::Get,
        url,
        headers: Vec::new(),
        body: RequestBody::Empty,
    };

    let response = match transport.send(request).await {
        Ok(response) if response.is_success() => response,
        Ok(response) => {
            log::warn!("news lookup for {city} failed with status {}", response.status);
            return Vec::new();
        }
        Err(err) => {
            log::warn!("news lookup for {city} failed: {err}");
            return Vec::new();
        }
    };

    match serde_json::from_str::<NewsResponse>(&response.body) {
        Ok(parsed) => parsed
            .articles
            .into_iter()
            .filter(|article| !article.title.trim().is_empty())
            .take(limit)
            .collect(),
        Err(err) => {
            log::warn!("news response for {city} was not understood: {err}");
            Vec::new()
        }
    }
}
