//! Build, fetch and parse for one search against the content API.

mod fetcher;
mod parser;
mod request;

use std::time::Duration;

use url::Url;

use crate::models::Article;

pub use fetcher::NewsFetcher;
pub use parser::extract_articles;
pub use request::{base_url, build_search_url, SearchPreferences};

const CONNECTIVITY_TIMEOUT: Duration = Duration::from_secs(3);

/// Run one search. Never fails: a bad URL, a network error, a non-200
/// response and a malformed document all come back as an empty list.
pub async fn fetch_articles(fetcher: &NewsFetcher, url: &str) -> Vec<Article> {
    let body = fetcher.fetch_body(url).await;
    if body.is_empty() {
        tracing::debug!("Empty response body from {}", url);
        return Vec::new();
    }
    extract_articles(&body)
}

/// Cheap reachability probe: can the endpoint's host be resolved at all.
pub async fn is_online(endpoint: &str) -> bool {
    let Ok(url) = Url::parse(endpoint) else {
        return false;
    };
    let (Some(host), Some(port)) = (url.host_str(), url.port_or_known_default()) else {
        return false;
    };
    let host = host.trim_start_matches('[').trim_end_matches(']').to_string();

    let lookup = tokio::net::lookup_host((host.as_str(), port));
    let online = match tokio::time::timeout(CONNECTIVITY_TIMEOUT, lookup).await {
        Ok(Ok(mut addrs)) => addrs.next().is_some(),
        Ok(Err(e)) => {
            tracing::debug!("Cannot resolve {}: {}", host, e);
            false
        }
        Err(_) => {
            tracing::debug!("Timed out resolving {}", host);
            false
        }
    };
    online
}
