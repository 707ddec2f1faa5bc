use url::Url;

use crate::config::{Config, ALL_SECTIONS};
use crate::error::Result;

/// The three user preferences that shape a search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPreferences {
    pub page_size: String,
    pub order_by: String,
    pub section: String,
}

impl From<&Config> for SearchPreferences {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.max_results.clone(),
            order_by: config.order_by.clone(),
            section: config.section.clone(),
        }
    }
}

/// Endpoint plus the parameters every request carries: the API key and the
/// flags that expand contributor tags and article fields.
pub fn base_url(endpoint: &str, api_key: &str) -> Result<Url> {
    let mut url = Url::parse(endpoint)?;
    url.query_pairs_mut()
        .append_pair("show-tags", "contributor")
        .append_pair("show-fields", "all")
        .append_pair("api-key", api_key);
    Ok(url)
}

/// Compose the query URL. Preference values are passed through as given
/// (only lowercased); the API decides whether they are valid.
pub fn build_search_url(base: &Url, query: Option<&str>, prefs: &SearchPreferences) -> Url {
    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();

        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            pairs.append_pair("q", q);
        }

        pairs.append_pair("page-size", &prefs.page_size);
        pairs.append_pair("order-by", &prefs.order_by.to_lowercase());

        if !prefs.section.eq_ignore_ascii_case(ALL_SECTIONS) {
            pairs.append_pair("section", &prefs.section.to_lowercase());
        }
    }
    url
}
