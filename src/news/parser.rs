use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ParseError;
use crate::models::Article;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SearchResult {
    #[serde(deserialize_with = "lenient_string")]
    web_title: String,
    #[serde(deserialize_with = "lenient_string")]
    section_name: String,
    #[serde(deserialize_with = "lenient_string")]
    web_publication_date: String,
    #[serde(deserialize_with = "lenient_string")]
    web_url: String,
    #[serde(deserialize_with = "lenient_list")]
    tags: Vec<Tag>,
    #[serde(deserialize_with = "lenient_object")]
    fields: Fields,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Tag {
    #[serde(deserialize_with = "lenient_string")]
    web_title: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Fields {
    #[serde(deserialize_with = "lenient_string")]
    trail_text: String,
}

impl From<SearchResult> for Article {
    fn from(result: SearchResult) -> Self {
        // Only the first contributor is shown.
        let author = result
            .tags
            .into_iter()
            .next()
            .map(|tag| tag.web_title)
            .unwrap_or_default();

        Self {
            title: result.web_title,
            section_name: result.section_name,
            published_at: result.web_publication_date,
            url: result.web_url,
            author,
            summary: result.fields.trail_text,
        }
    }
}

/// Strings pass through, scalars are stringified, null and containers
/// become empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(object_or_default).collect(),
        _ => Vec::new(),
    })
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    Ok(object_or_default(Value::deserialize(deserializer)?))
}

/// Decode only JSON objects. serde would otherwise map an array onto the
/// struct fields by position.
fn object_or_default<T>(value: Value) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    match value {
        Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
        _ => T::default(),
    }
}

/// Decode a search response body. A missing `results` array is not an
/// error, it just means nothing matched.
pub fn parse_articles(body: &str) -> Result<Vec<Article>, ParseError> {
    let Value::Object(mut document) = serde_json::from_str::<Value>(body)? else {
        return Err(ParseError::NotAnObject("document"));
    };

    let mut response = match document.remove("response") {
        Some(Value::Object(response)) => response,
        None | Some(Value::Null) => return Err(ParseError::MissingResponse),
        Some(_) => return Err(ParseError::NotAnObject("response")),
    };

    let results = match response.remove("results") {
        Some(Value::Array(results)) => results,
        None | Some(Value::Null) => {
            tracing::debug!("No results found");
            return Ok(Vec::new());
        }
        Some(_) => return Err(ParseError::NotAnArray("results")),
    };

    let articles: Vec<Article> = results
        .into_iter()
        .map(|value| Article::from(object_or_default::<SearchResult>(value)))
        .collect();

    Ok(articles)
}

/// Like [`parse_articles`] but a broken document just yields no articles.
pub fn extract_articles(body: &str) -> Vec<Article> {
    match parse_articles(body) {
        Ok(articles) => articles,
        Err(e) => {
            tracing::warn!("Discarding search response: {}", e);
            Vec::new()
        }
    }
}
