use std::time::Duration;

use reqwest::{Client, StatusCode};
use url::Url;

use crate::error::{FetchError, Result};

pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(15_000);
pub const READ_TIMEOUT: Duration = Duration::from_millis(10_000);

#[derive(Clone)]
pub struct NewsFetcher {
    client: Client,
}

impl NewsFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeouts(CONNECT_TIMEOUT, READ_TIMEOUT)
    }

    /// Exceeding either timeout surfaces as `FetchError::Transport`.
    pub fn with_timeouts(connect: Duration, read: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect)
            .read_timeout(read)
            .user_agent(concat!("newsfeed-reader/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Single GET. Only an exact 200 counts as success; any other status,
    /// including the rest of 2xx, is reported as `FetchError::Status`.
    pub async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        let url = Url::parse(url)?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status));
        }

        Ok(response.text().await?)
    }

    /// Like [`fetch`](Self::fetch) but every failure becomes an empty body.
    pub async fn fetch_body(&self, url: &str) -> String {
        match self.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Failed to fetch {}: {}", url, e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn ok_response_returns_body() {
        let mock_server = serve(200, r#"{"response":{}}"#).await;
        let fetcher = NewsFetcher::new().unwrap();

        let body = fetcher
            .fetch(&format!("{}/search", mock_server.uri()))
            .await
            .unwrap();
        assert_eq!(body, r#"{"response":{}}"#);
    }

    #[tokio::test]
    async fn not_found_is_a_status_error() {
        let mock_server = serve(404, "missing").await;
        let fetcher = NewsFetcher::new().unwrap();
        let url = format!("{}/search", mock_server.uri());

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(StatusCode::NOT_FOUND)));
        assert_eq!(fetcher.fetch_body(&url).await, "");
    }

    #[tokio::test]
    async fn other_success_codes_are_not_accepted() {
        let mock_server = serve(201, "created").await;
        let fetcher = NewsFetcher::new().unwrap();

        let err = fetcher
            .fetch(&format!("{}/search", mock_server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status(StatusCode::CREATED)));
    }

    #[tokio::test]
    async fn invalid_url_is_rejected_before_any_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;
        let fetcher = NewsFetcher::new().unwrap();

        let err = fetcher.fetch("::not a url::").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
        assert_eq!(fetcher.fetch_body("").await, "");
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"response":{}}"#)
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&mock_server)
            .await;
        let fetcher =
            NewsFetcher::with_timeouts(CONNECT_TIMEOUT, Duration::from_millis(200)).unwrap();
        let url = format!("{}/search", mock_server.uri());

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(&err, FetchError::Transport(e) if e.is_timeout()), "{err}");
        assert_eq!(fetcher.fetch_body(&url).await, "");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let fetcher = NewsFetcher::new().unwrap();

        let err = fetcher.fetch("http://127.0.0.1:9/search").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
