//! Page fetching over HTTP.
//!
//! The portals serve different (or no) markup to clients that do not look like
//! a desktop browser, so every request carries [`BROWSER_USER_AGENT`].
//!
//! Failures never escape as panics: a non-200 status or a transport error is
//! logged and returned as a [`FetchError`], and the caller decides to treat the
//! source as empty.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// Identification string sent with every request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Request timeout used unless the operator overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a page could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// Something that can turn a URL into page markup.
///
/// [`HttpFetcher`] is the real implementation; tests substitute canned pages.
pub trait FetchPage {
    /// Fetch `url` and return its body as text.
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

/// [`FetchPage`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher with the browser User-Agent and an optional timeout.
    ///
    /// `None` leaves requests unbounded.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(BROWSER_USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "info", skip(self))]
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        info!("Fetching page");
        let response = self.client.get(url).send().await.map_err(|e| {
            error!(error = %e, "Request failed");
            FetchError::Network(e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(%status, "Failed to fetch page");
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(|e| {
            error!(error = %e, "Failed reading response body");
            FetchError::Network(e)
        })?;

        // Both portals publish UTF-8 regardless of what the headers claim.
        let markup = String::from_utf8_lossy(&body).into_owned();
        debug!(bytes = body.len(), "Fetched page");
        Ok(markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_page_ok_sends_browser_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(|req: &Request| {
                req.headers
                    .get("user-agent")
                    .and_then(|v| v.to_str().ok())
                    == Some(BROWSER_USER_AGENT)
            })
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>新闻</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(Some(Duration::from_secs(5))).unwrap();
        let markup = fetcher
            .fetch_page(&format!("{}/", server.uri()))
            .await
            .unwrap();
        assert_eq!(markup, "<html>新闻</html>");
    }

    #[tokio::test]
    async fn test_fetch_page_404_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(Some(Duration::from_secs(5))).unwrap();
        let err = fetcher
            .fetch_page(&format!("{}/", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status(StatusCode::NOT_FOUND)));
    }

    #[tokio::test]
    async fn test_fetch_page_server_error_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(None).unwrap();
        let err = fetcher.fetch_page(&server.uri()).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(s) if s == StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_fetch_page_timeout_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(Some(Duration::from_millis(100))).unwrap();
        let err = fetcher.fetch_page(&server.uri()).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(ref e) if e.is_timeout()));
    }

    #[tokio::test]
    async fn test_fetch_page_invalid_bytes_are_replaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![b'o', b'k', 0xff]))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(None).unwrap();
        let markup = fetcher.fetch_page(&server.uri()).await.unwrap();
        assert_eq!(markup, "ok\u{fffd}");
    }
}
