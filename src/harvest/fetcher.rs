//! HTTP fetcher implementation
//!
//! This module handles the HTTP side of harvesting:
//! - Building the HTTP client with the browser identity and session cookie
//! - GET requests for listing pages
//!
//! Status codes are only logged. Whether a page is usable is decided by the
//! extractors, so an error page simply parses to nothing and is retried.

use crate::{KinoportError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Source of raw listing page bodies
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the body of the page at `url`
    async fn fetch_page(&self, url: &Url) -> Result<String>;
}

/// Builds an HTTP client carrying the user agent and session cookie
///
/// The cookie is attached to every request as an opaque header and marked
/// sensitive so it never shows up in debug output. An empty cookie is left
/// out.
///
/// # Example
///
/// ```no_run
/// use kinoport::harvest::build_http_client;
///
/// let client = build_http_client("Mozilla/5.0", "session=abc").unwrap();
/// ```
pub fn build_http_client(user_agent: &str, cookie: &str) -> Result<Client> {
    let mut headers = HeaderMap::new();

    if !cookie.is_empty() {
        let mut value = HeaderValue::from_str(cookie)
            .map_err(|_| KinoportError::InvalidHeader { header: "Cookie" })?;
        value.set_sensitive(true);
        headers.insert(COOKIE, value);
    }

    let client = Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Page source backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| KinoportError::Http {
                url: url.to_string(),
                source,
            })?;

        tracing::debug!("GET {} -> {}", url, response.status());

        response.text().await.map_err(|source| KinoportError::Http {
            url: url.to_string(),
            source,
        })
    }
}
