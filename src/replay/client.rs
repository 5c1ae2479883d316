//! GraphQL mutation client
//!
//! Marks a single item watched through the `MovieSetWatched` mutation. The
//! endpoint expects the same auxiliary headers the site's own frontend sends.

use crate::config::SourceConfig;
use crate::{KinoportError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, ORIGIN, REFERER};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

const OPERATION_NAME: &str = "MovieSetWatched";

const SET_WATCHED_QUERY: &str = "mutation MovieSetWatched($movieId: Long!) { movie { watched { set(input: {movieId: $movieId}) { error { message __typename } status __typename } __typename } __typename } } ";

/// Status reported by a successful mutation
const SUCCESS_STATUS: &str = "SUCCESS";

/// Marks items watched on the remote side
#[async_trait]
pub trait MutationClient: Send + Sync {
    /// Marks item `id` watched
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The remote side reported success
    /// * `Ok(false)` - The call went through but was not accepted
    /// * `Err(KinoportError)` - The call or its response failed
    async fn set_watched(&self, id: u64) -> Result<bool>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SetWatchedRequest<'a> {
    operation_name: &'a str,
    variables: SetWatchedVariables,
    query: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SetWatchedVariables {
    movie_id: u64,
}

#[derive(Debug, Deserialize)]
struct SetWatchedResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    movie: Option<MovieData>,
}

#[derive(Debug, Deserialize)]
struct MovieData {
    watched: Option<WatchedData>,
}

#[derive(Debug, Deserialize)]
struct WatchedData {
    set: Option<SetResult>,
}

#[derive(Debug, Deserialize)]
struct SetResult {
    status: Option<String>,
    error: Option<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: Option<String>,
}

impl SetWatchedResponse {
    fn set_result(&self) -> Option<&SetResult> {
        self.data.as_ref()?.movie.as_ref()?.watched.as_ref()?.set.as_ref()
    }
}

/// Mutation client posting to the site's GraphQL endpoint
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    client: Client,
    endpoint: Url,
    headers: HeaderMap,
}

impl GraphqlClient {
    /// Creates a client for the endpoint and site named in `source`
    ///
    /// `client` should come from `build_http_client` so it carries the
    /// session cookie.
    pub fn new(client: Client, source: &SourceConfig) -> Result<Self> {
        let endpoint = Url::parse(&source.graphql_url)?;
        let site = Url::parse(&source.base_url)?;
        let origin = site.origin().ascii_serialization();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ORIGIN, header_value("Origin", &origin)?);
        headers.insert(REFERER, header_value("Referer", &format!("{}/", origin))?);
        headers.insert(
            HeaderName::from_static("service-id"),
            HeaderValue::from_static("25"),
        );
        headers.insert(
            HeaderName::from_static("source-id"),
            HeaderValue::from_static("1"),
        );

        Ok(Self {
            client,
            endpoint,
            headers,
        })
    }
}

fn header_value(header: &'static str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| KinoportError::InvalidHeader { header })
}

#[async_trait]
impl MutationClient for GraphqlClient {
    async fn set_watched(&self, id: u64) -> Result<bool> {
        let request = SetWatchedRequest {
            operation_name: OPERATION_NAME,
            variables: SetWatchedVariables { movie_id: id },
            query: SET_WATCHED_QUERY,
        };

        let url = self.endpoint.to_string();
        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(self.headers.clone())
            .json(&request)
            .send()
            .await
            .map_err(|source| KinoportError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| KinoportError::Http {
                url: url.clone(),
                source,
            })?;

        tracing::debug!("POST {} (item {}) -> {}", url, id, status);

        let parsed: SetWatchedResponse =
            serde_json::from_str(&body).map_err(|e| KinoportError::MalformedResponse {
                url: url.clone(),
                message: e.to_string(),
            })?;

        for error in &parsed.errors {
            tracing::warn!(
                "GraphQL error for item {}: {}",
                id,
                error.message.as_deref().unwrap_or("unknown")
            );
        }

        let Some(result) = parsed.set_result() else {
            return Ok(false);
        };

        if let Some(message) = result.error.as_ref().and_then(|e| e.message.as_deref()) {
            tracing::warn!("Item {} rejected: {}", id, message);
        }

        Ok(result.status.as_deref() == Some(SUCCESS_STATUS))
    }
}
