use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::api::types::{Article, RefreshRequest, Source};
use crate::feed::FeedQuery;

/// Errors from talking to the NewsBrief server.
///
/// Nothing here retries; every failure is reported once and the user
/// re-triggers the action manually.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(reqwest::Error),
    /// Request exceeded the client timeout
    #[error("Request timed out")]
    Timeout,
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Response body was not the JSON we expected
    #[error("Malformed response: {0}")]
    Decode(reqwest::Error),
    /// The configured server URL cannot be used as a base
    #[error("Invalid server URL: {0}")]
    InvalidBaseUrl(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode(e)
        } else {
            Self::Network(e)
        }
    }
}

/// Typed client for the server's three endpoints.
///
/// Cloning shares the underlying connection pool, so each spawned task takes
/// its own copy.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Build a client for the given server base URL.
    ///
    /// The URL must be absolute and end in a host, not a file segment —
    /// `http://host:8000` and `http://host:8000/` are both fine.
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base = Url::parse(server_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", server_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(server_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(2)
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self { http, base })
    }

    /// `GET /api/sources` — the configured content sources.
    pub async fn list_sources(&self) -> Result<Vec<Source>, ApiError> {
        let url = self.endpoint("api/sources")?;
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    /// `GET /api/articles` with the composed query parameters.
    ///
    /// An empty array means no matches, not an error.
    pub async fn fetch_articles(&self, query: &FeedQuery) -> Result<Vec<Article>, ApiError> {
        let url = self.endpoint("api/articles")?;
        let response = self.http.get(url).query(&query.to_pairs()).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    /// `POST /api/refresh` — ask the server to ingest up to
    /// `limit_per_source` items for each of the given sources.
    ///
    /// Only the HTTP status is checked; the response body is ignored.
    pub async fn trigger_refresh(
        &self,
        sources: &[String],
        limit_per_source: u32,
    ) -> Result<(), ApiError> {
        let url = self.endpoint("api/refresh")?;
        let body = RefreshRequest {
            sources: if sources.is_empty() {
                None
            } else {
                Some(sources.to_vec())
            },
            limit_per_source,
        };
        let response = self.http.post(url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", self.base, e)))
    }
}
