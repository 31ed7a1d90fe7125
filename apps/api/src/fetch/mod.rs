//! Outbound HTTP client shared by every platform adapter.
//!
//! One `reqwest::Client` is built at startup and cloned into handlers via
//! `AppState`. All requests carry a desktop-browser default header set
//! (callers can layer their own on top), follow redirects, and run under an
//! explicit per-call timeout. Transport failures are classified into
//! `FetchError` so adapters can decide what propagates (user-not-found) and
//! what degrades into a default record (everything else).

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Transport-level failure taxonomy. Adapters translate `NotFound` into a
/// 404 for the caller; every other variant is swallowed into the platform's
/// default record.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Resource not found")]
    NotFound,

    #[error("Too many requests. Please try again later.")]
    RateLimited,

    #[error("Access denied.")]
    Forbidden,

    #[error("Request failed with status code {0}")]
    Upstream(u16),

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

fn classify_status(status: StatusCode) -> Option<FetchError> {
    match status {
        StatusCode::NOT_FOUND => Some(FetchError::NotFound),
        StatusCode::TOO_MANY_REQUESTS => Some(FetchError::RateLimited),
        StatusCode::FORBIDDEN => Some(FetchError::Forbidden),
        s if !s.is_success() => Some(FetchError::Upstream(s.as_u16())),
        _ => None,
    }
}

/// Shared outbound HTTP client with the default browser-like header set.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DESKTOP_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(HTML_ACCEPT));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers
    }

    /// GET a URL and return the raw body text. Caller headers are merged
    /// over the defaults.
    pub async fn get_text(
        &self,
        url: &str,
        extra_headers: Option<HeaderMap>,
        timeout: Duration,
    ) -> Result<String, FetchError> {
        let mut headers = Self::default_headers();
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        debug!(url, "Fetching URL");
        let response = self
            .client
            .get(url)
            .headers(headers)
            .timeout(timeout)
            .send()
            .await?;

        if let Some(err) = classify_status(response.status()) {
            return Err(err);
        }

        Ok(response.text().await?)
    }

    /// POST a GraphQL-style JSON payload and decode the JSON response body.
    /// The same status-code mapping as `get_text` applies.
    pub async fn post_graphql<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<T, FetchError> {
        let mut headers = Self::default_headers();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        debug!(url, "Posting GraphQL query");
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(body)
            .timeout(timeout)
            .send()
            .await?;

        if let Some(err) = classify_status(response.status()) {
            return Err(err);
        }

        Ok(response.json::<T>().await?)
    }
}
