//! # HTTP Client Utilities
//!
//! Shared HTTP client for HTTP-backed fare sources.
//!
//! Wraps `reqwest` with a fixed timeout and maps transport and status
//! failures onto [`SourceError`] so every HTTP connector reports failures
//! the same way.
//!
//! # Examples
//!
//! ```ignore
//! use fare_radar::infrastructure::sources::http_client::HttpClient;
//!
//! let client = HttpClient::new(5000)?;
//! let response: MyResponse = client.get_with_params(url, &[("date", "2024-12-01")]).await?;
//! ```

use crate::infrastructure::sources::error::{SourceError, SourceResult};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client wrapper for fare sources.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Internal` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> SourceResult<Self> {
        Self::with_headers(timeout_ms, HeaderMap::new())
    }

    /// Creates a new HTTP client sending `default_headers` on every request.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Internal` if the client cannot be created.
    pub fn with_headers(timeout_ms: u64, default_headers: HeaderMap) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .default_headers(default_headers)
            .build()
            .map_err(|e| SourceError::internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request with query parameters and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Timeout` or `SourceError::Connection` if the
    /// request fails, a status-specific error for non-2xx responses, and
    /// `SourceError::Protocol` if the body cannot be parsed.
    pub async fn get_with_params<T: DeserializeOwned, P: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
    ) -> SourceResult<T> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> SourceResult<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| SourceError::protocol(format!("failed to parse response: {e}")))
        } else {
            let retry_after_ms = retry_after_ms(response.headers());
            let error_body = response.text().await.unwrap_or_default();
            Err(map_status_error(status, &error_body, retry_after_ms))
        }
    }

    /// Maps a reqwest error to a SourceError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> SourceError {
        if error.is_timeout() {
            SourceError::timeout_with_duration("request timed out", self.timeout_ms)
        } else if error.is_connect() {
            SourceError::connection(format!("connection failed: {error}"))
        } else {
            SourceError::connection(format!("HTTP request failed: {error}"))
        }
    }
}

fn retry_after_ms(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs.saturating_mul(1000))
}

/// Maps an HTTP status code to a SourceError.
fn map_status_error(status: StatusCode, body: &str, retry_after_ms: Option<u64>) -> SourceError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            SourceError::invalid_request(format!("bad request: {body}"))
        }
        StatusCode::NOT_FOUND => SourceError::no_fares(format!("not found: {body}")),
        StatusCode::TOO_MANY_REQUESTS => match retry_after_ms {
            Some(ms) => SourceError::rate_limited_with_retry("rate limit exceeded", ms),
            None => SourceError::rate_limited("rate limit exceeded"),
        },
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            SourceError::timeout(format!("upstream timeout ({status})"))
        }
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE => {
            SourceError::connection(format!("server error ({status}): {body}"))
        }
        _ => SourceError::protocol(format!("HTTP error ({status}): {body}")),
    }
}
