//! # Source Errors
//!
//! Error types for fare source operations.
//!
//! A [`SourceError`] describes why one connector call produced no quotes.
//! The collection orchestrator records it in the failure log and moves on;
//! it never aborts a collection run.
//!
//! # Examples
//!
//! ```
//! use fare_radar::infrastructure::sources::error::SourceError;
//!
//! let error = SourceError::timeout("no response after 5000ms");
//! assert!(error.is_retryable());
//!
//! let error = SourceError::no_fares("route not served");
//! assert!(!error.is_retryable());
//! ```

use thiserror::Error;

/// Error type for fare source operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Request timed out.
    #[error("source timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error.
    #[error("source connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Upstream refused the request because of rate limiting.
    #[error("source rate limit exceeded: {message}")]
    RateLimited {
        /// Error message.
        message: String,
        /// Retry after duration in milliseconds.
        retry_after_ms: Option<u64>,
    },

    /// The query cannot be served by this source.
    #[error("source invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// The source answered but had no fares for the query.
    #[error("source returned no fares: {message}")]
    NoFares {
        /// Error message.
        message: String,
    },

    /// Response could not be understood.
    #[error("source protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },

    /// Internal source error.
    #[error("source internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl SourceError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after_ms: None,
        }
    }

    /// Creates a rate limited error with retry duration.
    #[must_use]
    pub fn rate_limited_with_retry(message: impl Into<String>, retry_after_ms: u64) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after_ms: Some(retry_after_ms),
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a no-fares error.
    #[must_use]
    pub fn no_fares(message: impl Into<String>) -> Self {
        Self::NoFares {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if retrying the same call might succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Connection { .. } | Self::RateLimited { .. }
        )
    }

    /// Returns true if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns true if the source had nothing for the query.
    #[inline]
    #[must_use]
    pub fn is_no_fares(&self) -> bool {
        matches!(self, Self::NoFares { .. })
    }

    /// Returns the retry-after hint in milliseconds, if any.
    #[must_use]
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_ms, .. } => *retry_after_ms,
            _ => None,
        }
    }
}

/// Result type for fare source operations.
pub type SourceResult<T> = Result<T, SourceError>;
