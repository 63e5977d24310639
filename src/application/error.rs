//! # Application Errors
//!
//! Error types for the application layer.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)           - invalid route, date, price...
//! ├── Collection(CollectionError)   - invalid request or no data
//! ├── Analysis(AnalysisError)       - empty quote set
//! ├── Source(SourceError)           - connector construction failures
//! ├── Validation(String)            - request validation failures
//! └── Configuration(String)         - unusable configuration
//! ```
//!
//! # Examples
//!
//! ```
//! use fare_radar::application::error::ApplicationError;
//!
//! let err = ApplicationError::validation("month must be 1-12");
//! assert!(err.is_validation());
//!
//! let err = ApplicationError::configuration("max_concurrency must be positive");
//! assert_eq!(err.to_string(), "configuration error: max_concurrency must be positive");
//! ```

use crate::application::services::fare_collection::CollectionError;
use crate::domain::errors::DomainError;
use crate::domain::services::price_analysis::AnalysisError;
use crate::infrastructure::sources::error::SourceError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain validation error.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Fare collection failed.
    #[error("collection error: {0}")]
    Collection(#[from] CollectionError),

    /// Analysis failed.
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Source error outside a collection run.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if this is a validation error, including domain
    /// validation and invalid collection requests.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Domain(_) | Self::Collection(CollectionError::InvalidRequest(_))
        )
    }

    /// Returns true if no source produced any quote.
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::Collection(CollectionError::NoData { .. }))
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
