//! # Domain Errors
//!
//! Error types for domain validation.
//!
//! These errors are raised when constructing value objects and entities
//! from untrusted input: prices, currencies, airport codes, passenger
//! counts and calendar ranges.
//!
//! # Examples
//!
//! ```
//! use fare_radar::domain::errors::DomainError;
//!
//! let err = DomainError::invalid_price("price must not be negative");
//! assert!(err.to_string().contains("negative"));
//! ```

use thiserror::Error;

/// Error type for domain validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Price is negative, not finite, or not representable.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// Currency code is not a three-letter ISO-4217 code.
    #[error("invalid currency: {0}")]
    InvalidCurrency(String),

    /// Airport code is not a three-letter IATA code.
    #[error("invalid airport code: {0}")]
    InvalidAirportCode(String),

    /// Route is not usable (e.g. origin equals destination).
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    /// Passenger counts are out of range.
    #[error("invalid passengers: {0}")]
    InvalidPassengers(String),

    /// Calendar date or date range is invalid.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

impl DomainError {
    /// Creates an invalid price error.
    #[must_use]
    pub fn invalid_price(message: impl Into<String>) -> Self {
        Self::InvalidPrice(message.into())
    }

    /// Creates an invalid currency error.
    #[must_use]
    pub fn invalid_currency(message: impl Into<String>) -> Self {
        Self::InvalidCurrency(message.into())
    }

    /// Creates an invalid airport code error.
    #[must_use]
    pub fn invalid_airport_code(message: impl Into<String>) -> Self {
        Self::InvalidAirportCode(message.into())
    }

    /// Creates an invalid route error.
    #[must_use]
    pub fn invalid_route(message: impl Into<String>) -> Self {
        Self::InvalidRoute(message.into())
    }

    /// Creates an invalid passengers error.
    #[must_use]
    pub fn invalid_passengers(message: impl Into<String>) -> Self {
        Self::InvalidPassengers(message.into())
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate(message.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_variant() {
        assert!(matches!(
            DomainError::invalid_price("x"),
            DomainError::InvalidPrice(_)
        ));
        assert!(matches!(
            DomainError::invalid_currency("x"),
            DomainError::InvalidCurrency(_)
        ));
        assert!(matches!(
            DomainError::invalid_airport_code("x"),
            DomainError::InvalidAirportCode(_)
        ));
        assert!(matches!(
            DomainError::invalid_route("x"),
            DomainError::InvalidRoute(_)
        ));
        assert!(matches!(
            DomainError::invalid_passengers("x"),
            DomainError::InvalidPassengers(_)
        ));
        assert!(matches!(
            DomainError::invalid_date("x"),
            DomainError::InvalidDate(_)
        ));
    }

    #[test]
    fn display_format() {
        let err = DomainError::invalid_airport_code("J1K");
        assert_eq!(err.to_string(), "invalid airport code: J1K");
    }
}
