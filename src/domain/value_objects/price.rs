//! # Price Value Objects
//!
//! [`Price`] is a non-negative decimal fare amount and [`Currency`] its
//! ISO-4217 code. Prices keep decimal precision end to end; statistics
//! convert them to `f64` with [`Price::as_f64`].

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A non-negative fare amount.
///
/// # Examples
///
/// ```
/// use fare_radar::domain::value_objects::Price;
///
/// let price = Price::new(249.99).unwrap();
/// assert!((price.as_f64() - 249.99).abs() < 1e-9);
/// assert!(Price::new(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a price from an `f64`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the value is negative, NaN,
    /// infinite, or out of decimal range.
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::invalid_price("price must be finite"));
        }
        let decimal = Decimal::from_f64(value)
            .ok_or_else(|| DomainError::invalid_price(format!("{value} is out of range")))?;
        Self::from_decimal(decimal)
    }

    /// Creates a price from a decimal.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the value is negative.
    pub fn from_decimal(value: Decimal) -> DomainResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::invalid_price(format!(
                "price must not be negative, got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Returns the decimal amount.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Decimal {
        self.0
    }

    /// Returns the amount as `f64` for statistics.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Three-letter ISO-4217 currency code, stored upper case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Parses a currency code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCurrency` unless the code is exactly
    /// three ASCII letters.
    pub fn new(code: &str) -> DomainResult<Self> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::invalid_currency(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// US dollar.
    #[must_use]
    pub fn usd() -> Self {
        Self("USD".to_string())
    }

    /// Returns the code.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::usd()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod price {
        use super::*;

        #[test]
        fn zero_is_valid() {
            assert_eq!(Price::new(0.0).unwrap(), Price::ZERO);
        }

        #[test]
        fn rejects_negative() {
            assert!(matches!(
                Price::new(-0.01),
                Err(DomainError::InvalidPrice(_))
            ));
        }

        #[test]
        fn rejects_non_finite() {
            assert!(Price::new(f64::NAN).is_err());
            assert!(Price::new(f64::INFINITY).is_err());
        }

        #[test]
        fn orders_by_amount() {
            assert!(Price::new(99.0).unwrap() < Price::new(100.0).unwrap());
        }
    }

    mod currency {
        use super::*;

        #[test]
        fn normalises_case() {
            assert_eq!(Currency::new("eur").unwrap().as_str(), "EUR");
        }

        #[test]
        fn rejects_bad_codes() {
            assert!(Currency::new("EURO").is_err());
            assert!(Currency::new("E1R").is_err());
            assert!(Currency::new("").is_err());
        }

        #[test]
        fn serde_validates() {
            let ok: Currency = serde_json::from_str("\"gbp\"").unwrap();
            assert_eq!(ok.as_str(), "GBP");
            assert!(serde_json::from_str::<Currency>("\"pounds\"").is_err());
        }
    }
}
