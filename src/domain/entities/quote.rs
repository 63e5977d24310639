//! # Quote Entity
//!
//! Represents a single fare observation from a source.
//!
//! A [`Quote`] is the atomic fact the analysis engine consumes: one price
//! for one (date, source, cabin class) combination. Quotes are immutable
//! once produced; several quotes may share a date (different sources or
//! flights) or a source (different dates).
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use fare_radar::domain::entities::quote::Quote;
//! use fare_radar::domain::value_objects::{CabinClass, Currency, Price, SourceId};
//!
//! let quote = Quote::new(
//!     NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
//!     SourceId::new("amadeus"),
//!     CabinClass::Economy,
//!     Price::new(189.0).unwrap(),
//!     Currency::usd(),
//! )
//! .with_label("BA 117");
//!
//! assert_eq!(quote.flight_label(), Some("BA 117"));
//! ```

use crate::domain::value_objects::{CabinClass, Currency, Price, SourceId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fare quote for one date from one source.
///
/// # Invariants
///
/// - Price is non-negative (enforced by [`Price`])
/// - Currency is a valid ISO-4217 code (enforced by [`Currency`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Departure date.
    date: NaiveDate,
    /// Source that produced the quote.
    source: SourceId,
    /// Cabin class quoted.
    cabin_class: CabinClass,
    /// Total fare.
    price: Price,
    /// Currency of the fare.
    currency: Currency,
    /// Optional carrier/flight description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flight_label: Option<String>,
}

impl Quote {
    /// Creates a quote.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        source: SourceId,
        cabin_class: CabinClass,
        price: Price,
        currency: Currency,
    ) -> Self {
        Self {
            date,
            source,
            cabin_class,
            price,
            currency,
            flight_label: None,
        }
    }

    /// Attaches a carrier/flight description.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.flight_label = Some(label.into());
        self
    }

    /// Returns a copy attributed to another source.
    #[must_use]
    pub fn with_source(&self, source: SourceId) -> Self {
        Self {
            source,
            ..self.clone()
        }
    }

    /// Returns the departure date.
    #[inline]
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the source id.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &SourceId {
        &self.source
    }

    /// Returns the cabin class.
    #[inline]
    #[must_use]
    pub fn cabin_class(&self) -> CabinClass {
        self.cabin_class
    }

    /// Returns the price.
    #[inline]
    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Returns the currency.
    #[inline]
    #[must_use]
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Returns the flight label, if any.
    #[inline]
    #[must_use]
    pub fn flight_label(&self) -> Option<&str> {
        self.flight_label.as_deref()
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quote({} {} {} {} via {})",
            self.date, self.price, self.currency, self.cabin_class, self.source
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Quote {
        Quote::new(
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            SourceId::new("kayak"),
            CabinClass::Business,
            Price::new(1200.0).unwrap(),
            Currency::new("EUR").unwrap(),
        )
    }

    #[test]
    fn accessors() {
        let quote = sample();
        assert_eq!(quote.source().as_str(), "kayak");
        assert_eq!(quote.cabin_class(), CabinClass::Business);
        assert_eq!(quote.currency().as_str(), "EUR");
        assert!(quote.flight_label().is_none());
    }

    #[test]
    fn with_source_keeps_fare() {
        let quote = sample().with_label("LH 400");
        let moved = quote.with_source(SourceId::new("google"));
        assert_eq!(moved.source().as_str(), "google");
        assert_eq!(moved.price(), quote.price());
        assert_eq!(moved.flight_label(), Some("LH 400"));
    }

    #[test]
    fn display_mentions_source_and_date() {
        let display = sample().to_string();
        assert!(display.contains("kayak"));
        assert!(display.contains("2024-12-01"));
    }

    #[test]
    fn serde_roundtrip_omits_missing_label() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(!json.contains("flight_label"));
        let back: Quote = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
