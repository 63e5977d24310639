//! # Route Value Objects
//!
//! - [`AirportCode`]: three-letter IATA airport code
//! - [`Route`]: origin/destination pair
//! - [`Passengers`]: traveller counts for a search

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of seated travellers in one search.
pub const MAX_SEATED_PASSENGERS: u8 = 9;

/// Three-letter IATA airport code, stored upper case.
///
/// # Examples
///
/// ```
/// use fare_radar::domain::value_objects::AirportCode;
///
/// let lhr: AirportCode = "lhr".parse().unwrap();
/// assert_eq!(lhr.as_str(), "LHR");
/// assert!("LHRX".parse::<AirportCode>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirportCode(String);

impl AirportCode {
    /// Parses an airport code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAirportCode` unless the code is exactly
    /// three ASCII letters.
    pub fn new(code: &str) -> DomainResult<Self> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::invalid_airport_code(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Returns the code.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AirportCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AirportCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<AirportCode> for String {
    fn from(value: AirportCode) -> Self {
        value.0
    }
}

/// A one-way origin/destination pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    origin: AirportCode,
    destination: AirportCode,
}

impl Route {
    /// Creates a route.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRoute` if origin and destination are the
    /// same airport.
    pub fn new(origin: AirportCode, destination: AirportCode) -> DomainResult<Self> {
        if origin == destination {
            return Err(DomainError::invalid_route(format!(
                "origin and destination are both {origin}"
            )));
        }
        Ok(Self {
            origin,
            destination,
        })
    }

    /// Parses a route from two airport code strings.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAirportCode` for a malformed code or
    /// `DomainError::InvalidRoute` if both codes are equal.
    pub fn parse(origin: &str, destination: &str) -> DomainResult<Self> {
        Self::new(AirportCode::new(origin)?, AirportCode::new(destination)?)
    }

    /// Returns the origin airport.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &AirportCode {
        &self.origin
    }

    /// Returns the destination airport.
    #[inline]
    #[must_use]
    pub fn destination(&self) -> &AirportCode {
        &self.destination
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.origin, self.destination)
    }
}

/// Traveller counts for a fare search.
///
/// # Invariants
///
/// - At least one adult
/// - Adults plus children at most [`MAX_SEATED_PASSENGERS`]
/// - No more infants than adults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPassengers")]
pub struct Passengers {
    adults: u8,
    children: u8,
    infants: u8,
}

#[derive(Deserialize)]
struct RawPassengers {
    adults: u8,
    #[serde(default)]
    children: u8,
    #[serde(default)]
    infants: u8,
}

impl TryFrom<RawPassengers> for Passengers {
    type Error = DomainError;

    fn try_from(raw: RawPassengers) -> Result<Self, Self::Error> {
        Self::new(raw.adults, raw.children, raw.infants)
    }
}

impl Passengers {
    /// Creates validated passenger counts.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPassengers` if any invariant is violated.
    pub fn new(adults: u8, children: u8, infants: u8) -> DomainResult<Self> {
        if adults == 0 {
            return Err(DomainError::invalid_passengers(
                "at least one adult is required",
            ));
        }
        if u16::from(adults) + u16::from(children) > u16::from(MAX_SEATED_PASSENGERS) {
            return Err(DomainError::invalid_passengers(format!(
                "at most {MAX_SEATED_PASSENGERS} seated passengers"
            )));
        }
        if infants > adults {
            return Err(DomainError::invalid_passengers(
                "each infant must travel with an adult",
            ));
        }
        Ok(Self {
            adults,
            children,
            infants,
        })
    }

    /// Creates counts for adults only.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPassengers` if `adults` is zero or too large.
    pub fn adults(adults: u8) -> DomainResult<Self> {
        Self::new(adults, 0, 0)
    }

    /// Returns the number of adults.
    #[inline]
    #[must_use]
    pub fn adult_count(&self) -> u8 {
        self.adults
    }

    /// Returns the number of children.
    #[inline]
    #[must_use]
    pub fn child_count(&self) -> u8 {
        self.children
    }

    /// Returns the number of lap infants.
    #[inline]
    #[must_use]
    pub fn infant_count(&self) -> u8 {
        self.infants
    }

    /// Returns the total number of travellers.
    #[inline]
    #[must_use]
    pub fn total(&self) -> u8 {
        self.adults
            .saturating_add(self.children)
            .saturating_add(self.infants)
    }
}

impl Default for Passengers {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants: 0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod airport_code {
        use super::*;

        #[test]
        fn uppercases() {
            assert_eq!(AirportCode::new(" jfk ").unwrap().as_str(), "JFK");
        }

        #[test]
        fn rejects_digits_and_length() {
            assert!(AirportCode::new("J1K").is_err());
            assert!(AirportCode::new("JF").is_err());
        }
    }

    mod route {
        use super::*;

        #[test]
        fn display() {
            let route = Route::parse("lhr", "jfk").unwrap();
            assert_eq!(route.to_string(), "LHR-JFK");
        }

        #[test]
        fn rejects_same_airport() {
            assert!(matches!(
                Route::parse("LHR", "lhr"),
                Err(DomainError::InvalidRoute(_))
            ));
        }
    }

    mod passengers {
        use super::*;

        #[test]
        fn requires_adult() {
            assert!(Passengers::new(0, 2, 0).is_err());
        }

        #[test]
        fn limits_seats() {
            assert!(Passengers::new(5, 4, 0).is_ok());
            assert!(Passengers::new(5, 5, 0).is_err());
        }

        #[test]
        fn infants_need_adults() {
            assert!(Passengers::new(1, 0, 2).is_err());
            assert_eq!(Passengers::new(2, 1, 2).unwrap().total(), 5);
        }

        #[test]
        fn deserialize_validates() {
            let ok: Passengers = serde_json::from_str(r#"{"adults":2}"#).unwrap();
            assert_eq!(ok.adult_count(), 2);
            assert!(serde_json::from_str::<Passengers>(r#"{"adults":0}"#).is_err());
        }
    }
}
