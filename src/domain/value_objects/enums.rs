//! # Domain Enums
//!
//! Enumeration types for fare search concepts.
//!
//! - [`CabinClass`] - Travel class requested from a source
//! - [`TrendDirection`] - Direction of the fitted price trend
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cabin class of a fare.
///
/// # Examples
///
/// ```
/// use fare_radar::domain::value_objects::enums::CabinClass;
///
/// let cabin: CabinClass = "premium-economy".parse().unwrap();
/// assert_eq!(cabin, CabinClass::PremiumEconomy);
/// assert_eq!(cabin.to_string(), "premium_economy");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CabinClass {
    /// Economy cabin.
    #[default]
    Economy = 0,
    /// Premium economy cabin.
    PremiumEconomy = 1,
    /// Business cabin.
    Business = 2,
    /// First cabin.
    First = 3,
}

impl CabinClass {
    /// All cabin classes, cheapest first.
    pub const ALL: [Self; 4] = [
        Self::Economy,
        Self::PremiumEconomy,
        Self::Business,
        Self::First,
    ];

    /// Returns the wire name of the cabin class.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::PremiumEconomy => "premium_economy",
            Self::Business => "business",
            Self::First => "first",
        }
    }

    /// Typical fare multiplier relative to economy.
    ///
    /// Used by synthetic sources to produce plausible cabin spreads.
    #[inline]
    #[must_use]
    pub const fn fare_multiplier(self) -> f64 {
        match self {
            Self::Economy => 1.0,
            Self::PremiumEconomy => 1.6,
            Self::Business => 3.2,
            Self::First => 5.5,
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CabinClass {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "economy" | "coach" => Ok(Self::Economy),
            "premium_economy" | "premiumeconomy" => Ok(Self::PremiumEconomy),
            "business" => Ok(Self::Business),
            "first" => Ok(Self::First),
            _ => Err(ParseEnumError::InvalidValue("CabinClass", s.to_string())),
        }
    }
}

/// Direction of a fitted price trend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Prices rise over the searched dates.
    Increasing,
    /// Prices fall over the searched dates.
    Decreasing,
    /// No measurable slope.
    #[default]
    Stable,
}

impl TrendDirection {
    /// Classifies a signed trend coefficient.
    ///
    /// # Examples
    ///
    /// ```
    /// use fare_radar::domain::value_objects::enums::TrendDirection;
    ///
    /// assert_eq!(TrendDirection::from_coefficient(0.2), TrendDirection::Increasing);
    /// assert_eq!(TrendDirection::from_coefficient(-0.01), TrendDirection::Decreasing);
    /// assert_eq!(TrendDirection::from_coefficient(0.0), TrendDirection::Stable);
    /// ```
    #[must_use]
    pub fn from_coefficient(coefficient: f64) -> Self {
        if coefficient > 0.0 {
            Self::Increasing
        } else if coefficient < 0.0 {
            Self::Decreasing
        } else {
            Self::Stable
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increasing => write!(f, "increasing"),
            Self::Decreasing => write!(f, "decreasing"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod cabin_class {
        use super::*;

        #[test]
        fn from_str_accepts_variants() {
            assert_eq!("ECONOMY".parse::<CabinClass>().unwrap(), CabinClass::Economy);
            assert_eq!(
                "premium economy".parse::<CabinClass>().unwrap(),
                CabinClass::PremiumEconomy
            );
            assert_eq!(
                "business".parse::<CabinClass>().unwrap(),
                CabinClass::Business
            );
            assert_eq!("First".parse::<CabinClass>().unwrap(), CabinClass::First);
        }

        #[test]
        fn from_str_invalid() {
            let err = "steerage".parse::<CabinClass>().unwrap_err();
            assert!(err.to_string().contains("CabinClass"));
        }

        #[test]
        fn multipliers_increase_with_class() {
            let multipliers: Vec<f64> = CabinClass::ALL
                .iter()
                .map(|c| c.fare_multiplier())
                .collect();
            assert!(multipliers.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn serde_uses_snake_case() {
            let json = serde_json::to_string(&CabinClass::PremiumEconomy).unwrap();
            assert_eq!(json, "\"premium_economy\"");
            let back: CabinClass = serde_json::from_str(&json).unwrap();
            assert_eq!(back, CabinClass::PremiumEconomy);
        }
    }

    mod trend_direction {
        use super::*;

        #[test]
        fn display_lowercase() {
            assert_eq!(TrendDirection::Increasing.to_string(), "increasing");
            assert_eq!(TrendDirection::Decreasing.to_string(), "decreasing");
            assert_eq!(TrendDirection::Stable.to_string(), "stable");
        }

        #[test]
        fn negative_zero_is_stable() {
            assert_eq!(TrendDirection::from_coefficient(-0.0), TrendDirection::Stable);
        }
    }
}
