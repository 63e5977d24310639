//! # Synthetic Fare Source
//!
//! Deterministic generator of plausible fares.
//!
//! The generator is seeded from `(source, route, date, cabin)`, so the same
//! query always yields the same quotes. It is used for demos and local
//! runs where no upstream is configured, and as a last-resort strategy in
//! a [`FallbackSource`](super::fallback::FallbackSource).
//!
//! Fares follow a simple model:
//!
//! ```text
//! price = base_fare * cabin multiplier * weekend multiplier * party size * jitter
//! ```
//!
//! with 1 to 3 flights per date and a jitter in `[0.85, 1.25)`.

use crate::domain::entities::quote::Quote;
use crate::domain::value_objects::calendar::is_weekend;
use crate::domain::value_objects::{Currency, Passengers, Price, SourceId};
use crate::infrastructure::sources::error::{SourceError, SourceResult};
use crate::infrastructure::sources::traits::{
    DEFAULT_SOURCE_TIMEOUT_MS, FareQuery, SourceConnector,
};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hash::{DefaultHasher, Hash, Hasher};

/// Weekend departures are this much dearer in the generated data.
pub const WEEKEND_MULTIPLIER: f64 = 1.15;

/// Infants on lap pay this share of an adult fare.
const INFANT_SHARE: f64 = 0.1;

const CARRIERS: [&str; 8] = ["BA", "AA", "VS", "DL", "UA", "LH", "AF", "KL"];

/// Connector producing deterministic pseudo-random fares.
#[derive(Debug, Clone)]
pub struct SyntheticFareSource {
    source_id: SourceId,
    base_fare: f64,
    currency: Currency,
    timeout_ms: u64,
}

impl SyntheticFareSource {
    /// Creates a generator around `base_fare` (one adult, economy, weekday).
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidRequest` if `base_fare` is not a
    /// positive finite number.
    pub fn new(source_id: SourceId, base_fare: f64, currency: Currency) -> SourceResult<Self> {
        if !base_fare.is_finite() || base_fare <= 0.0 {
            return Err(SourceError::invalid_request(format!(
                "base fare must be positive, got {base_fare}"
            )));
        }
        Ok(Self {
            source_id,
            base_fare,
            currency,
            timeout_ms: DEFAULT_SOURCE_TIMEOUT_MS,
        })
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Returns the base fare.
    #[inline]
    #[must_use]
    pub fn base_fare(&self) -> f64 {
        self.base_fare
    }

    fn seed(&self, query: &FareQuery) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.source_id.hash(&mut hasher);
        query.route().hash(&mut hasher);
        query.date().hash(&mut hasher);
        query.cabin_class().hash(&mut hasher);
        hasher.finish()
    }
}

fn party_factor(passengers: Passengers) -> f64 {
    f64::from(passengers.adult_count())
        + f64::from(passengers.child_count())
        + f64::from(passengers.infant_count()) * INFANT_SHARE
}

#[async_trait]
impl SourceConnector for SyntheticFareSource {
    fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    async fn search(&self, query: &FareQuery) -> SourceResult<Vec<Quote>> {
        let mut rng = StdRng::seed_from_u64(self.seed(query));

        let weekend = if is_weekend(query.date()) {
            WEEKEND_MULTIPLIER
        } else {
            1.0
        };
        let fare = self.base_fare
            * query.cabin_class().fare_multiplier()
            * weekend
            * party_factor(query.passengers());

        let flights: usize = rng.random_range(1..=3);
        let mut quotes = Vec::with_capacity(flights);
        for _ in 0..flights {
            let jitter: f64 = rng.random_range(0.85..1.25);
            let amount = (fare * jitter * 100.0).round() / 100.0;
            let price =
                Price::new(amount).map_err(|e| SourceError::internal(e.to_string()))?;
            let carrier = CARRIERS
                .get(rng.random_range(0..CARRIERS.len()))
                .copied()
                .unwrap_or("XX");
            let number: u16 = rng.random_range(100..1000);

            quotes.push(
                Quote::new(
                    query.date(),
                    self.source_id.clone(),
                    query.cabin_class(),
                    price,
                    self.currency.clone(),
                )
                .with_label(format!("{carrier} {number}")),
            );
        }

        tracing::debug!(
            source = %self.source_id,
            date = %query.date(),
            quotes = quotes.len(),
            "generated synthetic fares"
        );
        Ok(quotes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{CabinClass, Route};
    use chrono::NaiveDate;

    fn query(day: u32, cabin: CabinClass) -> FareQuery {
        FareQuery::new(
            Route::parse("LHR", "JFK").unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, day).unwrap(),
            Passengers::default(),
            cabin,
        )
    }

    fn source(id: &str) -> SyntheticFareSource {
        SyntheticFareSource::new(SourceId::new(id), 200.0, Currency::usd()).unwrap()
    }

    #[test]
    fn rejects_non_positive_base_fare() {
        assert!(SyntheticFareSource::new(SourceId::new("s"), 0.0, Currency::usd()).is_err());
        assert!(SyntheticFareSource::new(SourceId::new("s"), f64::NAN, Currency::usd()).is_err());
    }

    #[tokio::test]
    async fn deterministic_for_same_query() {
        let s = source("demo");
        let a = s.search(&query(2, CabinClass::Economy)).await.unwrap();
        let b = s.search(&query(2, CabinClass::Economy)).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn quotes_are_attributed_and_bounded() {
        let s = source("demo");
        let quotes = s.search(&query(2, CabinClass::Economy)).await.unwrap();
        assert!((1..=3).contains(&quotes.len()));
        for q in &quotes {
            assert_eq!(q.source().as_str(), "demo");
            assert_eq!(q.date(), NaiveDate::from_ymd_opt(2024, 12, 2).unwrap());
            let p = q.price().as_f64();
            assert!((170.0..=250.0).contains(&p), "price {p} out of range");
            assert!(q.flight_label().is_some());
        }
    }

    #[tokio::test]
    async fn cabin_multiplier_applies() {
        let s = source("demo");
        let economy = s.search(&query(3, CabinClass::Economy)).await.unwrap();
        let first = s.search(&query(3, CabinClass::First)).await.unwrap();
        let cheapest_first = first.iter().map(|q| q.price()).min().unwrap();
        let dearest_economy = economy.iter().map(|q| q.price()).max().unwrap();
        assert!(cheapest_first > dearest_economy);
    }

    #[tokio::test]
    async fn party_size_scales_fares() {
        let s = source("demo");
        let mut family = query(4, CabinClass::Economy);
        family = FareQuery::new(
            family.route().clone(),
            family.date(),
            Passengers::new(2, 2, 0).unwrap(),
            family.cabin_class(),
        );
        let quotes = s.search(&family).await.unwrap();
        assert!(quotes.iter().all(|q| q.price().as_f64() >= 4.0 * 170.0));
    }

    #[test]
    fn party_factor_counts_infants_partially() {
        let factor = party_factor(Passengers::new(2, 1, 1).unwrap());
        assert!((factor - 3.1).abs() < 1e-9);
    }
}
