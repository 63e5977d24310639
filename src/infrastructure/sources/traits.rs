//! # Source Connector Trait
//!
//! Port definition for fare source integrations.
//!
//! Every upstream (an HTTP API, a scraper, a generator) is wrapped in a
//! [`SourceConnector`]. The orchestrator only ever calls
//! [`SourceConnector::search`] for one date at a time and treats any
//! error as "no quotes from this source for this date".
//!
//! # Examples
//!
//! ```ignore
//! use fare_radar::infrastructure::sources::traits::{FareQuery, SourceConnector};
//! use fare_radar::infrastructure::sources::error::SourceResult;
//!
//! struct MyConnector { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl SourceConnector for MyConnector {
//!     // ... implement required methods
//! }
//! ```

use crate::domain::entities::quote::Quote;
use crate::domain::value_objects::{CabinClass, Passengers, Route, SourceId};
use crate::infrastructure::sources::error::SourceResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default per-call timeout for connectors in milliseconds.
pub const DEFAULT_SOURCE_TIMEOUT_MS: u64 = 5000;

/// One connector call: a route, a single departure date, a party and a cabin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FareQuery {
    route: Route,
    date: NaiveDate,
    passengers: Passengers,
    cabin_class: CabinClass,
}

impl FareQuery {
    /// Creates a new query.
    #[must_use]
    pub fn new(
        route: Route,
        date: NaiveDate,
        passengers: Passengers,
        cabin_class: CabinClass,
    ) -> Self {
        Self {
            route,
            date,
            passengers,
            cabin_class,
        }
    }

    /// Returns the route.
    #[inline]
    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Returns the departure date.
    #[inline]
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the travelling party.
    #[inline]
    #[must_use]
    pub fn passengers(&self) -> Passengers {
        self.passengers
    }

    /// Returns the cabin class.
    #[inline]
    #[must_use]
    pub fn cabin_class(&self) -> CabinClass {
        self.cabin_class
    }
}

impl fmt::Display for FareQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {} ({})", self.route, self.date, self.cabin_class)
    }
}

/// A source of fare quotes.
///
/// Implementations must be cheap to share across tasks; the orchestrator
/// holds them as `Arc<dyn SourceConnector>`.
#[async_trait]
pub trait SourceConnector: Send + Sync + fmt::Debug {
    /// Returns the id quotes from this connector are attributed to.
    fn source_id(&self) -> &SourceId;

    /// Returns the per-call timeout in milliseconds.
    fn timeout_ms(&self) -> u64 {
        DEFAULT_SOURCE_TIMEOUT_MS
    }

    /// Searches fares for one date.
    ///
    /// May return several quotes (different flights) for the same date.
    ///
    /// # Errors
    ///
    /// Returns a `SourceError` describing why no quotes are available.
    async fn search(&self, query: &FareQuery) -> SourceResult<Vec<Quote>>;
}

/// Lookup of connectors by source id.
#[async_trait]
pub trait SourceRegistry: Send + Sync + fmt::Debug {
    /// Returns the connector registered under `id`.
    async fn get(&self, id: &SourceId) -> Option<Arc<dyn SourceConnector>>;

    /// Returns every registered source id, sorted.
    async fn source_ids(&self) -> Vec<SourceId>;
}
