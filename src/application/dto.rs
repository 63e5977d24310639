//! # Data Transfer Objects
//!
//! Request and response types of the search use cases.
//!
//! Requests carry raw airport codes so they can be deserialized straight
//! from user input; they are validated when the use case runs.

use crate::application::services::deal_ranking::RankedDeal;
use crate::application::services::fare_collection::ConnectorFailure;
use crate::domain::services::price_analysis::PriceStatistics;
use crate::domain::services::source_breakdown::SourceBreakdown;
use crate::domain::value_objects::{CabinClass, CollectionRunId, Passengers, Route, SourceId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Search over an explicit list of dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiDateSearchRequest {
    /// Origin IATA code.
    pub origin: String,
    /// Destination IATA code.
    pub destination: String,
    /// Departure dates.
    pub dates: Vec<NaiveDate>,
    /// Travelling party.
    #[serde(default)]
    pub passengers: Passengers,
    /// Cabin class.
    #[serde(default)]
    pub cabin_class: CabinClass,
    /// Sources to query; empty means every registered source.
    #[serde(default)]
    pub sources: Vec<SourceId>,
}

impl MultiDateSearchRequest {
    /// Creates a request for one adult in economy across all sources.
    #[must_use]
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        dates: Vec<NaiveDate>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            dates,
            passengers: Passengers::default(),
            cabin_class: CabinClass::default(),
            sources: Vec::new(),
        }
    }

    /// Restricts the search to `sources`.
    #[must_use]
    pub fn with_sources(mut self, sources: Vec<SourceId>) -> Self {
        self.sources = sources;
        self
    }

    /// Sets the travelling party.
    #[must_use]
    pub fn with_passengers(mut self, passengers: Passengers) -> Self {
        self.passengers = passengers;
        self
    }

    /// Sets the cabin class.
    #[must_use]
    pub fn with_cabin_class(mut self, cabin_class: CabinClass) -> Self {
        self.cabin_class = cabin_class;
        self
    }
}

/// Search over every day of a calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSearchRequest {
    /// Origin IATA code.
    pub origin: String,
    /// Destination IATA code.
    pub destination: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Travelling party.
    #[serde(default)]
    pub passengers: Passengers,
    /// Cabin class.
    #[serde(default)]
    pub cabin_class: CabinClass,
    /// Sources to query; empty means every registered source.
    #[serde(default)]
    pub sources: Vec<SourceId>,
}

impl MonthSearchRequest {
    /// Creates a request for one adult in economy across all sources.
    #[must_use]
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        year: i32,
        month: u32,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            year,
            month,
            passengers: Passengers::default(),
            cabin_class: CabinClass::default(),
            sources: Vec::new(),
        }
    }

    /// Restricts the search to `sources`.
    #[must_use]
    pub fn with_sources(mut self, sources: Vec<SourceId>) -> Self {
        self.sources = sources;
        self
    }

    /// Sets the travelling party.
    #[must_use]
    pub fn with_passengers(mut self, passengers: Passengers) -> Self {
        self.passengers = passengers;
        self
    }

    /// Sets the cabin class.
    #[must_use]
    pub fn with_cabin_class(mut self, cabin_class: CabinClass) -> Self {
        self.cabin_class = cabin_class;
        self
    }
}

/// Everything a search produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareReport {
    /// Collection run that produced the quotes.
    pub run_id: CollectionRunId,
    /// Route searched.
    pub route: Route,
    /// Cabin class searched.
    pub cabin_class: CabinClass,
    /// Travelling party.
    pub passengers: Passengers,
    /// Number of distinct dates requested.
    pub dates_searched: usize,
    /// Price statistics over the collected quotes.
    pub statistics: PriceStatistics,
    /// Advice, highest priority first.
    pub recommendations: Vec<String>,
    /// Best deals, best first.
    pub top_deals: Vec<RankedDeal>,
    /// Per-source summaries.
    pub sources: SourceBreakdown,
    /// Calls that produced no quotes.
    pub failures: Vec<ConnectorFailure>,
}

impl FareReport {
    /// Returns the best deal, if any.
    #[must_use]
    pub fn best_deal(&self) -> Option<&RankedDeal> {
        self.top_deals.first()
    }
}
