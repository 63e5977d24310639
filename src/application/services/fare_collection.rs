//! # Fare Collection Orchestrator
//!
//! Fans a search out over every (date, source) pair and gathers the quotes.
//!
//! # Behaviour
//!
//! - Every pair is an independent connector call running in its own task.
//! - A [`Semaphore`] bounds the number of calls in flight.
//! - Each call is limited by its connector's [`timeout_ms`](SourceConnector::timeout_ms).
//! - Errors, timeouts, empty answers, unregistered sources and panicking
//!   tasks go to the failure log; none of them abort the run.
//! - The run succeeds if at least one call produced a quote, otherwise it
//!   fails with [`CollectionError::NoData`].
//!
//! Quotes and failures are reported in request order: dates as given, and
//! within a date, sources as given. Quotes are not deduplicated.
//!
//! ```text
//!            ┌─► (d1, s1) ─┐
//! request ───┼─► (d1, s2) ─┼──► quotes + failure log
//!            └─► (d2, s1) ─┘
//! ```

use crate::domain::entities::quote::Quote;
use crate::domain::value_objects::{
    AirportCode, CabinClass, CollectionRunId, Passengers, Route, SourceId,
};
use crate::infrastructure::sources::error::SourceError;
use crate::infrastructure::sources::traits::{FareQuery, SourceConnector, SourceRegistry};
use chrono::NaiveDate;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::time::timeout;

/// Default number of connector calls in flight.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Default timeout for connectors that report a zero timeout.
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 5000;

/// Configuration for fare collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Maximum connector calls in flight.
    pub max_concurrency: usize,
    /// Timeout for connectors reporting `timeout_ms() == 0`.
    pub default_timeout_ms: u64,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            default_timeout_ms: DEFAULT_CALL_TIMEOUT_MS,
        }
    }
}

impl CollectionConfig {
    /// Sets the concurrency bound.
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Sets the fallback call timeout.
    #[must_use]
    pub fn with_default_timeout(mut self, timeout_ms: u64) -> Self {
        self.default_timeout_ms = timeout_ms;
        self
    }
}

/// A search over several dates and sources for one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRequest {
    /// Route searched.
    pub route: Route,
    /// Departure dates, in the order results should be reported.
    pub dates: Vec<NaiveDate>,
    /// Travelling party.
    pub passengers: Passengers,
    /// Cabin class.
    pub cabin_class: CabinClass,
    /// Source ids, in the order results should be reported.
    pub sources: Vec<SourceId>,
}

impl CollectionRequest {
    /// Creates a request for one adult in economy.
    #[must_use]
    pub fn new(route: Route, dates: Vec<NaiveDate>, sources: Vec<SourceId>) -> Self {
        Self {
            route,
            dates,
            passengers: Passengers::default(),
            cabin_class: CabinClass::default(),
            sources,
        }
    }

    /// Creates a request from raw airport codes.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidRequest` if either code is not a
    /// valid IATA code or origin equals destination.
    pub fn parse(
        origin: &str,
        destination: &str,
        dates: Vec<NaiveDate>,
        sources: Vec<SourceId>,
    ) -> CollectionResultType<Self> {
        let route = Route::parse(origin, destination)
            .map_err(|e| CollectionError::invalid_request(e.to_string()))?;
        Ok(Self::new(route, dates, sources))
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

    /// Number of connector calls the request implies.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.dates.len().saturating_mul(self.sources.len())
    }

    /// Checks the request before any connector is called.
    ///
    /// Route and passenger invariants are enforced by their types; this
    /// checks what the types cannot.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidRequest` if there are no dates or
    /// no sources.
    pub fn validate(&self) -> CollectionResultType<()> {
        if self.dates.is_empty() {
            return Err(CollectionError::invalid_request("at least one date is required"));
        }
        if self.sources.is_empty() {
            return Err(CollectionError::invalid_request(
                "at least one source is required",
            ));
        }
        if self.route.origin() == self.route.destination() {
            return Err(CollectionError::invalid_request(
                "origin and destination must differ",
            ));
        }
        if self.passengers.adult_count() == 0 {
            return Err(CollectionError::invalid_request(
                "at least one adult is required",
            ));
        }
        Ok(())
    }
}

/// One (date, source) call that produced no quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorFailure {
    /// Date queried.
    pub date: NaiveDate,
    /// Source queried.
    pub source: SourceId,
    /// Why no quotes were produced.
    pub reason: String,
}

/// Quotes gathered by one successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionResult {
    /// Run identifier, also attached to log events.
    pub run_id: CollectionRunId,
    /// Quotes in request order. Never empty.
    pub quotes: Vec<Quote>,
    /// Calls that produced nothing, in request order.
    pub failures: Vec<ConnectorFailure>,
    /// Number of (date, source) pairs in the request.
    pub calls_attempted: usize,
    /// Number of pairs that produced at least one quote.
    pub calls_succeeded: usize,
}

impl CollectionResult {
    /// Returns true if every call produced quotes.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Error type for collection operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// The request was rejected before any connector was called.
    #[error("invalid collection request: {0}")]
    InvalidRequest(String),

    /// No call produced a quote.
    #[error(
        "no fares found for {origin}-{destination} between {first_date} and {last_date} ({attempted} calls attempted)"
    )]
    NoData {
        /// Origin airport.
        origin: AirportCode,
        /// Destination airport.
        destination: AirportCode,
        /// Earliest requested date.
        first_date: NaiveDate,
        /// Latest requested date.
        last_date: NaiveDate,
        /// Number of calls attempted.
        attempted: usize,
    },
}

impl CollectionError {
    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns true if this is a no-data error.
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }
}

/// Result type for collection operations.
pub type CollectionResultType<T> = Result<T, CollectionError>;

/// Orchestrates concurrent fare collection across sources.
#[derive(Debug, Clone)]
pub struct FareCollector {
    registry: Arc<dyn SourceRegistry>,
    config: CollectionConfig,
}

impl FareCollector {
    /// Creates a collector. A zero concurrency bound is raised to one.
    #[must_use]
    pub fn new(registry: Arc<dyn SourceRegistry>, config: CollectionConfig) -> Self {
        Self {
            registry,
            config: config.with_max_concurrency(config.max_concurrency.max(1)),
        }
    }

    /// Creates a collector with default configuration.
    #[must_use]
    pub fn with_defaults(registry: Arc<dyn SourceRegistry>) -> Self {
        Self::new(registry, CollectionConfig::default())
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Collects quotes for every (date, source) pair of `request`.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidRequest` if the request fails
    /// validation and `CollectionError::NoData` if no call produced a quote.
    pub async fn collect(
        &self,
        request: &CollectionRequest,
    ) -> CollectionResultType<CollectionResult> {
        request.validate()?;

        let run_id = CollectionRunId::new_v4();
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));
        let calls_attempted = request.call_count();

        tracing::info!(
            run_id = %run_id,
            route = %request.route,
            dates = request.dates.len(),
            sources = request.sources.len(),
            max_concurrency = self.config.max_concurrency,
            "starting fare collection"
        );

        let mut pairs = Vec::with_capacity(calls_attempted);
        let mut calls = Vec::with_capacity(calls_attempted);
        for date in &request.dates {
            for source in &request.sources {
                let connector = self.registry.get(source).await;
                let query = FareQuery::new(
                    request.route.clone(),
                    *date,
                    request.passengers,
                    request.cabin_class,
                );
                pairs.push((*date, source.clone()));
                calls.push(self.spawn_call(connector, query, Arc::clone(&semaphore)));
            }
        }

        let outcomes = join_all(calls).await;

        let mut quotes = Vec::new();
        let mut failures = Vec::new();
        let mut calls_succeeded = 0usize;
        for ((date, source), outcome) in pairs.into_iter().zip(outcomes) {
            match outcome {
                Ok(found) if !found.is_empty() => {
                    calls_succeeded += 1;
                    quotes.extend(found);
                }
                Ok(_) => failures.push(failure(run_id, date, source, "no fares returned".into())),
                Err(reason) => failures.push(failure(run_id, date, source, reason)),
            }
        }

        if quotes.is_empty() {
            let (first_date, last_date) = date_bounds(&request.dates);
            tracing::warn!(
                run_id = %run_id,
                route = %request.route,
                attempted = calls_attempted,
                "no source produced any fares"
            );
            return Err(CollectionError::NoData {
                origin: request.route.origin().clone(),
                destination: request.route.destination().clone(),
                first_date,
                last_date,
                attempted: calls_attempted,
            });
        }

        tracing::info!(
            run_id = %run_id,
            quotes = quotes.len(),
            succeeded = calls_succeeded,
            failed = failures.len(),
            "fare collection finished"
        );

        Ok(CollectionResult {
            run_id,
            quotes,
            failures,
            calls_attempted,
            calls_succeeded,
        })
    }

    /// Runs one connector call in its own task.
    ///
    /// Resolves to the quotes or a failure reason; never panics.
    async fn spawn_call(
        &self,
        connector: Option<Arc<dyn SourceConnector>>,
        query: FareQuery,
        semaphore: Arc<Semaphore>,
    ) -> Result<Vec<Quote>, String> {
        let Some(connector) = connector else {
            return Err("source not registered".to_string());
        };
        let default_timeout_ms = self.config.default_timeout_ms;

        let handle = tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|_| SourceError::internal("collection pool closed"))?;

            let limit_ms = match connector.timeout_ms() {
                0 => default_timeout_ms,
                ms => ms,
            };
            match timeout(Duration::from_millis(limit_ms), connector.search(&query)).await {
                Ok(result) => result,
                Err(_) => Err(SourceError::timeout_with_duration(
                    format!("no response within {limit_ms}ms"),
                    limit_ms,
                )),
            }
        });

        match handle.await {
            Ok(Ok(quotes)) => Ok(quotes),
            Ok(Err(e)) => Err(e.to_string()),
            Err(e) if e.is_panic() => Err("task panicked".to_string()),
            Err(e) => Err(format!("task cancelled: {e}")),
        }
    }
}

fn failure(
    run_id: CollectionRunId,
    date: NaiveDate,
    source: SourceId,
    reason: String,
) -> ConnectorFailure {
    tracing::warn!(
        run_id = %run_id,
        date = %date,
        source = %source,
        reason = %reason,
        "connector call produced no quotes"
    );
    ConnectorFailure {
        date,
        source,
        reason,
    }
}

fn date_bounds(dates: &[NaiveDate]) -> (NaiveDate, NaiveDate) {
    let first = dates.iter().min().copied().unwrap_or(NaiveDate::MIN);
    let last = dates.iter().max().copied().unwrap_or(NaiveDate::MAX);
    (first, last)
}
