//! # Fallback Source
//!
//! One provider backed by an ordered chain of strategies.
//!
//! A provider may be reachable several ways (a partner API, a second
//! mirror, generated data as a last resort). [`FallbackSource`] presents
//! them as a single [`SourceConnector`]:
//!
//! ```text
//! strategy 1 ──error/empty──► strategy 2 ──error/empty──► ... ──► last error
//!      │                           │
//!      └── quotes ─────────────────┴──► re-attributed to the provider id
//! ```
//!
//! Callers never learn how many strategies exist or which one answered.

use crate::domain::entities::quote::Quote;
use crate::domain::value_objects::SourceId;
use crate::infrastructure::sources::error::{SourceError, SourceResult};
use crate::infrastructure::sources::traits::{FareQuery, SourceConnector};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Connector that tries strategies in order until one yields quotes.
#[derive(Debug, Clone)]
pub struct FallbackSource {
    source_id: SourceId,
    strategies: Vec<Arc<dyn SourceConnector>>,
}

impl FallbackSource {
    /// Creates a provider from an ordered list of strategies.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidRequest` if `strategies` is empty.
    pub fn new(
        source_id: SourceId,
        strategies: Vec<Arc<dyn SourceConnector>>,
    ) -> SourceResult<Self> {
        if strategies.is_empty() {
            return Err(SourceError::invalid_request(format!(
                "source {source_id} has no strategies"
            )));
        }
        Ok(Self {
            source_id,
            strategies,
        })
    }

    /// Returns the number of strategies in the chain.
    #[inline]
    #[must_use]
    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }
}

#[async_trait]
impl SourceConnector for FallbackSource {
    fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    /// Sum of the strategies' timeouts, so the whole chain can run.
    fn timeout_ms(&self) -> u64 {
        self.strategies
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.timeout_ms()))
    }

    async fn search(&self, query: &FareQuery) -> SourceResult<Vec<Quote>> {
        let mut last_error = SourceError::no_fares(format!("no strategy had fares for {query}"));

        for (position, strategy) in self.strategies.iter().enumerate() {
            let limit = Duration::from_millis(strategy.timeout_ms());
            let outcome = match timeout(limit, strategy.search(query)).await {
                Ok(result) => result,
                Err(_) => Err(SourceError::timeout_with_duration(
                    "strategy timed out",
                    strategy.timeout_ms(),
                )),
            };

            match outcome {
                Ok(quotes) if !quotes.is_empty() => {
                    return Ok(quotes
                        .iter()
                        .map(|q| q.with_source(self.source_id.clone()))
                        .collect());
                }
                Ok(_) => {
                    tracing::debug!(
                        source = %self.source_id,
                        strategy = position,
                        "strategy returned no fares, trying next"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        source = %self.source_id,
                        strategy = position,
                        error = %e,
                        "strategy failed, trying next"
                    );
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}
