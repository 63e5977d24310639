//! # Source Registry
//!
//! In-memory [`SourceRegistry`] and construction of connectors from
//! configuration.

use crate::config::{SourceKind, SourceSettings};
use crate::domain::value_objects::{Currency, SourceId};
use crate::infrastructure::sources::error::{SourceError, SourceResult};
use crate::infrastructure::sources::fallback::FallbackSource;
use crate::infrastructure::sources::http_source::HttpFareSource;
use crate::infrastructure::sources::synthetic::SyntheticFareSource;
use crate::infrastructure::sources::traits::{SourceConnector, SourceRegistry};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe map of source id to connector.
#[derive(Debug, Clone, Default)]
pub struct InMemorySourceRegistry {
    connectors: Arc<RwLock<HashMap<SourceId, Arc<dyn SourceConnector>>>>,
}

impl InMemorySourceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding `connectors`, keyed by their source ids.
    ///
    /// A later connector with the same id replaces an earlier one.
    #[must_use]
    pub fn from_connectors(connectors: impl IntoIterator<Item = Arc<dyn SourceConnector>>) -> Self {
        let map = connectors
            .into_iter()
            .map(|c| (c.source_id().clone(), c))
            .collect();
        Self {
            connectors: Arc::new(RwLock::new(map)),
        }
    }

    /// Registers a connector, returning the one it replaced.
    pub async fn register(
        &self,
        connector: Arc<dyn SourceConnector>,
    ) -> Option<Arc<dyn SourceConnector>> {
        let mut connectors = self.connectors.write().await;
        connectors.insert(connector.source_id().clone(), connector)
    }

    /// Removes a connector.
    pub async fn unregister(&self, id: &SourceId) -> Option<Arc<dyn SourceConnector>> {
        let mut connectors = self.connectors.write().await;
        connectors.remove(id)
    }

    /// Returns the number of registered connectors.
    pub async fn len(&self) -> usize {
        self.connectors.read().await.len()
    }

    /// Returns true if no connector is registered.
    pub async fn is_empty(&self) -> bool {
        self.connectors.read().await.is_empty()
    }
}

#[async_trait]
impl SourceRegistry for InMemorySourceRegistry {
    async fn get(&self, id: &SourceId) -> Option<Arc<dyn SourceConnector>> {
        self.connectors.read().await.get(id).cloned()
    }

    async fn source_ids(&self) -> Vec<SourceId> {
        let mut ids: Vec<SourceId> = self.connectors.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}

/// Builds a registry from source settings.
///
/// A source with `fallback` entries becomes a [`FallbackSource`] whose
/// first strategy is the source itself.
///
/// # Errors
///
/// Returns `SourceError::InvalidRequest` if a source is misconfigured
/// (bad currency, missing URL, non-positive base fare) and
/// `SourceError::Internal` if an HTTP client cannot be built.
pub fn build_registry(
    settings: &[SourceSettings],
    default_timeout_ms: u64,
) -> SourceResult<InMemorySourceRegistry> {
    let connectors = settings
        .iter()
        .map(|s| build_connector(s, default_timeout_ms))
        .collect::<SourceResult<Vec<_>>>()?;

    tracing::info!(sources = connectors.len(), "source registry built");
    Ok(InMemorySourceRegistry::from_connectors(connectors))
}

/// Builds one connector, wrapping it in a fallback chain when configured.
///
/// # Errors
///
/// See [`build_registry`].
pub fn build_connector(
    settings: &SourceSettings,
    default_timeout_ms: u64,
) -> SourceResult<Arc<dyn SourceConnector>> {
    let id = SourceId::new(settings.id.trim());
    let primary = build_strategy(id.clone(), settings, default_timeout_ms)?;
    if settings.fallback.is_empty() {
        return Ok(primary);
    }

    let mut strategies = Vec::with_capacity(settings.fallback.len() + 1);
    strategies.push(primary);
    for (position, fallback) in settings.fallback.iter().enumerate() {
        let strategy_id = if fallback.id.trim().is_empty() {
            SourceId::new(format!("{id}#{}", position + 1))
        } else {
            SourceId::new(fallback.id.trim())
        };
        strategies.push(build_strategy(strategy_id, fallback, default_timeout_ms)?);
    }
    Ok(Arc::new(FallbackSource::new(id, strategies)?))
}

fn build_strategy(
    id: SourceId,
    settings: &SourceSettings,
    default_timeout_ms: u64,
) -> SourceResult<Arc<dyn SourceConnector>> {
    let timeout_ms = settings.timeout_ms.unwrap_or(default_timeout_ms);
    match settings.kind {
        SourceKind::Synthetic => {
            let currency = Currency::new(&settings.currency)
                .map_err(|e| SourceError::invalid_request(format!("source {id}: {e}")))?;
            let source = SyntheticFareSource::new(id, settings.base_fare, currency)?
                .with_timeout(timeout_ms);
            Ok(Arc::new(source))
        }
        SourceKind::Http => {
            let url = settings.base_url.as_deref().unwrap_or_default();
            Ok(Arc::new(HttpFareSource::new(id, url, timeout_ms)?))
        }
    }
}
