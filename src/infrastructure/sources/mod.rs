//! # Fare Sources
//!
//! Connectors that turn a [`FareQuery`] into quotes.
//!
//! - [`SourceConnector`]: the port every connector implements
//! - [`SyntheticFareSource`]: deterministic generated fares
//! - [`HttpFareSource`]: JSON fares over HTTP
//! - [`FallbackSource`]: ordered strategy chain behind one source id
//! - [`InMemorySourceRegistry`]: id to connector lookup
//!
//! Connectors report failures as [`SourceError`]; the collection
//! orchestrator records them and carries on.

pub mod error;
pub mod fallback;
pub mod http_client;
pub mod http_source;
pub mod registry;
pub mod synthetic;
pub mod traits;

pub use error::{SourceError, SourceResult};
pub use fallback::FallbackSource;
pub use http_client::HttpClient;
pub use http_source::HttpFareSource;
pub use registry::{InMemorySourceRegistry, build_connector, build_registry};
pub use synthetic::SyntheticFareSource;
pub use traits::{DEFAULT_SOURCE_TIMEOUT_MS, FareQuery, SourceConnector, SourceRegistry};
