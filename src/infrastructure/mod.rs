//! # Infrastructure Layer
//!
//! Adapters to the outside world.
//!
//! - [`sources`]: fare source connectors, the HTTP client and the registry
pub mod sources;
