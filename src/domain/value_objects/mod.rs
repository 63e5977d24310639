//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`SourceId`]: string identifier of a fare source
//! - [`CollectionRunId`]: UUID of one collection run
//!
//! ## Fare Types
//!
//! - [`Price`]: non-negative decimal amount
//! - [`Currency`]: ISO-4217 code
//! - [`AirportCode`], [`Route`], [`Passengers`]: search parameters
//!
//! ## Domain Enums
//!
//! - `CabinClass`: economy through first
//! - `TrendDirection`: increasing, decreasing or stable
//!
//! ## Calendar
//!
//! - `calendar`: month enumeration, date spans, weekend detection

pub mod calendar;
pub mod enums;
pub mod ids;
pub mod price;
pub mod route;

pub use enums::{CabinClass, ParseEnumError, TrendDirection};
pub use ids::{CollectionRunId, SourceId};
pub use price::{Currency, Price};
pub use route::{AirportCode, MAX_SEATED_PASSENGERS, Passengers, Route};
