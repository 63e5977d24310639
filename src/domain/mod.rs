//! # Domain Layer
//!
//! Fare quotes, the value objects they are built from, and the pure
//! analysis that turns a quote set into statistics and advice.
//!
//! Nothing in this layer performs I/O.
//!
//! - [`value_objects`]: prices, currencies, routes, identifiers, calendar helpers
//! - [`entities`]: the [`entities::Quote`] record
//! - [`services`]: analysis engine, source breakdown, recommendations
//! - [`errors`]: validation errors

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
