//! # Domain Entities
//!
//! - [`Quote`]: a fare observation for one (date, source, cabin class)

pub mod quote;

pub use quote::Quote;
