//! # Use Cases
//!
//! - [`fare_insight::FareInsightService`]: multi-date and monthly fare searches

pub mod fare_insight;

pub use fare_insight::FareInsightService;
