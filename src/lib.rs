//! # fare-radar
//!
//! Multi-source flight fare collection with price aggregation, trend
//! analysis and booking recommendations.
//!
//! A search fans out one call per `(date, source)` pair, gathers whatever
//! quotes come back, reduces them to the cheapest fare per date and turns
//! the result into statistics, plain-language advice and a ranked list of
//! deals.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ application   FareInsightService, FareCollector, ranking     │
//! ├──────────────────────────────────────────────────────────────┤
//! │ domain        Quote, value objects, analysis, recommendation │
//! ├──────────────────────────────────────────────────────────────┤
//! │ infrastructure  SourceConnector impls, registry, HTTP client │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`domain`]: pure types and analysis, no I/O
//! - [`application`]: the collection orchestrator and search use cases
//! - [`infrastructure`]: fare source connectors
//! - [`config`]: layered configuration
//! - [`telemetry`]: logging setup
//!
//! ## Example
//!
//! ```no_run
//! use fare_radar::application::dto::MultiDateSearchRequest;
//! use fare_radar::application::services::CollectionConfig;
//! use fare_radar::application::use_cases::FareInsightService;
//! use fare_radar::config::SourceSettings;
//! use fare_radar::infrastructure::sources::build_registry;
//! use chrono::NaiveDate;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = build_registry(&[SourceSettings::synthetic("demo", 180.0)], 5_000)?;
//! let service = FareInsightService::new(Arc::new(registry), CollectionConfig::default());
//!
//! let dates = vec![
//!     NaiveDate::from_ymd_opt(2024, 12, 1).ok_or("date")?,
//!     NaiveDate::from_ymd_opt(2024, 12, 2).ok_or("date")?,
//! ];
//! let report = service
//!     .search_multiple_dates(MultiDateSearchRequest::new("LHR", "JFK", dates))
//!     .await?;
//! for line in &report.recommendations {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;

pub use application::dto::{FareReport, MonthSearchRequest, MultiDateSearchRequest};
pub use application::error::{ApplicationError, ApplicationResult};
pub use application::use_cases::FareInsightService;
pub use config::AppConfig;
pub use domain::entities::Quote;
pub use domain::services::{AnalysisProfile, PriceStatistics, analyze, recommend};
