//! # Application Services
//!
//! - [`fare_collection::FareCollector`]: concurrent (date, source) fan-out
//! - [`deal_ranking`]: top-N deal ranking strategies

pub mod deal_ranking;
pub mod fare_collection;

pub use deal_ranking::{
    CheapestFareStrategy, CheapestPerDateStrategy, RankedDeal, RankingStrategy, strategy_for,
};
pub use fare_collection::{
    CollectionConfig, CollectionError, CollectionRequest, CollectionResult,
    CollectionResultType, ConnectorFailure, FareCollector,
};
