//! # Domain Services
//!
//! Pure computations over quotes that do not belong to a single entity.
//!
//! ## Services
//!
//! - [`price_analysis::analyze`]: per-date statistics, distribution, weekend split and trend
//! - [`source_breakdown::SourceBreakdown`]: per-source averages for source comparison
//! - [`recommendation::recommend`]: prioritised advice derived from the statistics
//! - [`profile::AnalysisProfile`]: thresholds for multi-date and monthly searches

pub mod price_analysis;
pub mod profile;
pub mod recommendation;
pub mod source_breakdown;

pub use price_analysis::{
    AnalysisError, AnalysisResult, DatePrice, PriceDistribution, PriceStatistics, TrendAnalysis,
    WeekendSplit, analyze, per_date_minimums,
};
pub use profile::{AnalysisProfile, DealRanking};
pub use recommendation::{recommend, recommend_for_search};
pub use source_breakdown::{SourceBreakdown, SourceSummary};
