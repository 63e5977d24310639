//! # Analysis Profiles
//!
//! Thresholds that parameterise analysis and recommendations.
//!
//! An ad-hoc multi-date search and a full-month search use the same engine
//! with different thresholds. [`AnalysisProfile::multi_date`] and
//! [`AnalysisProfile::monthly`] are the two presets; either can be
//! overridden field by field from configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the top-N deal list is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealRanking {
    /// Every quote competes; one date may appear several times.
    #[default]
    CheapestFare,
    /// One entry per date, its per-date minimum.
    CheapestPerDate,
}

impl fmt::Display for DealRanking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheapestFare => write!(f, "cheapest_fare"),
            Self::CheapestPerDate => write!(f, "cheapest_per_date"),
        }
    }
}

/// Thresholds for one search context.
///
/// All ratios are applied to the unrounded mean price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisProfile {
    /// Compute the weekend/weekday split.
    pub include_weekend_analysis: bool,
    /// Deal alert when `cheapest < mean * deal_ratio`.
    pub deal_ratio: f64,
    /// Overpriced warning when `most_expensive > mean * overpriced_ratio`.
    pub overpriced_ratio: f64,
    /// Fraction a source average must beat (or exceed) the mean by.
    pub source_margin: f64,
    /// Emit the worse-source warning.
    pub report_worst_source: bool,
    /// Weekend note when the premium is above this percentage.
    pub weekend_expensive_percent: i64,
    /// Weekend note when the premium is below this percentage.
    pub weekend_cheaper_percent: i64,
    /// Trend note when `|coefficient|` exceeds this.
    pub trend_threshold: f64,
    /// High-variation note when `range > mean * high_variation_ratio`.
    pub high_variation_ratio: f64,
    /// Volume note when more distinct dates than this were searched.
    pub volume_threshold: usize,
    /// Length of the ranked deal list.
    pub top_deals: usize,
    /// How the ranked deal list is built.
    pub ranking: DealRanking,
}

impl AnalysisProfile {
    /// Preset for an ad-hoc list of dates.
    #[must_use]
    pub fn multi_date() -> Self {
        Self {
            include_weekend_analysis: true,
            deal_ratio: 0.8,
            overpriced_ratio: 1.3,
            source_margin: 0.05,
            report_worst_source: true,
            weekend_expensive_percent: 20,
            weekend_cheaper_percent: -10,
            trend_threshold: 0.15,
            high_variation_ratio: 0.5,
            volume_threshold: 7,
            top_deals: 5,
            ranking: DealRanking::CheapestFare,
        }
    }

    /// Preset for a full calendar month.
    #[must_use]
    pub fn monthly() -> Self {
        Self {
            report_worst_source: false,
            high_variation_ratio: 0.6,
            volume_threshold: 20,
            top_deals: 10,
            ranking: DealRanking::CheapestPerDate,
            ..Self::multi_date()
        }
    }

    /// Sets whether the weekend split is computed.
    #[must_use]
    pub fn with_weekend_analysis(mut self, enabled: bool) -> Self {
        self.include_weekend_analysis = enabled;
        self
    }

    /// Sets the length of the ranked deal list.
    #[must_use]
    pub fn with_top_deals(mut self, top_deals: usize) -> Self {
        self.top_deals = top_deals;
        self
    }
}

impl Default for AnalysisProfile {
    fn default() -> Self {
        Self::multi_date()
    }
}
