//! # Configuration
//!
//! Application settings loaded with the `config` crate.
//!
//! # Sources
//!
//! Later sources override earlier ones:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file
//! 3. Environment variables prefixed `FARE_RADAR`, with `__` separating
//!    nested keys (`FARE_RADAR__COLLECTION__MAX_CONCURRENCY=4`)
//!
//! A `.env` file in the working directory is loaded into the environment
//! first.
//!
//! # Example
//!
//! ```toml
//! [collection]
//! max_concurrency = 4
//!
//! [monthly]
//! top_deals = 5
//!
//! [[sources]]
//! id = "partner"
//! kind = "http"
//! base_url = "https://fares.example.com/api"
//! timeout_ms = 3000
//!
//! [[sources.fallback]]
//! kind = "synthetic"
//! base_fare = 250.0
//! ```

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::fare_collection::CollectionConfig;
use crate::domain::services::profile::{AnalysisProfile, DealRanking};
use crate::domain::value_objects::Currency;
pub use crate::telemetry::{LogFormat, LoggingConfig};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "FARE_RADAR";

/// How a source obtains fares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Deterministic generated fares.
    #[default]
    Synthetic,
    /// JSON fares from an HTTP endpoint.
    Http,
}

/// Settings of one fare source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Source id quotes are attributed to. Optional on fallback entries.
    pub id: String,
    /// Connector kind.
    pub kind: SourceKind,
    /// Endpoint base URL, required for `http`.
    pub base_url: Option<String>,
    /// Per-call timeout; the collection default when absent.
    pub timeout_ms: Option<u64>,
    /// One-adult economy weekday fare for `synthetic`.
    pub base_fare: f64,
    /// Currency of generated fares.
    pub currency: String,
    /// Strategies tried in order when this source fails or has no fares.
    pub fallback: Vec<SourceSettings>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            id: String::new(),
            kind: SourceKind::Synthetic,
            base_url: None,
            timeout_ms: None,
            base_fare: 200.0,
            currency: "USD".to_string(),
            fallback: Vec::new(),
        }
    }
}

impl SourceSettings {
    /// Creates synthetic source settings.
    #[must_use]
    pub fn synthetic(id: impl Into<String>, base_fare: f64) -> Self {
        Self {
            id: id.into(),
            base_fare,
            ..Self::default()
        }
    }

    /// Creates HTTP source settings.
    #[must_use]
    pub fn http(id: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: SourceKind::Http,
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    fn validate(&self, label: &str) -> ApplicationResult<()> {
        match self.kind {
            SourceKind::Http => {
                let has_url = self
                    .base_url
                    .as_deref()
                    .is_some_and(|url| !url.trim().is_empty());
                if !has_url {
                    return Err(ApplicationError::configuration(format!(
                        "source {label}: http sources need a base_url"
                    )));
                }
            }
            SourceKind::Synthetic => {
                if !self.base_fare.is_finite() || self.base_fare <= 0.0 {
                    return Err(ApplicationError::configuration(format!(
                        "source {label}: base_fare must be positive"
                    )));
                }
                Currency::new(&self.currency).map_err(|e| {
                    ApplicationError::configuration(format!("source {label}: {e}"))
                })?;
            }
        }
        if self.timeout_ms == Some(0) {
            return Err(ApplicationError::configuration(format!(
                "source {label}: timeout_ms must be positive"
            )));
        }
        for (position, fallback) in self.fallback.iter().enumerate() {
            fallback.validate(&format!("{label} fallback #{}", position + 1))?;
        }
        Ok(())
    }
}

/// Field-by-field overrides of an [`AnalysisProfile`] preset.
///
/// Missing fields keep the preset's value, so `[monthly] top_deals = 5`
/// changes nothing else about the monthly profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOverrides {
    /// See [`AnalysisProfile::include_weekend_analysis`].
    pub include_weekend_analysis: Option<bool>,
    /// See [`AnalysisProfile::deal_ratio`].
    pub deal_ratio: Option<f64>,
    /// See [`AnalysisProfile::overpriced_ratio`].
    pub overpriced_ratio: Option<f64>,
    /// See [`AnalysisProfile::source_margin`].
    pub source_margin: Option<f64>,
    /// See [`AnalysisProfile::report_worst_source`].
    pub report_worst_source: Option<bool>,
    /// See [`AnalysisProfile::weekend_expensive_percent`].
    pub weekend_expensive_percent: Option<i64>,
    /// See [`AnalysisProfile::weekend_cheaper_percent`].
    pub weekend_cheaper_percent: Option<i64>,
    /// See [`AnalysisProfile::trend_threshold`].
    pub trend_threshold: Option<f64>,
    /// See [`AnalysisProfile::high_variation_ratio`].
    pub high_variation_ratio: Option<f64>,
    /// See [`AnalysisProfile::volume_threshold`].
    pub volume_threshold: Option<usize>,
    /// See [`AnalysisProfile::top_deals`].
    pub top_deals: Option<usize>,
    /// See [`AnalysisProfile::ranking`].
    pub ranking: Option<DealRanking>,
}

impl ProfileOverrides {
    /// Applies the overrides on top of `base`.
    #[must_use]
    pub fn apply(&self, base: AnalysisProfile) -> AnalysisProfile {
        AnalysisProfile {
            include_weekend_analysis: self
                .include_weekend_analysis
                .unwrap_or(base.include_weekend_analysis),
            deal_ratio: self.deal_ratio.unwrap_or(base.deal_ratio),
            overpriced_ratio: self.overpriced_ratio.unwrap_or(base.overpriced_ratio),
            source_margin: self.source_margin.unwrap_or(base.source_margin),
            report_worst_source: self.report_worst_source.unwrap_or(base.report_worst_source),
            weekend_expensive_percent: self
                .weekend_expensive_percent
                .unwrap_or(base.weekend_expensive_percent),
            weekend_cheaper_percent: self
                .weekend_cheaper_percent
                .unwrap_or(base.weekend_cheaper_percent),
            trend_threshold: self.trend_threshold.unwrap_or(base.trend_threshold),
            high_variation_ratio: self.high_variation_ratio.unwrap_or(base.high_variation_ratio),
            volume_threshold: self.volume_threshold.unwrap_or(base.volume_threshold),
            top_deals: self.top_deals.unwrap_or(base.top_deals),
            ranking: self.ranking.unwrap_or(base.ranking),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Collection orchestrator settings.
    pub collection: CollectionConfig,
    /// Overrides of the multi-date profile.
    pub multi_date: ProfileOverrides,
    /// Overrides of the monthly profile.
    pub monthly: ProfileOverrides,
    /// Fare sources.
    pub sources: Vec<SourceSettings>,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            collection: CollectionConfig::default(),
            multi_date: ProfileOverrides::default(),
            monthly: ProfileOverrides::default(),
            sources: vec![SourceSettings::synthetic("synthetic", 200.0)],
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from `.env`, an optional TOML file and the
    /// environment, then validates it.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if a source cannot be
    /// read or parsed, or the result fails [`validate`](Self::validate).
    pub fn load(path: Option<&Path>) -> ApplicationResult<Self> {
        dotenvy::dotenv().ok();

        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = Self::build(builder)?;
        tracing::debug!(
            sources = config.sources.len(),
            max_concurrency = config.collection.max_concurrency,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Parses configuration from a TOML string, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the TOML is malformed
    /// or the result fails [`validate`](Self::validate).
    pub fn from_toml_str(toml: &str) -> ApplicationResult<Self> {
        Self::build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> ApplicationResult<Self> {
        let config: Self = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| ApplicationError::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` for zero concurrency, no
    /// sources, blank or duplicate source ids, http sources without a URL,
    /// or unusable synthetic settings.
    pub fn validate(&self) -> ApplicationResult<()> {
        if self.collection.max_concurrency == 0 {
            return Err(ApplicationError::configuration(
                "collection.max_concurrency must be positive",
            ));
        }
        if self.collection.default_timeout_ms == 0 {
            return Err(ApplicationError::configuration(
                "collection.default_timeout_ms must be positive",
            ));
        }
        if self.sources.is_empty() {
            return Err(ApplicationError::configuration("at least one source is required"));
        }

        let mut seen = HashSet::new();
        for source in &self.sources {
            let id = source.id.trim();
            if id.is_empty() {
                return Err(ApplicationError::configuration("source ids must not be blank"));
            }
            if !seen.insert(id.to_string()) {
                return Err(ApplicationError::configuration(format!(
                    "duplicate source id: {id}"
                )));
            }
            source.validate(id)?;
        }
        Ok(())
    }

    /// Multi-date profile with overrides applied.
    #[must_use]
    pub fn multi_date_profile(&self) -> AnalysisProfile {
        self.multi_date.apply(AnalysisProfile::multi_date())
    }

    /// Monthly profile with overrides applied.
    #[must_use]
    pub fn monthly_profile(&self) -> AnalysisProfile {
        self.monthly.apply(AnalysisProfile::monthly())
    }
}
