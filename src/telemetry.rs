//! # Telemetry
//!
//! Logging initialisation on top of `tracing-subscriber`.
//!
//! The configured filter applies unless `RUST_LOG` is set, in which case
//! the environment wins.
//!
//! ```ignore
//! use fare_radar::config::LoggingConfig;
//! use fare_radar::telemetry::init_logging;
//!
//! init_logging(&LoggingConfig::default())?;
//! tracing::info!("ready");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt as fmt_layer, prelude::*};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
    /// Single-line human-readable output.
    Compact,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            other => Err(TelemetryError::UnknownFormat(other.to_string())),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: "info".to_string(),
        }
    }
}

/// Error type for telemetry setup.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Unknown log format name.
    #[error("unknown log format: {0}")]
    UnknownFormat(String),

    /// The filter directive could not be parsed.
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),

    /// A global subscriber is already installed.
    #[error("logging already initialised: {0}")]
    AlreadyInitialised(String),
}

/// Result type for telemetry setup.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

fn build_filter(config: &LoggingConfig) -> TelemetryResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.filter)
            .map_err(|e| TelemetryError::InvalidFilter(e.to_string())),
    }
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns `TelemetryError::InvalidFilter` for a malformed filter and
/// `TelemetryError::AlreadyInitialised` if a subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> TelemetryResult<()> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Pretty => registry
            .with(fmt_layer::layer().with_target(true).with_line_number(true))
            .try_init(),
        LogFormat::Json => registry.with(fmt_layer::layer().json()).try_init(),
        LogFormat::Compact => registry.with(fmt_layer::layer().compact()).try_init(),
    };
    installed.map_err(|e| TelemetryError::AlreadyInitialised(e.to_string()))?;

    tracing::debug!(format = %config.format, filter = %config.filter, "logging initialised");
    Ok(())
}
