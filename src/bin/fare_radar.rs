//! # fare-radar CLI
//!
//! Runs a multi-date or monthly fare search and prints the report as JSON.
//!
//! ```text
//! fare-radar dates LHR JFK 2024-12-01 2024-12-02 2024-12-03
//! fare-radar --config fare-radar.toml month LHR JFK 2024 12 --cabin business
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use fare_radar::application::dto::{FareReport, MonthSearchRequest, MultiDateSearchRequest};
use fare_radar::application::use_cases::FareInsightService;
use fare_radar::config::AppConfig;
use fare_radar::domain::value_objects::{CabinClass, Passengers, SourceId};
use fare_radar::infrastructure::sources::build_registry;
use fare_radar::telemetry::init_logging;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "fare-radar")]
#[command(about = "Compare flight fares across dates and sources")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search an explicit list of departure dates
    Dates {
        /// Origin IATA code
        origin: String,
        /// Destination IATA code
        destination: String,
        /// Departure dates (YYYY-MM-DD)
        #[arg(required = true)]
        dates: Vec<NaiveDate>,
        #[command(flatten)]
        options: SearchOptions,
    },

    /// Search every day of a calendar month
    Month {
        /// Origin IATA code
        origin: String,
        /// Destination IATA code
        destination: String,
        /// Calendar year
        year: i32,
        /// Calendar month (1-12)
        month: u32,
        #[command(flatten)]
        options: SearchOptions,
    },
}

#[derive(Args, Debug)]
struct SearchOptions {
    /// Cabin class (economy, premium_economy, business, first)
    #[arg(long, default_value = "economy")]
    cabin: CabinClass,

    /// Adult passengers
    #[arg(long, default_value_t = 1)]
    adults: u8,

    /// Child passengers
    #[arg(long, default_value_t = 0)]
    children: u8,

    /// Infants on lap
    #[arg(long, default_value_t = 0)]
    infants: u8,

    /// Restrict the search to these source ids (repeatable)
    #[arg(long = "source")]
    sources: Vec<String>,
}

impl SearchOptions {
    fn passengers(&self) -> Result<Passengers> {
        Passengers::new(self.adults, self.children, self.infants).context("invalid passengers")
    }

    fn source_ids(&self) -> Vec<SourceId> {
        self.sources.iter().map(SourceId::new).collect()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    init_logging(&config.logging).context("failed to initialise logging")?;

    let registry = build_registry(&config.sources, config.collection.default_timeout_ms)
        .context("failed to build fare sources")?;
    let service = FareInsightService::new(Arc::new(registry), config.collection)
        .with_profiles(config.multi_date_profile(), config.monthly_profile());

    let report = run(&service, cli.command).await?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}

async fn run(service: &FareInsightService, command: Command) -> Result<FareReport> {
    let report = match command {
        Command::Dates {
            origin,
            destination,
            dates,
            options,
        } => {
            let request = MultiDateSearchRequest::new(origin, destination, dates)
                .with_passengers(options.passengers()?)
                .with_cabin_class(options.cabin)
                .with_sources(options.source_ids());
            service.search_multiple_dates(request).await?
        }
        Command::Month {
            origin,
            destination,
            year,
            month,
            options,
        } => {
            let request = MonthSearchRequest::new(origin, destination, year, month)
                .with_passengers(options.passengers()?)
                .with_cabin_class(options.cabin)
                .with_sources(options.source_ids());
            service.search_month(request).await?
        }
    };
    Ok(report)
}
