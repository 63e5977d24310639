//! # Fare Insight Use Case
//!
//! Multi-date and monthly fare searches.
//!
//! Both searches run the same pipeline with a different
//! [`AnalysisProfile`]:
//!
//! ```text
//! request ─► FareCollector ─► quotes ─┬─► analyze ─► recommend ─┐
//!                                     ├─► SourceBreakdown ──────┼─► FareReport
//!                                     └─► RankingStrategy ──────┘
//! ```

use crate::application::dto::{FareReport, MonthSearchRequest, MultiDateSearchRequest};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::deal_ranking::strategy_for;
use crate::application::services::fare_collection::{
    CollectionConfig, CollectionRequest, FareCollector,
};
use crate::domain::services::price_analysis::analyze;
use crate::domain::services::profile::AnalysisProfile;
use crate::domain::services::recommendation::recommend_for_search;
use crate::domain::services::source_breakdown::SourceBreakdown;
use crate::domain::value_objects::calendar::month_dates;
use crate::domain::value_objects::{CabinClass, Passengers, Route, SourceId};
use crate::infrastructure::sources::traits::SourceRegistry;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Service answering multi-date and monthly fare searches.
#[derive(Debug, Clone)]
pub struct FareInsightService {
    registry: Arc<dyn SourceRegistry>,
    collector: FareCollector,
    multi_date: AnalysisProfile,
    monthly: AnalysisProfile,
}

impl FareInsightService {
    /// Creates a service using the preset profiles.
    #[must_use]
    pub fn new(registry: Arc<dyn SourceRegistry>, config: CollectionConfig) -> Self {
        Self {
            collector: FareCollector::new(Arc::clone(&registry), config),
            registry,
            multi_date: AnalysisProfile::multi_date(),
            monthly: AnalysisProfile::monthly(),
        }
    }

    /// Replaces the analysis profiles.
    #[must_use]
    pub fn with_profiles(mut self, multi_date: AnalysisProfile, monthly: AnalysisProfile) -> Self {
        self.multi_date = multi_date;
        self.monthly = monthly;
        self
    }

    /// Returns the profile used for multi-date searches.
    #[must_use]
    pub fn multi_date_profile(&self) -> &AnalysisProfile {
        &self.multi_date
    }

    /// Returns the profile used for monthly searches.
    #[must_use]
    pub fn monthly_profile(&self) -> &AnalysisProfile {
        &self.monthly
    }

    /// Searches an explicit list of dates.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad route, an empty date list or
    /// an empty registry, and `CollectionError::NoData` if no source
    /// produced a quote.
    pub async fn search_multiple_dates(
        &self,
        request: MultiDateSearchRequest,
    ) -> ApplicationResult<FareReport> {
        let route = Route::parse(&request.origin, &request.destination)?;
        self.run(
            route,
            request.dates,
            request.passengers,
            request.cabin_class,
            request.sources,
            &self.multi_date,
        )
        .await
    }

    /// Searches every day of a calendar month.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad route or month, and
    /// `CollectionError::NoData` if no source produced a quote.
    pub async fn search_month(&self, request: MonthSearchRequest) -> ApplicationResult<FareReport> {
        let route = Route::parse(&request.origin, &request.destination)?;
        let dates = month_dates(request.year, request.month)?;
        self.run(
            route,
            dates,
            request.passengers,
            request.cabin_class,
            request.sources,
            &self.monthly,
        )
        .await
    }

    async fn run(
        &self,
        route: Route,
        dates: Vec<NaiveDate>,
        passengers: Passengers,
        cabin_class: CabinClass,
        sources: Vec<SourceId>,
        profile: &AnalysisProfile,
    ) -> ApplicationResult<FareReport> {
        let sources = if sources.is_empty() {
            self.registry.source_ids().await
        } else {
            sources
        };
        if sources.is_empty() {
            return Err(ApplicationError::validation("no fare sources are registered"));
        }

        let request = CollectionRequest::new(route, dates, sources)
            .with_passengers(passengers)
            .with_cabin_class(cabin_class);
        let collection = self.collector.collect(&request).await?;

        let statistics = analyze(&collection.quotes, profile.include_weekend_analysis)?;
        let breakdown = SourceBreakdown::from_quotes(&collection.quotes);
        let dates_searched = request.dates.iter().collect::<BTreeSet<_>>().len();
        let recommendations =
            recommend_for_search(&statistics, &breakdown, profile, dates_searched);

        let ranking = strategy_for(profile.ranking);
        let mut top_deals = ranking.rank(&collection.quotes);
        top_deals.truncate(profile.top_deals);

        tracing::info!(
            run_id = %collection.run_id,
            route = %request.route,
            dates = dates_searched,
            cheapest = %statistics.cheapest.price,
            average = statistics.average_price,
            recommendations = recommendations.len(),
            ranking = ranking.name(),
            "fare search complete"
        );

        Ok(FareReport {
            run_id: collection.run_id,
            route: request.route,
            cabin_class: request.cabin_class,
            passengers: request.passengers,
            dates_searched,
            statistics,
            recommendations,
            top_deals,
            sources: breakdown,
            failures: collection.failures,
        })
    }
}
