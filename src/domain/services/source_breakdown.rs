//! # Source Breakdown
//!
//! Groups quotes by source for source-comparison recommendations.
//!
//! Each source is summarised by the average of *its own* per-date minimums,
//! so a source that quotes three flights on one date is not penalised for
//! its dearer options.

use crate::domain::entities::quote::Quote;
use crate::domain::services::price_analysis::{DatePrice, per_date_minimums};
use crate::domain::value_objects::SourceId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of one source's quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSummary {
    /// The source.
    pub source: SourceId,
    /// Quotes returned by the source.
    pub quote_count: usize,
    /// Distinct dates the source quoted.
    pub date_count: usize,
    /// Mean of the source's per-date minimums.
    pub average_price: f64,
    /// The source's cheapest date.
    pub cheapest: DatePrice,
}

/// Quotes grouped by source, ordered by source id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceBreakdown {
    summaries: Vec<SourceSummary>,
}

impl SourceBreakdown {
    /// Groups `quotes` by source.
    #[must_use]
    pub fn from_quotes(quotes: &[Quote]) -> Self {
        let mut grouped: BTreeMap<&SourceId, Vec<Quote>> = BTreeMap::new();
        for quote in quotes {
            grouped.entry(quote.source()).or_default().push(quote.clone());
        }

        let summaries = grouped
            .into_iter()
            .filter_map(|(source, source_quotes)| summarize(source, &source_quotes))
            .collect();

        Self { summaries }
    }

    /// Returns the summaries ordered by source id.
    #[must_use]
    pub fn summaries(&self) -> &[SourceSummary] {
        &self.summaries
    }

    /// Returns the number of sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    /// Returns true if no source produced quotes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Returns the summary for `source`, if present.
    #[must_use]
    pub fn get(&self, source: &SourceId) -> Option<&SourceSummary> {
        self.summaries.iter().find(|s| &s.source == source)
    }

    /// Source with the lowest average; ties go to the smaller source id.
    #[must_use]
    pub fn best(&self) -> Option<&SourceSummary> {
        self.summaries.iter().reduce(|best, s| {
            if s.average_price < best.average_price {
                s
            } else {
                best
            }
        })
    }

    /// Source with the highest average; ties go to the smaller source id.
    #[must_use]
    pub fn worst(&self) -> Option<&SourceSummary> {
        self.summaries.iter().reduce(|worst, s| {
            if s.average_price > worst.average_price {
                s
            } else {
                worst
            }
        })
    }
}

fn summarize(source: &SourceId, quotes: &[Quote]) -> Option<SourceSummary> {
    let minimums = per_date_minimums(quotes);
    let cheapest = minimums
        .iter()
        .reduce(|low, dp| if dp.price < low.price { dp } else { low })?
        .clone();
    let average_price =
        minimums.iter().map(|dp| dp.price.as_f64()).sum::<f64>() / minimums.len() as f64;

    Some(SourceSummary {
        source: source.clone(),
        quote_count: quotes.len(),
        date_count: minimums.len(),
        average_price,
        cheapest,
    })
}
