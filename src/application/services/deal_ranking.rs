//! # Deal Ranking
//!
//! Strategies that order quotes into a top-N deal list.
//!
//! Ranking is independent of the statistics: it works on the raw quote set.
//! Every strategy produces a total order. Quotes are compared by price,
//! then date, then source id, then input position, so equal inputs always
//! rank identically.

use crate::domain::entities::quote::Quote;
use crate::domain::services::profile::DealRanking;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

/// A quote with its ranking information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDeal {
    /// The quote being ranked.
    pub quote: Quote,
    /// The rank (1 = best).
    pub rank: usize,
    /// The score used for ranking (higher = better).
    pub score: f64,
}

impl RankedDeal {
    /// Creates a new ranked deal.
    #[must_use]
    pub fn new(quote: Quote, rank: usize, score: f64) -> Self {
        Self { quote, rank, score }
    }

    /// Returns true if this deal is the best (rank 1).
    #[must_use]
    pub fn is_best(&self) -> bool {
        self.rank == 1
    }
}

impl fmt::Display for RankedDeal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.rank, self.quote)
    }
}

/// Trait for deal ranking strategies.
pub trait RankingStrategy: Send + Sync + fmt::Debug {
    /// Ranks the given quotes, best first.
    fn rank(&self, quotes: &[Quote]) -> Vec<RankedDeal>;

    /// Returns the name of this ranking strategy.
    fn name(&self) -> &'static str;
}

/// Returns the strategy for a configured ranking mode.
#[must_use]
pub fn strategy_for(ranking: DealRanking) -> Box<dyn RankingStrategy> {
    match ranking {
        DealRanking::CheapestFare => Box::new(CheapestFareStrategy),
        DealRanking::CheapestPerDate => Box::new(CheapestPerDateStrategy),
    }
}

/// Every quote competes on price; a date may appear more than once.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheapestFareStrategy;

impl RankingStrategy for CheapestFareStrategy {
    fn rank(&self, quotes: &[Quote]) -> Vec<RankedDeal> {
        rank_positions(quotes, (0..quotes.len()).collect())
    }

    fn name(&self) -> &'static str {
        "CheapestFare"
    }
}

/// One entry per date: that date's cheapest quote.
///
/// Equal prices on a date keep the quote that appears first in the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheapestPerDateStrategy;

impl RankingStrategy for CheapestPerDateStrategy {
    fn rank(&self, quotes: &[Quote]) -> Vec<RankedDeal> {
        let mut best: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for (position, quote) in quotes.iter().enumerate() {
            match best.entry(quote.date()) {
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
                Entry::Occupied(mut slot) => {
                    let cheaper = quotes
                        .get(*slot.get())
                        .is_some_and(|current| quote.price() < current.price());
                    if cheaper {
                        slot.insert(position);
                    }
                }
            }
        }
        rank_positions(quotes, best.into_values().collect())
    }

    fn name(&self) -> &'static str {
        "CheapestPerDate"
    }
}

fn compare(quotes: &[Quote], a: usize, b: usize) -> Ordering {
    match (quotes.get(a), quotes.get(b)) {
        (Some(qa), Some(qb)) => qa
            .price()
            .cmp(&qb.price())
            .then_with(|| qa.date().cmp(&qb.date()))
            .then_with(|| qa.source().cmp(qb.source()))
            .then_with(|| a.cmp(&b)),
        _ => a.cmp(&b),
    }
}

fn rank_positions(quotes: &[Quote], mut positions: Vec<usize>) -> Vec<RankedDeal> {
    positions.sort_by(|&a, &b| compare(quotes, a, b));
    positions
        .into_iter()
        .filter_map(|position| quotes.get(position))
        .enumerate()
        .map(|(rank, quote)| RankedDeal::new(quote.clone(), rank + 1, -quote.price().as_f64()))
        .collect()
}
