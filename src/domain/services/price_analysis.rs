//! # Price Analysis Engine
//!
//! Derives [`PriceStatistics`] from a set of fare quotes.
//!
//! Every statistic is computed over *per-date minimums*: quotes are grouped
//! by departure date and each group is reduced to its cheapest quote before
//! anything else happens. A date's price for analysis purposes is therefore
//! `min(price | quote.date = d)`.
//!
//! # Algorithm
//!
//! ```text
//! quotes ──► per-date minimums ──► extremes, mean, range
//!                               ├─► distribution (sorted ascending)
//!                               ├─► weekend / weekday split
//!                               └─► trend + volatility (chronological)
//! ```
//!
//! # Tie-breaking
//!
//! - Two sources quoting the same minimum for one date: the quote that
//!   appears first in the input wins.
//! - Two dates sharing the global minimum (or maximum): the earliest date
//!   wins.
//! - The reported currency is that of the cheapest quote; a price tie
//!   goes to the lower currency code.
//!
//! # Quartiles
//!
//! Quartiles are read from the ascending per-date prices at index
//! `floor(n * q)` (0-indexed, clamped to `n - 1`). This is not the
//! interpolated convention; `[10, 20, 30, 40]` has `q25 = 20`,
//! `median = 30` and `q75 = 40`.

use crate::domain::entities::quote::Quote;
use crate::domain::value_objects::calendar::is_weekend;
use crate::domain::value_objects::{Currency, Price, SourceId, TrendDirection};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use thiserror::Error;

/// Error type for analysis operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// No quotes were supplied.
    #[error("cannot analyze an empty quote set")]
    EmptyInput,
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// The representative price of one date and the source that quoted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePrice {
    /// Departure date.
    pub date: NaiveDate,
    /// Cheapest price quoted for the date.
    pub price: Price,
    /// Source of that price.
    pub source: SourceId,
}

impl DatePrice {
    fn from_quote(quote: &Quote) -> Self {
        Self {
            date: quote.date(),
            price: quote.price(),
            source: quote.source().clone(),
        }
    }
}

/// Shape of the per-date price distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceDistribution {
    /// Lowest per-date price.
    pub min: f64,
    /// Value at index `floor(n * 0.25)`.
    pub q25: f64,
    /// Value at index `floor(n * 0.5)`.
    pub median: f64,
    /// Value at index `floor(n * 0.75)`.
    pub q75: f64,
    /// Highest per-date price.
    pub max: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

/// Average weekend fare against average weekday fare.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeekendSplit {
    /// Mean of Saturday/Sunday per-date prices.
    pub avg_weekend: f64,
    /// Mean of Monday-Friday per-date prices.
    pub avg_weekday: f64,
    /// `round((avg_weekend - avg_weekday) / avg_weekday * 100)`.
    pub premium_percent: i64,
    /// Number of weekend dates.
    pub weekend_dates: usize,
    /// Number of weekday dates.
    pub weekday_dates: usize,
}

/// Linear trend and volatility over the chronological date sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    /// Sign of the coefficient.
    pub direction: TrendDirection,
    /// OLS slope against date index divided by the mean price.
    pub coefficient: f64,
    /// `|coefficient|`.
    pub strength: f64,
    /// Mean absolute adjacent change divided by the mean price.
    pub volatility: f64,
}

/// Statistics derived from one quote set.
///
/// Constructed by [`analyze`]; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStatistics {
    /// Cheapest date.
    pub cheapest: DatePrice,
    /// Most expensive date.
    pub most_expensive: DatePrice,
    /// Unrounded mean of per-date prices. All threshold maths uses this.
    pub mean_price: f64,
    /// Mean rounded to the nearest currency unit, for display.
    pub average_price: i64,
    /// `most_expensive - cheapest`.
    pub price_range: f64,
    /// Distribution of per-date prices.
    pub distribution: PriceDistribution,
    /// Weekend/weekday split; absent unless requested and both groups exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekend_vs_weekday: Option<WeekendSplit>,
    /// Trend and volatility.
    pub trend: TrendAnalysis,
    /// Number of distinct dates.
    pub date_count: usize,
    /// Number of quotes analyzed.
    pub quote_count: usize,
    /// Currency of the first quote.
    pub currency: Currency,
    /// Per-date minimums in chronological order.
    pub date_prices: Vec<DatePrice>,
}

/// Reduces quotes to one [`DatePrice`] per date, chronologically ordered.
///
/// Equal minimums keep the quote that appears first in `quotes`.
#[must_use]
pub fn per_date_minimums(quotes: &[Quote]) -> Vec<DatePrice> {
    let mut by_date: BTreeMap<NaiveDate, DatePrice> = BTreeMap::new();
    for quote in quotes {
        match by_date.entry(quote.date()) {
            Entry::Vacant(slot) => {
                slot.insert(DatePrice::from_quote(quote));
            }
            Entry::Occupied(mut slot) => {
                if quote.price() < slot.get().price {
                    slot.insert(DatePrice::from_quote(quote));
                }
            }
        }
    }
    by_date.into_values().collect()
}

/// Computes price statistics for a quote set.
///
/// # Arguments
///
/// * `quotes` - Quotes to analyze, in any order
/// * `include_weekend_analysis` - Whether to compute the weekend split
///
/// # Errors
///
/// Returns `AnalysisError::EmptyInput` if `quotes` is empty.
pub fn analyze(
    quotes: &[Quote],
    include_weekend_analysis: bool,
) -> AnalysisResult<PriceStatistics> {
    let currency = report_currency(quotes).ok_or(AnalysisError::EmptyInput)?;
    let date_prices = per_date_minimums(quotes);

    let (cheapest, most_expensive) = extremes(&date_prices).ok_or(AnalysisError::EmptyInput)?;
    let prices: Vec<f64> = date_prices.iter().map(|dp| dp.price.as_f64()).collect();
    let mean_price = mean(&prices);

    let weekend_vs_weekday = if include_weekend_analysis {
        weekend_split(&date_prices)
    } else {
        None
    };

    Ok(PriceStatistics {
        price_range: most_expensive.price.as_f64() - cheapest.price.as_f64(),
        cheapest,
        most_expensive,
        mean_price,
        average_price: mean_price.round() as i64,
        distribution: distribution(&prices, mean_price),
        weekend_vs_weekday,
        trend: trend(&prices, mean_price),
        date_count: date_prices.len(),
        quote_count: quotes.len(),
        currency,
        date_prices,
    })
}

/// Currency of the cheapest quote, the lower code winning a price tie.
///
/// Prices are not converted, so a mixed-currency set is logged.
fn report_currency(quotes: &[Quote]) -> Option<Currency> {
    let currency = quotes
        .iter()
        .min_by(|a, b| {
            a.price()
                .cmp(&b.price())
                .then_with(|| a.currency().cmp(b.currency()))
        })?
        .currency()
        .clone();

    let mixed = quotes.iter().any(|q| *q.currency() != currency);
    if mixed {
        let mut seen: Vec<&str> = quotes.iter().map(|q| q.currency().as_str()).collect();
        seen.sort_unstable();
        seen.dedup();
        tracing::warn!(
            currency = %currency,
            currencies = %seen.join(","),
            quotes = quotes.len(),
            "quotes mix currencies; prices are compared unconverted"
        );
    }
    Some(currency)
}

/// Cheapest and most expensive entries; strict comparison keeps the earliest date.
fn extremes(date_prices: &[DatePrice]) -> Option<(DatePrice, DatePrice)> {
    let mut iter = date_prices.iter();
    let first = iter.next()?;
    let (mut low, mut high) = (first, first);
    for dp in iter {
        if dp.price < low.price {
            low = dp;
        }
        if dp.price > high.price {
            high = dp;
        }
    }
    Some((low.clone(), high.clone()))
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let Some(last) = sorted.len().checked_sub(1) else {
        return 0.0;
    };
    let idx = ((sorted.len() as f64) * q).floor() as usize;
    sorted.get(idx.min(last)).copied().unwrap_or(0.0)
}

fn distribution(prices: &[f64], mean_price: f64) -> PriceDistribution {
    let mut sorted = prices.to_vec();
    sorted.sort_by(f64::total_cmp);

    let variance = if sorted.is_empty() {
        0.0
    } else {
        sorted
            .iter()
            .map(|p| (p - mean_price).powi(2))
            .sum::<f64>()
            / sorted.len() as f64
    };

    PriceDistribution {
        min: sorted.first().copied().unwrap_or(0.0),
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted.last().copied().unwrap_or(0.0),
        std_dev: variance.sqrt(),
    }
}

fn weekend_split(date_prices: &[DatePrice]) -> Option<WeekendSplit> {
    let (weekend, weekday): (Vec<&DatePrice>, Vec<&DatePrice>) =
        date_prices.iter().partition(|dp| is_weekend(dp.date));
    if weekend.is_empty() || weekday.is_empty() {
        return None;
    }

    let avg_weekend = mean(&weekend.iter().map(|dp| dp.price.as_f64()).collect::<Vec<_>>());
    let avg_weekday = mean(&weekday.iter().map(|dp| dp.price.as_f64()).collect::<Vec<_>>());
    if avg_weekday <= 0.0 {
        return None;
    }

    Some(WeekendSplit {
        avg_weekend,
        avg_weekday,
        premium_percent: ((avg_weekend - avg_weekday) / avg_weekday * 100.0).round() as i64,
        weekend_dates: weekend.len(),
        weekday_dates: weekday.len(),
    })
}

/// Trend over chronologically ordered prices, regressed on index `0..n-1`.
fn trend(prices: &[f64], mean_price: f64) -> TrendAnalysis {
    let n = prices.len();
    if n < 2 || mean_price <= 0.0 {
        return TrendAnalysis::default();
    }

    let x_mean = (n as f64 - 1.0) / 2.0;
    let (mut covariance, mut x_variance) = (0.0, 0.0);
    for (i, price) in prices.iter().enumerate() {
        let dx = i as f64 - x_mean;
        covariance += dx * (price - mean_price);
        x_variance += dx * dx;
    }
    let slope = covariance / x_variance;
    let coefficient = slope / mean_price;

    let total_change: f64 = prices
        .windows(2)
        .map(|pair| match pair {
            [a, b] => (b - a).abs(),
            _ => 0.0,
        })
        .sum();
    let volatility = total_change / (n - 1) as f64 / mean_price;

    TrendAnalysis {
        direction: TrendDirection::from_coefficient(coefficient),
        coefficient,
        strength: coefficient.abs(),
        volatility,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::value_objects::CabinClass;
    use proptest::prelude::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, d).unwrap()
    }

    fn quote(d: u32, source: &str, price: f64) -> Quote {
        Quote::new(
            date(d),
            SourceId::new(source),
            CabinClass::Economy,
            Price::new(price).unwrap(),
            Currency::usd(),
        )
    }

    fn priced_in(d: u32, source: &str, price: f64, currency: &str) -> Quote {
        Quote::new(
            date(d),
            SourceId::new(source),
            CabinClass::Economy,
            Price::new(price).unwrap(),
            Currency::new(currency).unwrap(),
        )
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    mod reduction {
        use super::*;

        #[test]
        fn keeps_minimum_per_date() {
            let quotes = vec![quote(1, "a", 100.0), quote(1, "b", 400.0), quote(2, "a", 250.0)];
            let stats = analyze(&quotes, false).unwrap();

            assert_eq!(stats.date_count, 2);
            assert_eq!(stats.quote_count, 3);
            assert_eq!(stats.cheapest.date, date(1));
            assert!(approx(stats.cheapest.price.as_f64(), 100.0));
            assert_eq!(stats.most_expensive.date, date(2));
            assert!(approx(stats.most_expensive.price.as_f64(), 250.0));
            assert_eq!(stats.average_price, 175);
            assert!(approx(stats.price_range, 150.0));
        }

        #[test]
        fn equal_minimum_keeps_first_source() {
            let quotes = vec![quote(1, "zeta", 120.0), quote(1, "alpha", 120.0)];
            let minimums = per_date_minimums(&quotes);
            assert_eq!(minimums.len(), 1);
            assert_eq!(minimums[0].source.as_str(), "zeta");

            let reversed: Vec<Quote> = quotes.into_iter().rev().collect();
            assert_eq!(per_date_minimums(&reversed)[0].source.as_str(), "alpha");
        }

        #[test]
        fn minimums_are_chronological() {
            let quotes = vec![quote(3, "a", 1.0), quote(1, "a", 2.0), quote(2, "a", 3.0)];
            let dates: Vec<NaiveDate> = per_date_minimums(&quotes).iter().map(|d| d.date).collect();
            assert_eq!(dates, vec![date(1), date(2), date(3)]);
        }
    }

    mod extremes {
        use super::*;

        #[test]
        fn scenario_first_three_days_of_december() {
            let quotes = vec![quote(1, "a", 100.0), quote(2, "a", 400.0), quote(3, "a", 250.0)];
            let stats = analyze(&quotes, true).unwrap();

            assert_eq!(stats.cheapest.date, date(1));
            assert!(approx(stats.cheapest.price.as_f64(), 100.0));
            assert_eq!(stats.most_expensive.date, date(2));
            assert!(approx(stats.most_expensive.price.as_f64(), 400.0));
            assert_eq!(stats.average_price, 250);
            assert!(approx(stats.price_range, 300.0));
        }

        #[test]
        fn ties_resolve_to_earliest_date() {
            let quotes = vec![
                quote(4, "a", 300.0),
                quote(3, "a", 100.0),
                quote(2, "a", 300.0),
                quote(1, "a", 100.0),
            ];
            let stats = analyze(&quotes, false).unwrap();
            assert_eq!(stats.cheapest.date, date(1));
            assert_eq!(stats.most_expensive.date, date(2));
        }

        #[test]
        fn single_quote() {
            let stats = analyze(&[quote(5, "a", 99.0)], true).unwrap();
            assert_eq!(stats.cheapest, stats.most_expensive);
            assert!(approx(stats.price_range, 0.0));
            assert_eq!(stats.trend, TrendAnalysis::default());
        }
    }

    mod currency {
        use super::*;

        #[test]
        fn follows_cheapest_quote_in_any_order() {
            let forward = vec![priced_in(1, "a", 100.0, "USD"), priced_in(2, "b", 120.0, "EUR")];
            let reversed: Vec<Quote> = forward.iter().rev().cloned().collect();

            let a = analyze(&forward, false).unwrap();
            let b = analyze(&reversed, false).unwrap();
            assert_eq!(a.currency, Currency::usd());
            assert_eq!(a.currency, b.currency);
        }

        #[test]
        fn price_tie_picks_lower_code() {
            let quotes = vec![priced_in(1, "a", 100.0, "USD"), priced_in(1, "b", 100.0, "EUR")];
            assert_eq!(analyze(&quotes, false).unwrap().currency.as_str(), "EUR");
        }
    }

    mod average {
        use super::*;

        #[test]
        fn display_is_rounded_mean_is_not() {
            let quotes = vec![quote(1, "a", 100.0), quote(2, "a", 101.0)];
            let stats = analyze(&quotes, false).unwrap();
            assert!(approx(stats.mean_price, 100.5));
            assert_eq!(stats.average_price, 101);
        }

        #[test]
        fn empty_input_is_rejected() {
            assert_eq!(analyze(&[], true), Err(AnalysisError::EmptyInput));
        }
    }

    mod distribution {
        use super::*;

        #[test]
        fn floor_index_quartiles() {
            let quotes = vec![
                quote(1, "a", 40.0),
                quote(2, "a", 10.0),
                quote(3, "a", 30.0),
                quote(4, "a", 20.0),
            ];
            let d = analyze(&quotes, false).unwrap().distribution;
            assert!(approx(d.min, 10.0));
            assert!(approx(d.q25, 20.0));
            assert!(approx(d.median, 30.0));
            assert!(approx(d.q75, 40.0));
            assert!(approx(d.max, 40.0));
        }

        #[test]
        fn population_std_dev() {
            let quotes: Vec<Quote> = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
                .iter()
                .zip(1u32..)
                .map(|(p, d)| quote(d, "a", *p))
                .collect();
            let d = analyze(&quotes, false).unwrap().distribution;
            assert!(approx(d.std_dev, 2.0));
        }

        #[test]
        fn single_value() {
            let d = analyze(&[quote(1, "a", 50.0)], false).unwrap().distribution;
            assert!(approx(d.q25, 50.0));
            assert!(approx(d.q75, 50.0));
            assert!(approx(d.std_dev, 0.0));
        }
    }

    mod weekend {
        use super::*;

        // 2024-12-01 is a Sunday, 2024-12-02..06 are weekdays.
        #[test]
        fn premium_is_rounded_percentage() {
            let quotes = vec![quote(1, "a", 150.0), quote(2, "a", 100.0), quote(3, "a", 100.0)];
            let split = analyze(&quotes, true).unwrap().weekend_vs_weekday.unwrap();
            assert!(approx(split.avg_weekend, 150.0));
            assert!(approx(split.avg_weekday, 100.0));
            assert_eq!(split.premium_percent, 50);
            assert_eq!(split.weekend_dates, 1);
            assert_eq!(split.weekday_dates, 2);
        }

        #[test]
        fn absent_when_only_weekdays() {
            let quotes = vec![quote(2, "a", 100.0), quote(3, "a", 120.0)];
            let stats = analyze(&quotes, true).unwrap();
            assert!(stats.weekend_vs_weekday.is_none());
            let json = serde_json::to_value(&stats).unwrap();
            assert!(json.get("weekend_vs_weekday").is_none());
        }

        #[test]
        fn absent_when_not_requested() {
            let quotes = vec![quote(1, "a", 150.0), quote(2, "a", 100.0)];
            assert!(analyze(&quotes, false).unwrap().weekend_vs_weekday.is_none());
        }

        #[test]
        fn absent_when_weekday_average_is_zero() {
            let quotes = vec![quote(1, "a", 150.0), quote(2, "a", 0.0)];
            assert!(analyze(&quotes, true).unwrap().weekend_vs_weekday.is_none());
        }
    }

    mod trend {
        use super::*;

        #[test]
        fn increasing_prices() {
            let quotes = vec![
                quote(1, "a", 100.0),
                quote(2, "a", 150.0),
                quote(3, "a", 200.0),
                quote(4, "a", 250.0),
            ];
            let t = analyze(&quotes, false).unwrap().trend;
            assert_eq!(t.direction, TrendDirection::Increasing);
            assert!(t.strength > 0.0);
            assert!(approx(t.coefficient, 50.0 / 175.0));
            assert!(approx(t.volatility, 50.0 / 175.0));
        }

        #[test]
        fn decreasing_prices() {
            let quotes = vec![quote(1, "a", 300.0), quote(2, "a", 200.0), quote(3, "a", 100.0)];
            let t = analyze(&quotes, false).unwrap().trend;
            assert_eq!(t.direction, TrendDirection::Decreasing);
            assert!(t.coefficient < 0.0);
            assert!(approx(t.strength, 0.5));
        }

        #[test]
        fn constant_prices_are_stable() {
            let quotes = vec![quote(1, "a", 180.0), quote(2, "a", 180.0), quote(3, "a", 180.0)];
            let t = analyze(&quotes, false).unwrap().trend;
            assert_eq!(t.direction, TrendDirection::Stable);
            assert_eq!(t.strength, 0.0);
            assert_eq!(t.volatility, 0.0);
        }

        #[test]
        fn uses_index_not_calendar_gap() {
            let even = vec![quote(1, "a", 100.0), quote(2, "a", 200.0), quote(3, "a", 300.0)];
            let uneven = vec![quote(1, "a", 100.0), quote(2, "a", 200.0), quote(20, "a", 300.0)];
            let a = analyze(&even, false).unwrap().trend;
            let b = analyze(&uneven, false).unwrap().trend;
            assert_eq!(a, b);
        }

        #[test]
        fn input_order_does_not_matter() {
            let quotes = vec![quote(3, "a", 250.0), quote(1, "a", 100.0), quote(2, "a", 150.0)];
            let t = analyze(&quotes, false).unwrap().trend;
            assert_eq!(t.direction, TrendDirection::Increasing);
        }
    }

    fn quote_set() -> impl Strategy<Value = Vec<Quote>> {
        prop::collection::vec((1u32..=28, 0usize..3, 0u32..2000, 0usize..2), 1..40).prop_map(
            |rows| {
                rows.into_iter()
                    .map(|(d, s, p, c)| {
                        priced_in(d, ["alpha", "beta", "gamma"][s], f64::from(p), ["USD", "EUR"][c])
                    })
                    .collect()
            },
        )
    }

    fn date_price_pairs(stats: &PriceStatistics) -> Vec<(NaiveDate, Price)> {
        stats.date_prices.iter().map(|dp| (dp.date, dp.price)).collect()
    }

    proptest! {
        #[test]
        fn analysis_is_order_independent(
            (quotes, shuffled) in quote_set().prop_flat_map(|q| (Just(q.clone()), Just(q).prop_shuffle()))
        ) {
            let a = analyze(&quotes, true).unwrap();
            let b = analyze(&shuffled, true).unwrap();

            prop_assert_eq!(a.cheapest.date, b.cheapest.date);
            prop_assert_eq!(a.cheapest.price, b.cheapest.price);
            prop_assert_eq!(a.most_expensive.date, b.most_expensive.date);
            prop_assert_eq!(a.most_expensive.price, b.most_expensive.price);
            prop_assert_eq!(a.mean_price.to_bits(), b.mean_price.to_bits());
            prop_assert_eq!(a.average_price, b.average_price);
            prop_assert_eq!(a.price_range.to_bits(), b.price_range.to_bits());
            prop_assert_eq!(a.distribution, b.distribution);
            prop_assert_eq!(a.weekend_vs_weekday, b.weekend_vs_weekday);
            prop_assert_eq!(a.trend, b.trend);
            prop_assert_eq!(&a.currency, &b.currency);
            prop_assert_eq!(date_price_pairs(&a), date_price_pairs(&b));
        }

        #[test]
        fn analysis_is_deterministic(quotes in quote_set()) {
            let a = analyze(&quotes, true).unwrap();
            let b = analyze(&quotes, true).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn cheapest_never_exceeds_mean(quotes in quote_set()) {
            let stats = analyze(&quotes, false).unwrap();
            prop_assert!(stats.cheapest.price.as_f64() <= stats.mean_price + 1e-9);
            prop_assert!(stats.most_expensive.price.as_f64() >= stats.mean_price - 1e-9);
            prop_assert!(stats.price_range >= 0.0);
        }
    }
}
