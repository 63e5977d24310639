//! # Recommendation Generator
//!
//! Turns [`PriceStatistics`] into ordered, human-facing advice.
//!
//! Rules are evaluated independently and appended in a fixed priority
//! order. A rule whose condition does not hold contributes nothing; no
//! rule can fail, and output is never reordered or deduplicated.
//!
//! | # | Group | Rule |
//! |---|-------|------|
//! | 1 | outliers | deal alert: `cheapest < mean * deal_ratio` |
//! | 2 | outliers | overpriced date: `most_expensive > mean * overpriced_ratio` |
//! | 3 | sources | best source at least `source_margin` below the mean |
//! | 4 | sources | worse source at least `source_margin` above the mean |
//! | 5 | temporal | weekend premium above/below the profile bounds |
//! | 6 | temporal | `|trend| > trend_threshold` |
//! | 7 | general | `range > mean * high_variation_ratio` |
//! | 8 | general | more than `volume_threshold` dates searched |
//!
//! Source rules need at least two sources. Rule 4 only runs when the
//! profile sets `report_worst_source`.

use crate::domain::services::price_analysis::PriceStatistics;
use crate::domain::services::profile::AnalysisProfile;
use crate::domain::services::source_breakdown::SourceBreakdown;
use crate::domain::value_objects::TrendDirection;

/// Produces advice for one analysis, highest priority first.
///
/// Treats every analyzed date as a searched date. Use
/// [`recommend_for_search`] when some searched dates returned no fares.
///
/// Pure: the same inputs always yield the same output.
#[must_use]
pub fn recommend(
    stats: &PriceStatistics,
    sources: &SourceBreakdown,
    profile: &AnalysisProfile,
) -> Vec<String> {
    recommend_for_search(stats, sources, profile, stats.date_count)
}

/// Like [`recommend`], with the volume rule applied to `dates_searched`
/// distinct requested dates rather than the dates that returned fares.
#[must_use]
pub fn recommend_for_search(
    stats: &PriceStatistics,
    sources: &SourceBreakdown,
    profile: &AnalysisProfile,
    dates_searched: usize,
) -> Vec<String> {
    let rules: [Option<String>; 8] = [
        deal_alert(stats, profile),
        overpriced_warning(stats, profile),
        best_source(stats, sources, profile),
        worse_source(stats, sources, profile),
        weekend_note(stats, profile),
        trend_note(stats, profile),
        variation_note(stats, profile),
        volume_note(dates_searched, profile),
    ];
    rules.into_iter().flatten().collect()
}

fn percent_of_mean(value: f64, mean: f64) -> f64 {
    if mean <= 0.0 {
        return 0.0;
    }
    ((value - mean) / mean * 100.0).abs()
}

fn deal_alert(stats: &PriceStatistics, profile: &AnalysisProfile) -> Option<String> {
    let cheapest = stats.cheapest.price.as_f64();
    if cheapest >= stats.mean_price * profile.deal_ratio {
        return None;
    }
    Some(format!(
        "Deal alert: {} at {} {} is {:.0}% below the average fare of {} {} (via {})",
        stats.cheapest.date,
        stats.cheapest.price,
        stats.currency,
        percent_of_mean(cheapest, stats.mean_price),
        stats.average_price,
        stats.currency,
        stats.cheapest.source,
    ))
}

fn overpriced_warning(stats: &PriceStatistics, profile: &AnalysisProfile) -> Option<String> {
    let dearest = stats.most_expensive.price.as_f64();
    if dearest <= stats.mean_price * profile.overpriced_ratio {
        return None;
    }
    Some(format!(
        "Avoid {}: at {} {} it is {:.0}% above the average fare",
        stats.most_expensive.date,
        stats.most_expensive.price,
        stats.currency,
        percent_of_mean(dearest, stats.mean_price),
    ))
}

fn best_source(
    stats: &PriceStatistics,
    sources: &SourceBreakdown,
    profile: &AnalysisProfile,
) -> Option<String> {
    if sources.len() < 2 {
        return None;
    }
    let best = sources.best()?;
    if best.average_price > stats.mean_price * (1.0 - profile.source_margin) {
        return None;
    }
    Some(format!(
        "{} has the lowest fares on average ({:.0} {}, {:.0}% below the overall average)",
        best.source,
        best.average_price,
        stats.currency,
        percent_of_mean(best.average_price, stats.mean_price),
    ))
}

fn worse_source(
    stats: &PriceStatistics,
    sources: &SourceBreakdown,
    profile: &AnalysisProfile,
) -> Option<String> {
    if !profile.report_worst_source || sources.len() < 2 {
        return None;
    }
    let worst = sources.worst()?;
    if worst.average_price < stats.mean_price * (1.0 + profile.source_margin) {
        return None;
    }
    Some(format!(
        "{} runs {:.0}% above the overall average ({:.0} {}); compare before booking there",
        worst.source,
        percent_of_mean(worst.average_price, stats.mean_price),
        worst.average_price,
        stats.currency,
    ))
}

fn weekend_note(stats: &PriceStatistics, profile: &AnalysisProfile) -> Option<String> {
    let premium = stats.weekend_vs_weekday?.premium_percent;
    if premium > profile.weekend_expensive_percent {
        Some(format!(
            "Weekend departures cost {premium}% more than weekdays; fly Monday to Friday to save"
        ))
    } else if premium < profile.weekend_cheaper_percent {
        Some(format!(
            "Weekend departures are {}% cheaper than weekdays; consider a Saturday or Sunday",
            premium.unsigned_abs()
        ))
    } else {
        None
    }
}

fn trend_note(stats: &PriceStatistics, profile: &AnalysisProfile) -> Option<String> {
    let trend = &stats.trend;
    if trend.strength <= profile.trend_threshold {
        return None;
    }
    let strength = trend.strength * 100.0;
    match trend.direction {
        TrendDirection::Increasing => Some(format!(
            "Fares climb across the searched dates (trend +{strength:.0}%); earlier departures are better value"
        )),
        TrendDirection::Decreasing => Some(format!(
            "Fares fall across the searched dates (trend -{strength:.0}%); later departures are better value"
        )),
        TrendDirection::Stable => None,
    }
}

fn variation_note(stats: &PriceStatistics, profile: &AnalysisProfile) -> Option<String> {
    if stats.price_range <= stats.mean_price * profile.high_variation_ratio {
        return None;
    }
    Some(format!(
        "Fares vary widely ({:.0} {} between the cheapest and dearest date); flexible dates pay off",
        stats.price_range, stats.currency,
    ))
}

fn volume_note(dates_searched: usize, profile: &AnalysisProfile) -> Option<String> {
    if dates_searched <= profile.volume_threshold {
        return None;
    }
    Some(format!(
        "{dates_searched} dates compared; the ranked deals below list the best options"
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::quote::Quote;
    use crate::domain::services::price_analysis::analyze;
    use crate::domain::value_objects::{CabinClass, Currency, Price, SourceId};
    use chrono::NaiveDate;

    fn quote(month: u32, day: u32, source: &str, price: f64) -> Quote {
        Quote::new(
            NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
            SourceId::new(source),
            CabinClass::Economy,
            Price::new(price).unwrap(),
            Currency::usd(),
        )
    }

    fn advise(quotes: &[Quote], profile: &AnalysisProfile) -> Vec<String> {
        let stats = analyze(quotes, profile.include_weekend_analysis).unwrap();
        recommend(&stats, &SourceBreakdown::from_quotes(quotes), profile)
    }

    fn has(lines: &[String], prefix: &str) -> bool {
        lines.iter().any(|l| l.starts_with(prefix))
    }

    mod deal_alert {
        use super::*;

        #[test]
        fn scenario_triggers_alert() {
            let quotes = [quote(12, 2, "a", 100.0), quote(12, 3, "a", 400.0), quote(12, 4, "a", 250.0)];
            let lines = advise(&quotes, &AnalysisProfile::multi_date());
            assert!(!lines.is_empty());
            assert!(lines[0].starts_with("Deal alert: 2024-12-02"));
        }

        #[test]
        fn exactly_eighty_percent_does_not_trigger() {
            let quotes = [quote(12, 2, "a", 80.0), quote(12, 3, "a", 120.0)];
            let lines = advise(&quotes, &AnalysisProfile::multi_date());
            assert!(!has(&lines, "Deal alert"));
        }

        #[test]
        fn just_below_eighty_percent_triggers() {
            let quotes = [quote(12, 2, "a", 79.99), quote(12, 3, "a", 120.01)];
            let lines = advise(&quotes, &AnalysisProfile::multi_date());
            assert!(has(&lines, "Deal alert"));
        }
    }

    mod overpriced {
        use super::*;

        #[test]
        fn warns_about_outlier() {
            let quotes = [
                quote(12, 2, "a", 100.0),
                quote(12, 3, "a", 100.0),
                quote(12, 4, "a", 100.0),
                quote(12, 5, "a", 200.0),
            ];
            let lines = advise(&quotes, &AnalysisProfile::multi_date());
            assert!(has(&lines, "Avoid 2024-12-05"));
        }
    }

    mod sources {
        use super::*;

        fn two_sources() -> Vec<Quote> {
            vec![
                quote(12, 2, "cheapair", 100.0),
                quote(12, 2, "pricey", 160.0),
                quote(12, 3, "cheapair", 110.0),
                quote(12, 3, "pricey", 170.0),
                quote(12, 4, "pricey", 300.0),
            ]
        }

        #[test]
        fn multi_date_reports_best_and_worse() {
            let lines = advise(&two_sources(), &AnalysisProfile::multi_date());
            assert!(has(&lines, "cheapair has the lowest fares"));
            assert!(has(&lines, "pricey runs"));
        }

        #[test]
        fn monthly_reports_best_only() {
            let lines = advise(&two_sources(), &AnalysisProfile::monthly());
            assert!(has(&lines, "cheapair has the lowest fares"));
            assert!(!has(&lines, "pricey runs"));
        }

        #[test]
        fn single_source_gets_no_comparison() {
            let quotes = [quote(12, 2, "solo", 100.0), quote(12, 3, "solo", 300.0)];
            let lines = advise(&quotes, &AnalysisProfile::multi_date());
            assert!(!lines.iter().any(|l| l.contains("lowest fares") || l.contains(" runs ")));
        }

        #[test]
        fn source_lines_follow_outlier_lines() {
            let lines = advise(&two_sources(), &AnalysisProfile::multi_date());
            let deal = lines.iter().position(|l| l.starts_with("Deal alert")).unwrap();
            let best = lines.iter().position(|l| l.contains("lowest fares")).unwrap();
            assert!(deal < best);
        }
    }

    mod weekend {
        use super::*;

        // 2024-12-07/08 are Saturday/Sunday.
        #[test]
        fn expensive_weekends() {
            let quotes = [quote(12, 6, "a", 100.0), quote(12, 7, "a", 130.0)];
            let lines = advise(&quotes, &AnalysisProfile::multi_date());
            assert!(has(&lines, "Weekend departures cost 30% more"));
        }

        #[test]
        fn cheaper_weekends() {
            let quotes = [quote(12, 6, "a", 100.0), quote(12, 7, "a", 85.0)];
            let lines = advise(&quotes, &AnalysisProfile::multi_date());
            assert!(has(&lines, "Weekend departures are 15% cheaper"));
        }

        #[test]
        fn asymmetric_bounds_leave_gap() {
            // +15% is below the expensive bound, -5% above the cheaper bound.
            let up = [quote(12, 6, "a", 100.0), quote(12, 7, "a", 115.0)];
            let down = [quote(12, 6, "a", 100.0), quote(12, 7, "a", 95.0)];
            let profile = AnalysisProfile::multi_date();
            assert!(!has(&advise(&up, &profile), "Weekend"));
            assert!(!has(&advise(&down, &profile), "Weekend"));
        }

        #[test]
        fn disabled_weekend_analysis_is_silent() {
            let quotes = [quote(12, 6, "a", 100.0), quote(12, 7, "a", 200.0)];
            let profile = AnalysisProfile::multi_date().with_weekend_analysis(false);
            assert!(!has(&advise(&quotes, &profile), "Weekend"));
        }
    }

    mod trend {
        use super::*;

        #[test]
        fn climbing_fares() {
            let quotes = [
                quote(12, 2, "a", 100.0),
                quote(12, 3, "a", 150.0),
                quote(12, 4, "a", 200.0),
                quote(12, 5, "a", 250.0),
            ];
            let lines = advise(&quotes, &AnalysisProfile::multi_date());
            assert!(has(&lines, "Fares climb"));
        }

        #[test]
        fn falling_fares() {
            let quotes = [quote(12, 2, "a", 300.0), quote(12, 3, "a", 200.0), quote(12, 4, "a", 100.0)];
            let lines = advise(&quotes, &AnalysisProfile::multi_date());
            assert!(has(&lines, "Fares fall"));
        }

        #[test]
        fn flat_fares_are_quiet() {
            let quotes = [quote(12, 2, "a", 200.0), quote(12, 3, "a", 201.0), quote(12, 4, "a", 199.0)];
            assert!(advise(&quotes, &AnalysisProfile::multi_date()).is_empty());
        }
    }

    mod general {
        use super::*;

        #[test]
        fn variation_threshold_depends_on_profile() {
            // range 110 on mean 200: above 0.5 * mean, below 0.6 * mean.
            let quotes = [
                quote(12, 2, "a", 145.0),
                quote(12, 3, "a", 255.0),
                quote(12, 4, "a", 200.0),
                quote(12, 5, "a", 200.0),
            ];
            let multi = advise(&quotes, &AnalysisProfile::multi_date());
            let monthly = advise(&quotes, &AnalysisProfile::monthly());
            assert!(has(&multi, "Fares vary widely"));
            assert!(!has(&monthly, "Fares vary widely"));
        }

        #[test]
        fn volume_threshold_depends_on_profile() {
            let quotes: Vec<Quote> = (1..=8).map(|d| quote(1, d, "a", 100.0)).collect();
            let multi = advise(&quotes, &AnalysisProfile::multi_date());
            let monthly = advise(&quotes, &AnalysisProfile::monthly());
            assert!(has(&multi, "8 dates compared"));
            assert!(!has(&monthly, "dates compared"));

            let month: Vec<Quote> = (1..=21).map(|d| quote(1, d, "a", 100.0)).collect();
            assert!(has(&advise(&month, &AnalysisProfile::monthly()), "21 dates compared"));
        }

        #[test]
        fn counts_searched_dates_not_priced_dates() {
            let quotes: Vec<Quote> = (1..=15).map(|d| quote(12, d, "a", 100.0)).collect();
            let stats = analyze(&quotes, true).unwrap();
            let breakdown = SourceBreakdown::from_quotes(&quotes);
            let profile = AnalysisProfile::monthly();

            assert!(!has(&recommend(&stats, &breakdown, &profile), "dates compared"));
            let lines = recommend_for_search(&stats, &breakdown, &profile, 31);
            assert!(has(&lines, "31 dates compared"));
        }

        #[test]
        fn exactly_at_volume_threshold_is_quiet() {
            let quotes: Vec<Quote> = (1..=7).map(|d| quote(1, d, "a", 100.0)).collect();
            assert!(!has(&advise(&quotes, &AnalysisProfile::multi_date()), "7 dates"));
        }
    }

    #[test]
    fn recommend_is_pure() {
        let quotes = [quote(12, 2, "a", 100.0), quote(12, 3, "b", 400.0), quote(12, 4, "a", 250.0)];
        let profile = AnalysisProfile::multi_date();
        assert_eq!(advise(&quotes, &profile), advise(&quotes, &profile));
    }
}
