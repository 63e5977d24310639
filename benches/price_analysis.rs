#![allow(missing_docs, clippy::unwrap_used)]

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fare_radar::application::services::{RankingStrategy, strategy_for};
use fare_radar::domain::entities::Quote;
use fare_radar::domain::services::{
    AnalysisProfile, DealRanking, SourceBreakdown, analyze, recommend,
};
use fare_radar::domain::value_objects::calendar::month_dates;
use fare_radar::domain::value_objects::{CabinClass, Currency, Price, SourceId};
use std::hint::black_box;

const SOURCES: [&str; 3] = ["amadeus", "kayak", "skyscanner"];

/// One month of quotes, `flights` per (date, source) pair.
fn month_of_quotes(flights: usize) -> Vec<Quote> {
    let dates = month_dates(2024, 12).unwrap();
    let mut quotes = Vec::with_capacity(dates.len() * SOURCES.len() * flights);
    for (d, date) in dates.iter().enumerate() {
        for (s, source) in SOURCES.iter().enumerate() {
            for f in 0..flights {
                let price = 180.0 + ((d * 37 + s * 11 + f * 23) % 160) as f64;
                quotes.push(Quote::new(
                    *date,
                    SourceId::new(*source),
                    CabinClass::Economy,
                    Price::new(price).unwrap(),
                    Currency::usd(),
                ));
            }
        }
    }
    quotes
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    for flights in [1, 3, 10] {
        let quotes = month_of_quotes(flights);
        group.bench_with_input(BenchmarkId::from_parameter(quotes.len()), &quotes, |b, q| {
            b.iter(|| analyze(black_box(q), true).unwrap());
        });
    }
    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let quotes = month_of_quotes(3);
    let profile = AnalysisProfile::monthly();

    c.bench_function("monthly_report", |b| {
        b.iter(|| {
            let stats = analyze(black_box(&quotes), profile.include_weekend_analysis).unwrap();
            let breakdown = SourceBreakdown::from_quotes(&quotes);
            let advice = recommend(&stats, &breakdown, &profile);
            let deals = strategy_for(DealRanking::CheapestPerDate).rank(&quotes);
            (advice.len(), deals.len())
        });
    });
}

criterion_group!(benches, bench_analyze, bench_report);
criterion_main!(benches);
