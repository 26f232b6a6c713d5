//! Benchmarks for momentum computation and history analysis

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gem_signal::history::{analyze_at, HistoryRecord};
use gem_signal::momentum::{MomentumEngine, PricePoint, PriceSeries, Region, RoleMap};

fn two_year_series(symbol: &str, drift: f64) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2023, 1, 2, 21, 0, 0).unwrap();
    PriceSeries::new(
        symbol,
        (0..504)
            .map(|i| PricePoint::new(start + Duration::days(i), 100.0 * (1.0 + drift * i as f64)))
            .collect(),
    )
}

fn benchmark_compute(c: &mut Criterion) {
    let engine = MomentumEngine::default();
    let us = Region::Us.config();
    let input = RoleMap::new(
        two_year_series("SPY", 0.001),
        two_year_series("VEU", 0.0008),
        two_year_series("BND", 0.0001),
        two_year_series("^IRX", 0.0),
    );

    c.bench_function("momentum_compute", |b| {
        b.iter(|| engine.compute(black_box(us), black_box(&input)))
    });
}

fn benchmark_analyze(c: &mut Criterion) {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 21, 0, 0).unwrap();
    let records: Vec<HistoryRecord> = (0..1000)
        .rev()
        .map(|i| {
            let signal = if i > 900 { "SPY" } else if i > 400 { "VEU" } else { "BND" };
            HistoryRecord::new(start + Duration::days(i), Region::Us, RoleMap::default(), signal)
        })
        .collect();
    let now = start + Duration::days(1000);

    c.bench_function("analyze_history", |b| {
        b.iter(|| analyze_at(black_box(&records), Region::Us, now))
    });
}

criterion_group!(benches, benchmark_compute, benchmark_analyze);
criterion_main!(benches);
