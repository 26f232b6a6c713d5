//! Integration tests for the momentum engine

use chrono::{DateTime, Duration, TimeZone, Utc};
use gem_signal::momentum::{MomentumEngine, PricePoint, PriceSeries, Region, Role, RoleMap};

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 1, 3, 21, 0, 0).unwrap() + Duration::days(n)
}

fn series(symbol: &str, len: usize, price: impl Fn(usize) -> f64) -> PriceSeries {
    PriceSeries::new(
        symbol,
        (0..len)
            .map(|i| PricePoint::new(day(i as i64), price(i)))
            .collect(),
    )
}

#[test]
fn test_full_year_momentum_uses_position_len_minus_one_minus_lookback() {
    let engine = MomentumEngine::default();
    let len = 400;
    let spy = series("SPY", len, |i| 300.0 + i as f64);

    let past = 300.0 + (len - 1 - 252) as f64;
    let current = 300.0 + (len - 1) as f64;
    assert_eq!(engine.trailing_return(&spy), current / past - 1.0);
}

#[test]
fn test_compute_us_equity1_wins() {
    let engine = MomentumEngine::default();
    let us = Region::Us.config();
    let input = RoleMap::new(
        series("SPY", 300, |i| 400.0 * (1.0 + 0.0010 * i as f64)),
        series("VEU", 300, |i| 55.0 * (1.0 + 0.0005 * i as f64)),
        series("BND", 300, |_| 72.0),
        series("^IRX", 300, |i| 5.0 + 0.001 * i as f64),
    );

    let snapshot = engine.compute(us, &input).unwrap();

    assert_eq!(snapshot.signal, "SPY");
    assert!(snapshot.momentum.equity1 > snapshot.momentum.equity2);
    assert_eq!(snapshot.momentum.bond, 0.0);
    assert_eq!(snapshot.prices.len(), 4);
    assert!(Role::ALL.iter().all(|r| snapshot.has_full_window(*r)));
    assert_eq!(snapshot.lookback, 252);
}

#[test]
fn test_compute_eu_falls_back_to_bond() {
    let engine = MomentumEngine::default();
    let eu = Region::Eu.config();
    let input = RoleMap::new(
        series("CSPX.AS", 300, |i| 500.0 - 0.5 * i as f64),
        series("EXUS.L", 300, |i| 30.0 - 0.01 * i as f64),
        series("AGGH.AS", 300, |_| 5.0),
        series("PJEU.L", 300, |_| 3.0),
    );

    let snapshot = engine.compute(eu, &input).unwrap();
    assert_eq!(snapshot.signal, "AGGH.AS");
    assert_eq!(snapshot.region, Region::Eu);
}

#[test]
fn test_short_history_reports_partial_window() {
    let engine = MomentumEngine::default();
    let us = Region::Us.config();
    let input = RoleMap::new(
        series("SPY", 100, |i| 100.0 + i as f64),
        series("VEU", 300, |_| 50.0),
        series("BND", 300, |_| 70.0),
        series("^IRX", 300, |_| 4.0),
    );

    let snapshot = engine.compute(us, &input).unwrap();
    assert_eq!(snapshot.momentum.equity1, 199.0 / 100.0 - 1.0);
    assert!(!snapshot.has_full_window(Role::Equity1));
    assert!(snapshot.has_full_window(Role::Equity2));
}
