//! Integration tests for signal history analysis

use chrono::{DateTime, Duration, TimeZone, Utc};
use gem_signal::history::{analyze, analyze_at, HistoryError, HistoryRecord, SignalChangeReport};
use gem_signal::momentum::{Region, RoleMap};

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 1, 21, 0, 0).unwrap() + Duration::days(n)
}

fn record(signal: &str, n: i64) -> HistoryRecord {
    HistoryRecord::new(day(n), Region::Us, RoleMap::default(), signal)
}

#[test]
fn test_empty_history_summary() {
    let report = analyze(&[], Region::Us).unwrap();
    let json = serde_json::to_value(report.summary()).unwrap();
    assert_eq!(json, serde_json::json!({ "has_history": false }));
}

#[test]
fn test_single_record_summary() {
    let report = analyze(&[record("BND", 0)], Region::Us).unwrap();
    let summary = report.summary();

    assert!(summary.has_history);
    assert_eq!(summary.current_signal.as_deref(), Some("BND"));
    assert_eq!(summary.days_since_change, Some(0));
    assert_eq!(summary.no_change_in_history, Some(true));
    assert!(summary.previous_signal.is_none());
}

#[test]
fn test_regime_change_walkthrough() {
    let records = vec![
        record("SPY", 10),
        record("SPY", 9),
        record("VEU", 8),
        record("VEU", 7),
        record("BND", 6),
    ];

    let report = analyze_at(&records, Region::Us, day(10)).unwrap();
    let summary = report.summary();

    assert_eq!(summary.current_signal.as_deref(), Some("SPY"));
    assert_eq!(summary.previous_signal.as_deref(), Some("VEU"));
    assert_eq!(summary.last_change_date, Some(day(9).to_rfc3339()));
    assert_eq!(summary.days_since_change, Some(1));
    assert_eq!(summary.previous_signal_duration_days, Some(1));
    assert_eq!(summary.no_change_in_history, Some(false));
}

#[test]
fn test_unsorted_input_is_rejected() {
    let records = vec![record("SPY", 1), record("SPY", 3), record("SPY", 2)];
    assert_eq!(
        analyze(&records, Region::Us),
        Err(HistoryError::NotDescending { index: 1 })
    );
}

#[test]
fn test_stable_history() {
    let records: Vec<HistoryRecord> = (0..30).rev().map(|n| record("VEU", n)).collect();
    let report = analyze_at(&records, Region::Us, day(45)).unwrap();

    match report {
        SignalChangeReport::StableRegime {
            days_since_change,
            record_count,
            ..
        } => {
            assert_eq!(days_since_change, 45);
            assert_eq!(record_count, 30);
        }
        other => panic!("unexpected report: {:?}", other),
    }
}
