//! Integration tests for the update pipeline over the Parquet store

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use gem_signal::data::{HistoryStore, ParquetHistoryStore};
use gem_signal::feed::PriceSource;
use gem_signal::history::SignalChangeReport;
use gem_signal::momentum::{MomentumEngine, PricePoint, PriceSeries, Region};
use gem_signal::pipeline::MomentumPipeline;
use tempfile::TempDir;

/// Deterministic trending prices: SPY strongest, rates flat
struct TrendSource;

#[async_trait]
impl PriceSource for TrendSource {
    async fn fetch_series(&self, symbol: &str) -> anyhow::Result<PriceSeries> {
        let slope = match symbol {
            "SPY" => 0.002,
            "VEU" => 0.001,
            "BND" => 0.0001,
            "^IRX" => 0.0,
            _ => anyhow::bail!("unlisted symbol {}", symbol),
        };
        let start = Utc.with_ymd_and_hms(2023, 1, 2, 21, 0, 0).unwrap();
        let points = (0..300)
            .map(|i| PricePoint::new(start + Duration::days(i), 100.0 * (1.0 + slope * i as f64)))
            .collect();
        Ok(PriceSeries::new(symbol, points))
    }
}

#[tokio::test]
async fn test_update_then_changes_with_parquet_store() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = MomentumPipeline::new(
        TrendSource,
        ParquetHistoryStore::new(temp_dir.path()),
        MomentumEngine::default(),
    );

    let first = pipeline.update(Region::Us).await.unwrap();
    assert_eq!(first.signal, "SPY");

    let stored = pipeline.store().recent(Region::Us, None).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, first.id);

    let report = pipeline.changes(Region::Us, None).await.unwrap();
    assert!(matches!(report, SignalChangeReport::SingleRecord { .. }));

    // EU instruments are not listed by this source
    assert!(pipeline.update(Region::Eu).await.is_err());
    assert!(pipeline.history(Region::Eu, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_backfill_into_parquet_store() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = MomentumPipeline::new(
        TrendSource,
        ParquetHistoryStore::new(temp_dir.path()),
        MomentumEngine::default(),
    );

    let summary = pipeline.backfill(Region::Us, 60).await.unwrap();
    assert_eq!(summary.written, 48);
    assert_eq!(summary.skipped_short, 12);

    let records = pipeline.history(Region::Us, Some(10)).await.unwrap();
    assert_eq!(records.len(), 10);
    assert!(records.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    assert!(records.iter().all(|r| r.signal == "SPY"));
}
