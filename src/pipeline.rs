//! Update pipeline
//!
//! Wires a price source, the momentum engine and a history store together:
//! fetch -> compute -> persist, and query -> analyze.

use crate::data::HistoryStore;
use crate::feed::PriceSource;
use crate::history::{analyze, HistoryRecord, SignalChangeReport};
use crate::momentum::{
    MomentumEngine, MomentumSnapshot, PriceSeries, Region, RegionConfig, RoleMap,
};
use crate::telemetry;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use std::collections::HashSet;
use std::time::Instant;

/// Outcome of a backfill run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillSummary {
    /// Records persisted
    pub written: usize,
    /// Dates without a full lookback window
    pub skipped_short: usize,
    /// Dates already present in the store
    pub skipped_existing: usize,
}

/// Fetch, compute, persist and analyze signals for a region
pub struct MomentumPipeline<S, H> {
    source: S,
    store: H,
    engine: MomentumEngine,
}

impl<S: PriceSource, H: HistoryStore> MomentumPipeline<S, H> {
    pub fn new(source: S, store: H, engine: MomentumEngine) -> Self {
        Self {
            source,
            store,
            engine,
        }
    }

    pub fn store(&self) -> &H {
        &self.store
    }

    pub fn engine(&self) -> &MomentumEngine {
        &self.engine
    }

    /// Fetch one instrument, degrading any failure to an empty series
    async fn fetch_or_empty(&self, symbol: &str) -> PriceSeries {
        match self.source.fetch_series(symbol).await {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(symbol, error = %e, "Price fetch failed, treating as no data");
                PriceSeries::empty(symbol)
            }
        }
    }

    /// Fetch all four instruments of a region concurrently
    pub async fn fetch_region(&self, config: &RegionConfig) -> RoleMap<PriceSeries> {
        let (equity1, equity2, bond, threshold) = tokio::join!(
            self.fetch_or_empty(config.equity1),
            self.fetch_or_empty(config.equity2),
            self.fetch_or_empty(config.bond),
            self.fetch_or_empty(config.threshold),
        );
        RoleMap::new(equity1, equity2, bond, threshold)
    }

    /// Compute the current signal without persisting it
    pub async fn snapshot(&self, region: Region) -> anyhow::Result<MomentumSnapshot> {
        let config = region.config();
        let series = self.fetch_region(config).await;
        Ok(self.engine.compute(config, &series)?)
    }

    /// Compute the current signal and append it to history
    pub async fn update(&self, region: Region) -> anyhow::Result<HistoryRecord> {
        let started = Instant::now();

        let snapshot = self.snapshot(region).await?;
        let record = HistoryRecord::from(&snapshot);
        self.store.append(&record).await?;

        telemetry::record_snapshot(&snapshot);
        telemetry::record_update(region, started.elapsed());
        telemetry::record_history_append(region, 1);

        tracing::info!(
            region = %region,
            signal = %record.signal,
            id = %record.id,
            "Saved momentum record"
        );

        Ok(record)
    }

    /// Stored records for a region, newest first
    pub async fn history(
        &self,
        region: Region,
        limit: Option<usize>,
    ) -> anyhow::Result<Vec<HistoryRecord>> {
        self.store.recent(region, limit).await
    }

    /// Latest regime change over the stored history
    pub async fn changes(
        &self,
        region: Region,
        limit: Option<usize>,
    ) -> anyhow::Result<SignalChangeReport> {
        let records = self.store.recent(region, limit).await?;
        Ok(analyze(&records, region)?)
    }

    /// Reconstruct signals for the last `days` observation dates of Equity1.
    ///
    /// Each date is computed from the series truncated at the end of that
    /// calendar day (UTC), so bars stamped later the same day are included, and
    /// stored with the historical timestamp. Dates with fewer than `lookback`
    /// prior observations, or already stored, are skipped.
    pub async fn backfill(&self, region: Region, days: usize) -> anyhow::Result<BackfillSummary> {
        let config = region.config();
        let series = self.fetch_region(config).await;

        let anchor = series.equity1.points();
        if anchor.is_empty() {
            anyhow::bail!("No price data for {}; cannot backfill", config.equity1);
        }

        let existing: HashSet<_> = self
            .store
            .recent(region, None)
            .await?
            .into_iter()
            .map(|r| r.timestamp)
            .collect();

        let lookback = self.engine.lookback();
        let mut summary = BackfillSummary::default();

        for index in anchor.len().saturating_sub(days)..anchor.len() {
            let timestamp = anchor[index].timestamp;

            if index < lookback {
                tracing::warn!(
                    region = %region,
                    date = %timestamp.date_naive(),
                    "Not enough history, skipping"
                );
                summary.skipped_short += 1;
                continue;
            }
            if existing.contains(&timestamp) {
                summary.skipped_existing += 1;
                continue;
            }

            let cutoff = end_of_day(timestamp);
            let truncated = series.map(|s| s.truncated_at(cutoff));
            let snapshot = self.engine.compute(config, &truncated)?;
            let record = HistoryRecord::new(timestamp, region, snapshot.momentum, snapshot.signal);
            self.store.append(&record).await?;
            summary.written += 1;
        }

        telemetry::record_history_append(region, summary.written as u64);

        tracing::info!(
            region = %region,
            written = summary.written,
            skipped_short = summary.skipped_short,
            skipped_existing = summary.skipped_existing,
            "Backfill complete"
        );

        Ok(summary)
    }
}

/// Last representable instant of the UTC calendar day containing `timestamp`
fn end_of_day(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.date_naive().and_time(NaiveTime::MIN).and_utc() + Duration::days(1)
        - Duration::microseconds(1)
}
