//! Signal history analysis
//!
//! Finds the latest regime change in a region's history. Records must be
//! pre-filtered to one region and ordered newest first; both conditions are
//! checked and a violation rejects the call.

use chrono::{DateTime, Utc};

use super::types::{HistoryError, HistoryRecord, SignalChangeReport};
use crate::momentum::Region;

/// Analyze `records` against the current wall clock
pub fn analyze(
    records: &[HistoryRecord],
    region: Region,
) -> Result<SignalChangeReport, HistoryError> {
    analyze_at(records, region, Utc::now())
}

/// Analyze `records` with an explicit "now" reference
pub fn analyze_at(
    records: &[HistoryRecord],
    region: Region,
    now: DateTime<Utc>,
) -> Result<SignalChangeReport, HistoryError> {
    validate(records, region)?;

    let Some(latest) = records.first() else {
        return Ok(SignalChangeReport::NoHistory);
    };

    if records.len() == 1 {
        return Ok(SignalChangeReport::SingleRecord {
            current_signal: latest.signal.clone(),
            recorded_at: latest.timestamp,
        });
    }

    let current_signal = &latest.signal;
    let oldest = &records[records.len() - 1];

    let Some(change_idx) = first_different(records, 1, current_signal) else {
        return Ok(SignalChangeReport::StableRegime {
            current_signal: current_signal.clone(),
            days_since_change: whole_days(oldest.timestamp, now),
            observed_since: oldest.timestamp,
            record_count: records.len(),
        });
    };

    // change_idx >= 1, so the newer neighbour always exists
    let regime_start = &records[change_idx - 1];
    let previous_end = &records[change_idx];

    let previous_start = match first_different(records, change_idx + 1, &previous_end.signal) {
        Some(idx) => &records[idx - 1],
        None => oldest,
    };

    tracing::debug!(
        region = %region,
        current = %current_signal,
        previous = %previous_end.signal,
        change_idx,
        "Found signal change"
    );

    Ok(SignalChangeReport::ChangedRegime {
        current_signal: current_signal.clone(),
        previous_signal: previous_end.signal.clone(),
        last_change_date: regime_start.timestamp,
        days_since_change: whole_days(regime_start.timestamp, now),
        previous_signal_duration_days: whole_days(previous_start.timestamp, previous_end.timestamp),
    })
}

/// Index of the first record at or after `from` whose signal differs
fn first_different(records: &[HistoryRecord], from: usize, signal: &str) -> Option<usize> {
    records
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, r)| r.signal != signal)
        .map(|(i, _)| i)
}

/// Whole days from `start` to `end`, truncated toward zero
fn whole_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_days()
}

fn validate(records: &[HistoryRecord], region: Region) -> Result<(), HistoryError> {
    for (index, record) in records.iter().enumerate() {
        if record.region != region {
            return Err(HistoryError::RegionMismatch {
                index,
                expected: region,
                found: record.region,
            });
        }
        if index > 0 && record.timestamp > records[index - 1].timestamp {
            return Err(HistoryError::NotDescending { index });
        }
    }
    Ok(())
}
