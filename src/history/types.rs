//! Signal history types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::momentum::{MomentumSnapshot, Region, RoleMap};

/// Analyzer precondition violations
#[derive(Debug, Error, PartialEq)]
pub enum HistoryError {
    /// A record belongs to another region
    #[error("Record {index} is for region {found}, expected {expected}")]
    RegionMismatch {
        index: usize,
        expected: Region,
        found: Region,
    },
    /// Records are not ordered newest first
    #[error("Record {index} is newer than the record before it; history must be ordered newest first")]
    NotDescending { index: usize },
}

/// A persisted signal observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Unique record identifier
    pub id: Uuid,
    /// When the signal was computed
    pub timestamp: DateTime<Utc>,
    /// Region the signal belongs to
    pub region: Region,
    /// Momentum per role at that time
    pub momentum: RoleMap<f64>,
    /// Recommended instrument
    pub signal: String,
}

impl HistoryRecord {
    /// Create a new record with a fresh id
    pub fn new(
        timestamp: DateTime<Utc>,
        region: Region,
        momentum: RoleMap<f64>,
        signal: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            region,
            momentum,
            signal: signal.into(),
        }
    }
}

impl From<&MomentumSnapshot> for HistoryRecord {
    fn from(snapshot: &MomentumSnapshot) -> Self {
        Self::new(
            snapshot.computed_at,
            snapshot.region,
            snapshot.momentum,
            snapshot.signal.clone(),
        )
    }
}

/// Latest regime transition in a region's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SignalChangeReport {
    /// No records at all
    NoHistory,
    /// One record; the regime start is unknown and days since change is 0
    SingleRecord {
        current_signal: String,
        recorded_at: DateTime<Utc>,
    },
    /// Every record carries the current signal
    StableRegime {
        current_signal: String,
        /// Days from the oldest record to now
        days_since_change: i64,
        /// Timestamp of the oldest record
        observed_since: DateTime<Utc>,
        record_count: usize,
    },
    /// The signal changed within the observed history
    ChangedRegime {
        current_signal: String,
        previous_signal: String,
        /// First record carrying the current signal
        last_change_date: DateTime<Utc>,
        days_since_change: i64,
        previous_signal_duration_days: i64,
    },
}

impl SignalChangeReport {
    pub fn has_history(&self) -> bool {
        !matches!(self, SignalChangeReport::NoHistory)
    }

    pub fn current_signal(&self) -> Option<&str> {
        match self {
            SignalChangeReport::NoHistory => None,
            SignalChangeReport::SingleRecord { current_signal, .. }
            | SignalChangeReport::StableRegime { current_signal, .. }
            | SignalChangeReport::ChangedRegime { current_signal, .. } => Some(current_signal),
        }
    }

    pub fn days_since_change(&self) -> Option<i64> {
        match self {
            SignalChangeReport::NoHistory => None,
            SignalChangeReport::SingleRecord { .. } => Some(0),
            SignalChangeReport::StableRegime {
                days_since_change, ..
            }
            | SignalChangeReport::ChangedRegime {
                days_since_change, ..
            } => Some(*days_since_change),
        }
    }

    /// True when the observed history contains no transition
    pub fn no_change_in_history(&self) -> bool {
        matches!(
            self,
            SignalChangeReport::SingleRecord { .. } | SignalChangeReport::StableRegime { .. }
        )
    }

    /// Flat optional-field projection for JSON consumers
    pub fn summary(&self) -> SignalChangeSummary {
        let mut summary = SignalChangeSummary {
            has_history: self.has_history(),
            current_signal: self.current_signal().map(str::to_string),
            days_since_change: self.days_since_change(),
            no_change_in_history: self.has_history().then(|| self.no_change_in_history()),
            ..Default::default()
        };

        if let SignalChangeReport::ChangedRegime {
            previous_signal,
            last_change_date,
            previous_signal_duration_days,
            ..
        } = self
        {
            summary.last_change_date = Some(last_change_date.to_rfc3339());
            summary.previous_signal = Some(previous_signal.clone());
            summary.previous_signal_duration_days = Some(*previous_signal_duration_days);
        }

        summary
    }

    /// Format as table for CLI output
    pub fn format_table(&self, region: Region) -> String {
        let body = match self {
            SignalChangeReport::NoHistory => "No history recorded yet.\n".to_string(),
            SignalChangeReport::SingleRecord {
                current_signal,
                recorded_at,
            } => format!(
                "Current Signal:   {}\nRecorded:         {}\nOnly one record; regime start unknown.\n",
                current_signal,
                recorded_at.format("%Y-%m-%d"),
            ),
            SignalChangeReport::StableRegime {
                current_signal,
                days_since_change,
                observed_since,
                record_count,
            } => format!(
                "Current Signal:   {}\nStable for:       {} days (entire history since {}, {} records)\n",
                current_signal,
                days_since_change,
                observed_since.format("%Y-%m-%d"),
                record_count,
            ),
            SignalChangeReport::ChangedRegime {
                current_signal,
                previous_signal,
                last_change_date,
                days_since_change,
                previous_signal_duration_days,
            } => format!(
                "Latest Shift:     {} -> {}\nOccurred:         {}\nCurrent Trend:    {} days\nPrevious Trend:   {} days of {}\n",
                previous_signal,
                current_signal,
                last_change_date.format("%Y-%m-%d"),
                days_since_change,
                previous_signal_duration_days,
                previous_signal,
            ),
        };

        format!(
            r#"
══════════════════════════════════════════════════════
               ALLOCATION CHANGES ({})
══════════════════════════════════════════════════════
{}══════════════════════════════════════════════════════
"#,
            region, body
        )
    }
}

/// Optional-field form of [`SignalChangeReport`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalChangeSummary {
    pub has_history: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_signal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_since_change: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_change_in_history: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_change_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_signal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_signal_duration_days: Option<i64>,
}
