//! Signal history module
//!
//! Persisted signal records and analysis of when the signal last changed.

mod analyzer;
mod types;

pub use analyzer::{analyze, analyze_at};
pub use types::{HistoryError, HistoryRecord, SignalChangeReport, SignalChangeSummary};
