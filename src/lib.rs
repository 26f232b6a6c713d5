//! gem-signal: Global Equity Momentum (dual momentum) allocation signal
//!
//! This library provides the core components for:
//! - Trailing 12-month momentum and the GEM allocation rule per region
//! - Analysis of when the persisted signal last changed
//! - Daily price history from the Yahoo chart API
//! - Append-only Parquet signal history
//! - Update, query and backfill pipeline
//! - Weekday update scheduling
//! - Structured logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod data;
pub mod feed;
pub mod history;
pub mod momentum;
pub mod pipeline;
pub mod schedule;
pub mod telemetry;
