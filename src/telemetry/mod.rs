//! Telemetry module
//!
//! Metrics and structured logging

mod logging;
mod metrics;

pub use self::metrics::{
    record_history_append, record_snapshot, record_update, record_update_failure, start_exporter,
};
pub use logging::init_logging;

use crate::config::TelemetryConfig;

/// Initialize logging from telemetry configuration
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)
}
