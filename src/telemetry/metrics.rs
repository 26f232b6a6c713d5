//! Prometheus metrics

use crate::momentum::{MomentumSnapshot, Region, Role};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Start the Prometheus scrape endpoint on all interfaces
pub fn start_exporter(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;

    tracing::info!(%addr, "Metrics exporter listening");
    Ok(())
}

/// Publish momentum per role and the current signal for a region
pub fn record_snapshot(snapshot: &MomentumSnapshot) {
    let region = snapshot.region;
    let config = region.config();

    for (role, momentum) in snapshot.momentum.iter() {
        metrics::gauge!(
            "gem_momentum",
            "region" => region.as_str(),
            "role" => role.as_str()
        )
        .set(*momentum);
    }

    for role in [Role::Equity1, Role::Equity2, Role::Bond] {
        let symbol = config.symbol(role);
        let active = if snapshot.signal == symbol { 1.0 } else { 0.0 };
        metrics::gauge!(
            "gem_signal",
            "region" => region.as_str(),
            "signal" => symbol
        )
        .set(active);
    }
}

/// Count a completed update and how long it took
pub fn record_update(region: Region, elapsed: Duration) {
    metrics::counter!("gem_updates_total", "region" => region.as_str()).increment(1);
    metrics::histogram!("gem_update_duration_seconds", "region" => region.as_str())
        .record(elapsed.as_secs_f64());
}

/// Count a failed update
pub fn record_update_failure(region: Region) {
    metrics::counter!("gem_update_failures_total", "region" => region.as_str()).increment(1);
}

/// Count persisted history records
pub fn record_history_append(region: Region, count: u64) {
    metrics::counter!("gem_history_records_total", "region" => region.as_str()).increment(count);
}
