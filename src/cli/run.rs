//! Run command implementation

use super::build_pipeline;
use crate::config::Config;
use crate::schedule::UpdateSchedule;
use crate::telemetry;
use chrono::Utc;
use clap::Args;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Run one update for every region before waiting for the schedule
    #[arg(long)]
    pub now: bool,

    /// Do not start the Prometheus exporter
    #[arg(long)]
    pub no_metrics: bool,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        if !config.schedule.enabled {
            anyhow::bail!("Scheduled updates are disabled (schedule.enabled = false)");
        }

        let schedule = UpdateSchedule::from_config(&config.schedule)?;
        let pipeline = build_pipeline(config)?;

        if !self.no_metrics {
            telemetry::start_exporter(config.telemetry.metrics_port)?;
        }

        if self.now {
            update_all(&pipeline, config).await;
        }

        loop {
            let next = schedule.next_run_after(Utc::now());
            let wait = (next - Utc::now()).to_std().unwrap_or_default();
            tracing::info!(next_run = %next, "Waiting for next scheduled update");

            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    update_all(&pipeline, config).await;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutting down scheduler");
                    return Ok(());
                }
            }
        }
    }
}

/// Update every configured region; failures are logged and left for the next run
async fn update_all(pipeline: &super::DefaultPipeline, config: &Config) {
    tracing::info!("Starting scheduled momentum update...");

    for &region in &config.momentum.regions {
        if let Err(e) = pipeline.update(region).await {
            telemetry::record_update_failure(region);
            tracing::error!(region = %region, error = %e, "Failed to update momentum history");
        }
    }
}
