//! Backfill command implementation

use super::build_pipeline;
use crate::config::Config;
use crate::momentum::Region;
use clap::Args;

#[derive(Args, Debug)]
pub struct BackfillArgs {
    /// Region to backfill
    #[arg(short, long, default_value = "US")]
    pub region: Region,

    /// Number of most recent trading days to reconstruct
    #[arg(short, long, default_value = "180")]
    pub days: usize,
}

impl BackfillArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        tracing::info!(region = %self.region, days = self.days, "Fetching market data for backfill");

        let pipeline = build_pipeline(config)?;
        let summary = pipeline.backfill(self.region, self.days).await?;

        println!(
            "Backfilled {}: {} written, {} skipped (short history), {} skipped (already stored)",
            self.region, summary.written, summary.skipped_short, summary.skipped_existing
        );

        Ok(())
    }
}
