//! Update command implementation

use super::build_pipeline;
use crate::config::Config;
use crate::momentum::Region;
use clap::Args;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Region to update
    #[arg(short, long, default_value = "US", conflicts_with = "all")]
    pub region: Region,

    /// Update every configured region
    #[arg(long)]
    pub all: bool,
}

impl UpdateArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let pipeline = build_pipeline(config)?;

        let regions = if self.all {
            config.momentum.regions.clone()
        } else {
            vec![self.region]
        };

        for region in regions {
            let record = pipeline.update(region).await?;
            println!(
                "{} {} -> {}",
                record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                region,
                record.signal
            );
        }

        Ok(())
    }
}
