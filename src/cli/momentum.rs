//! Momentum command implementation

use super::{build_pipeline, OutputFormat};
use crate::config::Config;
use crate::momentum::Region;
use clap::Args;

#[derive(Args, Debug)]
pub struct MomentumArgs {
    /// Region instrument set
    #[arg(short, long, default_value = "US")]
    pub region: Region,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl MomentumArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let pipeline = build_pipeline(config)?;
        let snapshot = pipeline.snapshot(self.region).await?;

        match self.format {
            OutputFormat::Table => println!("{}", snapshot.format_table()),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        }

        Ok(())
    }
}
