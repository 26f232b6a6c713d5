//! Changes command implementation

use super::{build_pipeline, OutputFormat};
use crate::config::Config;
use crate::momentum::Region;
use clap::Args;

#[derive(Args, Debug)]
pub struct ChangesArgs {
    /// Region to analyze
    #[arg(short, long, default_value = "US")]
    pub region: Region,

    /// Analyze only the most recent N records (defaults to history.default_limit)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl ChangesArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let pipeline = build_pipeline(config)?;
        let limit = self.limit.unwrap_or(config.history.default_limit);
        let report = pipeline.changes(self.region, Some(limit)).await?;

        match self.format {
            OutputFormat::Table => println!("{}", report.format_table(self.region)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report.summary())?),
        }

        Ok(())
    }
}
