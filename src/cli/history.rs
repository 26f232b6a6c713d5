//! History command implementation

use super::{build_pipeline, OutputFormat};
use crate::config::Config;
use crate::momentum::Region;
use clap::Args;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Region to list
    #[arg(short, long, default_value = "US")]
    pub region: Region,

    /// Maximum records (defaults to history.default_limit)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl HistoryArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let pipeline = build_pipeline(config)?;
        let limit = self.limit.unwrap_or(config.history.default_limit);
        let records = pipeline.history(self.region, Some(limit)).await?;

        if self.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&records)?);
            return Ok(());
        }

        let symbols = self.region.config();
        println!(
            "{:<20} {:<8} {:>9} {:>9} {:>9} {:>9}",
            "date", "signal", symbols.equity1, symbols.equity2, symbols.bond, symbols.threshold
        );
        for record in &records {
            println!(
                "{:<20} {:<8} {:>+8.2}% {:>+8.2}% {:>+8.2}% {:>+8.2}%",
                record.timestamp.format("%Y-%m-%d %H:%M"),
                record.signal,
                record.momentum.equity1 * 100.0,
                record.momentum.equity2 * 100.0,
                record.momentum.bond * 100.0,
                record.momentum.threshold * 100.0,
            );
        }
        println!("{} records", records.len());

        Ok(())
    }
}
