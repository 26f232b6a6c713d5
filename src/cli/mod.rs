//! CLI interface for gem-signal
//!
//! Provides subcommands for:
//! - `momentum`: Compute the current signal without saving it
//! - `update`: Compute and append the signal to history
//! - `history`: List stored signal history
//! - `changes`: Report the latest allocation change
//! - `backfill`: Reconstruct past signals from downloaded prices
//! - `run`: Scheduled daily updates with metrics
//! - `config`: Show configuration

mod backfill;
mod changes;
mod history;
mod momentum;
mod run;
mod update;

pub use backfill::BackfillArgs;
pub use changes::ChangesArgs;
pub use history::HistoryArgs;
pub use momentum::MomentumArgs;
pub use run::RunArgs;
pub use update::UpdateArgs;

use crate::config::Config;
use crate::data::ParquetHistoryStore;
use crate::feed::YahooChartClient;
use crate::momentum::MomentumEngine;
use crate::pipeline::MomentumPipeline;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "gem-signal")]
#[command(about = "Global Equity Momentum signal with persisted history")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the current signal without saving it
    Momentum(MomentumArgs),
    /// Compute the current signal and append it to history
    Update(UpdateArgs),
    /// List stored signal history
    History(HistoryArgs),
    /// Report the latest allocation change
    Changes(ChangesArgs),
    /// Reconstruct past signals from downloaded prices
    Backfill(BackfillArgs),
    /// Run scheduled daily updates
    Run(RunArgs),
    /// Show configuration
    Config,
}

/// Output format for commands that print results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Pipeline backed by the Yahoo chart API and Parquet history
pub type DefaultPipeline = MomentumPipeline<YahooChartClient, ParquetHistoryStore>;

/// Build the production pipeline from configuration
pub fn build_pipeline(config: &Config) -> anyhow::Result<DefaultPipeline> {
    let source = YahooChartClient::new(config.feed.clone())?;
    let store = ParquetHistoryStore::new(config.history.output_dir.clone());
    let engine = MomentumEngine::new(config.momentum.lookback)?;
    Ok(MomentumPipeline::new(source, store, engine))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_changes_command() {
        let cli = Cli::parse_from(["gem-signal", "changes", "--region", "eu", "--format", "json"]);
        match cli.command {
            Commands::Changes(args) => {
                assert_eq!(args.region, crate::momentum::Region::Eu);
                assert_eq!(args.format, OutputFormat::Json);
                assert!(args.limit.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.config, "config.toml");
    }

    #[test]
    fn test_parse_update_all() {
        let cli = Cli::parse_from(["gem-signal", "-c", "/etc/gem.toml", "update", "--all"]);
        match cli.command {
            Commands::Update(args) => assert!(args.all),
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.config, "/etc/gem.toml");
    }

    #[test]
    fn test_rejects_unknown_region() {
        let result = Cli::try_parse_from(["gem-signal", "momentum", "--region", "APAC"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_pipeline_rejects_zero_lookback() {
        let mut config = Config::default();
        config.momentum.lookback = 0;
        assert!(build_pipeline(&config).is_err());
    }
}
