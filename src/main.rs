use clap::Parser;
use gem_signal::cli::{Cli, Commands};
use gem_signal::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load_optional(&cli.config)? {
        Some(config) => config,
        None => {
            eprintln!("Warning: Config file {} not found", cli.config);
            eprintln!("Using default configuration");
            Config::default()
        }
    };

    // Initialize telemetry
    gem_signal::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Momentum(args) => {
            args.execute(&config).await?;
        }
        Commands::Update(args) => {
            tracing::info!("Starting momentum update");
            args.execute(&config).await?;
        }
        Commands::History(args) => {
            args.execute(&config).await?;
        }
        Commands::Changes(args) => {
            args.execute(&config).await?;
        }
        Commands::Backfill(args) => {
            tracing::info!("Starting backfill");
            args.execute(&config).await?;
        }
        Commands::Run(args) => {
            tracing::info!(
                hour_utc = config.schedule.hour_utc,
                minute = config.schedule.minute,
                "Starting scheduler"
            );
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Feed: {} (range {}, interval {})",
                config.feed.base_url, config.feed.range, config.feed.interval
            );
            println!("  Lookback: {} observations", config.momentum.lookback);
            let regions: Vec<String> = config
                .momentum
                .regions
                .iter()
                .map(|r| r.to_string())
                .collect();
            println!("  Regions: {}", regions.join(", "));
            println!("  History: {}", config.history.output_dir.display());
            println!(
                "  Schedule: {:02}:{:02} UTC{}{}",
                config.schedule.hour_utc,
                config.schedule.minute,
                if config.schedule.weekdays_only { ", weekdays" } else { "" },
                if config.schedule.enabled { "" } else { " (disabled)" },
            );
            println!("  Metrics port: {}", config.telemetry.metrics_port);
        }
    }

    Ok(())
}
