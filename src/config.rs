//! Configuration types for gem-signal

use crate::momentum::{Region, DEFAULT_LOOKBACK};
use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub momentum: MomentumConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Price feed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Chart API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// History range requested per instrument (must cover the lookback)
    #[serde(default = "default_range")]
    pub range: String,

    /// Bar interval
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://query2.finance.yahoo.com".to_string()
}
fn default_range() -> String {
    "2y".to_string()
}
fn default_interval() -> String {
    "1d".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            range: default_range(),
            interval: default_interval(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Momentum computation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MomentumConfig {
    /// Lookback window in observations (252 = one trading year)
    #[serde(default = "default_lookback")]
    pub lookback: usize,

    /// Regions updated by the scheduler and `update --all`
    #[serde(default = "default_regions")]
    pub regions: Vec<Region>,
}

fn default_lookback() -> usize {
    DEFAULT_LOOKBACK
}
fn default_regions() -> Vec<Region> {
    Region::ALL.to_vec()
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            lookback: default_lookback(),
            regions: default_regions(),
        }
    }
}

/// History storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Directory holding history Parquet files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Records returned by history queries when no limit is given
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./data/history")
}
fn default_limit() -> usize {
    100
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_limit: default_limit(),
        }
    }
}

/// Update scheduler configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Run scheduled updates in `run` mode
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Hour of day (UTC) to run the update
    #[serde(default = "default_hour_utc")]
    pub hour_utc: u32,

    /// Minute of the hour to run the update
    #[serde(default)]
    pub minute: u32,

    /// Skip Saturdays and Sundays
    #[serde(default = "default_true")]
    pub weekdays_only: bool,
}

fn default_true() -> bool {
    true
}
fn default_hour_utc() -> u32 {
    21 // 16:00 New York (EST)
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hour_utc: 21,
            minute: 0,
            weekdays_only: true,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_metrics_port() -> u16 {
    9090
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_port: default_metrics_port(),
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, or `None` when the file does not exist.
    /// Parse and validation errors are returned as errors.
    pub fn load_optional(path: impl AsRef<std::path::Path>) -> anyhow::Result<Option<Self>> {
        match Self::load(path) {
            Ok(config) => Ok(Some(config)),
            Err(e) => match e.downcast_ref::<std::io::Error>() {
                Some(io) if io.kind() == std::io::ErrorKind::NotFound => Ok(None),
                _ => Err(e),
            },
        }
    }

    /// Reject values no computation can run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.momentum.lookback == 0 {
            anyhow::bail!("momentum.lookback must be at least 1");
        }
        if self.momentum.regions.is_empty() {
            anyhow::bail!("momentum.regions must name at least one region");
        }
        if self.schedule.hour_utc > 23 || self.schedule.minute > 59 {
            anyhow::bail!(
                "Invalid schedule time {:02}:{:02}",
                self.schedule.hour_utc,
                self.schedule.minute
            );
        }
        Ok(())
    }
}
