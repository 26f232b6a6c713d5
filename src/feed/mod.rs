//! Price feed module
//!
//! Provides daily price history per instrument from the Yahoo chart API

mod yahoo;

pub use yahoo::{parse_chart, YahooChartClient};

use crate::momentum::PriceSeries;
use async_trait::async_trait;

/// Trait for price history sources
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the daily price history for one instrument
    async fn fetch_series(&self, symbol: &str) -> anyhow::Result<PriceSeries>;
}
