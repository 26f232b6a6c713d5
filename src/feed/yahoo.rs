//! Yahoo Finance chart API client
//!
//! Fetches daily adjusted closes for one instrument. Null and non-positive
//! prices are dropped, so a gap in the source simply shortens the series.

use super::PriceSource;
use crate::config::FeedConfig;
use crate::momentum::{PricePoint, PriceSeries};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Chart endpoint response
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartData,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// HTTP client for the chart endpoint
pub struct YahooChartClient {
    config: FeedConfig,
    client: Client,
}

impl YahooChartClient {
    /// Create a new client from feed configuration
    pub fn new(config: FeedConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }

    /// Build the chart URL for a symbol
    fn chart_url(&self, symbol: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}",
            self.config.base_url.trim_end_matches('/'),
            symbol
        )
    }
}

#[async_trait]
impl PriceSource for YahooChartClient {
    async fn fetch_series(&self, symbol: &str) -> anyhow::Result<PriceSeries> {
        let url = self.chart_url(symbol);

        tracing::debug!(url = %url, symbol, "Fetching chart");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("interval", self.config.interval.as_str()),
                ("range", self.config.range.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Chart API error for {}: {} - {}", symbol, status, body);
        }

        let body = response.text().await?;
        let series = parse_chart(symbol, &body)?;

        tracing::debug!(symbol, observations = series.len(), "Fetched chart");

        Ok(series)
    }
}

/// Parse a chart response body into a price series
pub fn parse_chart(symbol: &str, body: &str) -> anyhow::Result<PriceSeries> {
    let response: ChartResponse = serde_json::from_str(body)?;

    if let Some(error) = response.chart.error {
        anyhow::bail!(
            "Chart API error for {}: {} - {}",
            symbol,
            error.code,
            error.description
        );
    }

    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| anyhow::anyhow!("No chart result for {}", symbol))?;

    let closes = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .unwrap_or_default();

    let points = result
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(ts, price)| {
            let price = price.filter(|p| p.is_finite() && *p > 0.0)?;
            let timestamp = DateTime::from_timestamp(*ts, 0)?;
            Some(PricePoint::new(timestamp, price))
        })
        .collect();

    Ok(PriceSeries::new(symbol, points))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART_BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": { "symbol": "SPY", "currency": "USD" },
                "timestamp": [1704205800, 1704292200, 1704378600, 1704465000],
                "indicators": {
                    "quote": [{ "close": [472.65, 468.79, null, 467.92] }],
                    "adjclose": [{ "adjclose": [465.1, 461.3, null, 460.4] }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_chart_drops_nulls() {
        let series = parse_chart("SPY", CHART_BODY).unwrap();

        assert_eq!(series.symbol(), "SPY");
        assert_eq!(series.len(), 3);
        assert_eq!(series.earliest().unwrap().price, 465.1);
        assert_eq!(series.latest().unwrap().price, 460.4);
        assert_eq!(series.latest().unwrap().timestamp.timestamp(), 1704465000);
    }

    #[test]
    fn test_parse_chart_drops_zero_prices() {
        let body = r#"{"chart":{"result":[{"timestamp":[1,2,3],
            "indicators":{"adjclose":[{"adjclose":[0.0, 5.0, -1.0]}]}}],"error":null}}"#;

        let series = parse_chart("^IRX", body).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.latest().unwrap().price, 5.0);
    }

    #[test]
    fn test_parse_chart_api_error() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;

        let err = parse_chart("XXXX", body).unwrap_err();
        assert!(err.to_string().contains("Not Found"));
    }

    #[test]
    fn test_parse_chart_missing_adjclose_is_empty() {
        let body = r#"{"chart":{"result":[{"timestamp":[1,2],"indicators":{"quote":[{}]}}],"error":null}}"#;

        let series = parse_chart("VEU", body).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_parse_chart_invalid_json() {
        assert!(parse_chart("SPY", "not json").is_err());
    }

    #[test]
    fn test_chart_url() {
        let client = YahooChartClient::new(FeedConfig {
            base_url: "https://query2.finance.yahoo.com/".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            client.chart_url("^IRX"),
            "https://query2.finance.yahoo.com/v8/finance/chart/^IRX"
        );
    }
}
