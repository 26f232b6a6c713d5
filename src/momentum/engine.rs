//! Dual momentum engine
//!
//! Computes trailing returns for the four roles of a region and picks the
//! instrument to hold: the stronger equity when at least one equity beats the
//! threshold instrument, otherwise the bond.

use chrono::Utc;
use std::collections::BTreeMap;

use super::region::RegionConfig;
use super::types::{MomentumError, MomentumSnapshot, PriceSeries, Role, RoleMap};

/// Approximately one trading year of daily observations
pub const DEFAULT_LOOKBACK: usize = 252;

/// Stateless momentum calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MomentumEngine {
    lookback: usize,
}

impl Default for MomentumEngine {
    fn default() -> Self {
        Self {
            lookback: DEFAULT_LOOKBACK,
        }
    }
}

impl MomentumEngine {
    /// Create an engine with the given lookback in observations
    pub fn new(lookback: usize) -> Result<Self, MomentumError> {
        if lookback == 0 {
            return Err(MomentumError::InvalidLookback(lookback));
        }
        Ok(Self { lookback })
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    /// Trailing return of a series: `current / reference - 1`.
    ///
    /// The reference is the observation `lookback` positions before the
    /// latest one, or the earliest observation when the series is not longer
    /// than the window. Empty series and a zero reference yield 0.0.
    pub fn trailing_return(&self, series: &PriceSeries) -> f64 {
        let points = series.points();
        let Some(current) = points.last() else {
            return 0.0;
        };

        let reference = if points.len() > self.lookback {
            points[points.len() - 1 - self.lookback].price
        } else {
            points[0].price
        };

        if reference == 0.0 {
            return 0.0;
        }

        current.price / reference - 1.0
    }

    /// Compute momentum and the allocation signal for one region
    pub fn compute(
        &self,
        region: &RegionConfig,
        series: &RoleMap<PriceSeries>,
    ) -> Result<MomentumSnapshot, MomentumError> {
        if series.iter().all(|(_, s)| s.is_empty()) {
            return Err(MomentumError::NoPriceData(region.region));
        }

        let momentum = series.map(|s| self.trailing_return(s));
        let observations = series.map(|s| s.len());

        let mut prices = BTreeMap::new();
        for role in Role::ALL {
            let price = series.get(role).latest().map(|p| p.price).unwrap_or(0.0);
            if series.get(role).is_empty() {
                tracing::warn!(
                    region = %region.region,
                    role = %role,
                    symbol = region.symbol(role),
                    "No price data, using 0.0 momentum"
                );
            }
            prices.insert(region.symbol(role).to_string(), price);
        }

        let signal = select_signal(region, &momentum);

        tracing::debug!(
            region = %region.region,
            signal,
            equity1 = momentum.equity1,
            equity2 = momentum.equity2,
            bond = momentum.bond,
            threshold = momentum.threshold,
            "Computed momentum"
        );

        Ok(MomentumSnapshot {
            region: region.region,
            signal: signal.to_string(),
            momentum,
            prices,
            observations,
            lookback: self.lookback,
            computed_at: Utc::now(),
        })
    }
}

/// Allocation rule.
///
/// Bond unless an equity's momentum is strictly above the threshold's; then
/// Equity1 if strictly stronger than Equity2, else Equity2 (ties go to Equity2).
pub fn select_signal(region: &RegionConfig, momentum: &RoleMap<f64>) -> &'static str {
    let beats_threshold =
        momentum.equity1 > momentum.threshold || momentum.equity2 > momentum.threshold;

    if !beats_threshold {
        return region.bond;
    }

    if momentum.equity1 > momentum.equity2 {
        region.equity1
    } else {
        region.equity2
    }
}
