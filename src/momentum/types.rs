//! Momentum engine types
//!
//! Price series, role-keyed maps and the snapshot produced by the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::region::Region;

/// Momentum engine errors
#[derive(Debug, Error, PartialEq)]
pub enum MomentumError {
    /// Lookback window must be at least one observation
    #[error("Invalid lookback window: {0}")]
    InvalidLookback(usize),
    /// Every role's series was empty
    #[error("No price data for any instrument in region {0}")]
    NoPriceData(Region),
    /// Region key not present in the registry
    #[error("Unknown region: {0}")]
    UnknownRegion(String),
}

/// A single (timestamp, price) observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Price history for one instrument, ascending by timestamp
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, sorting by timestamp. A repeated timestamp keeps the
    /// last observation supplied for it.
    pub fn new(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.timestamp == point.timestamp => *last = point,
                _ => deduped.push(point),
            }
        }

        Self {
            symbol: symbol.into(),
            points: deduped,
        }
    }

    /// Series with no observations (fetch failure or unlisted instrument)
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            points: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent observation
    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Earliest observation
    pub fn earliest(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Copy of the series containing only observations at or before `cutoff`
    pub fn truncated_at(&self, cutoff: DateTime<Utc>) -> Self {
        let end = self.points.partition_point(|p| p.timestamp <= cutoff);
        Self {
            symbol: self.symbol.clone(),
            points: self.points[..end].to_vec(),
        }
    }
}

/// Logical role an instrument plays in the allocation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// First equity candidate (home market)
    Equity1,
    /// Second equity candidate (rest of world)
    Equity2,
    /// Defensive allocation
    Bond,
    /// Short-term rate proxy the equities must beat
    Threshold,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Equity1, Role::Equity2, Role::Bond, Role::Threshold];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Equity1 => "equity1",
            Role::Equity2 => "equity2",
            Role::Bond => "bond",
            Role::Threshold => "threshold",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per role
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleMap<T> {
    pub equity1: T,
    pub equity2: T,
    pub bond: T,
    pub threshold: T,
}

impl<T> RoleMap<T> {
    pub fn new(equity1: T, equity2: T, bond: T, threshold: T) -> Self {
        Self {
            equity1,
            equity2,
            bond,
            threshold,
        }
    }

    /// Build a map by evaluating `f` for each role
    pub fn from_fn(mut f: impl FnMut(Role) -> T) -> Self {
        Self {
            equity1: f(Role::Equity1),
            equity2: f(Role::Equity2),
            bond: f(Role::Bond),
            threshold: f(Role::Threshold),
        }
    }

    pub fn get(&self, role: Role) -> &T {
        match role {
            Role::Equity1 => &self.equity1,
            Role::Equity2 => &self.equity2,
            Role::Bond => &self.bond,
            Role::Threshold => &self.threshold,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> RoleMap<U> {
        RoleMap {
            equity1: f(&self.equity1),
            equity2: f(&self.equity2),
            bond: f(&self.bond),
            threshold: f(&self.threshold),
        }
    }

    /// Iterate (role, value) pairs in role order
    pub fn iter(&self) -> impl Iterator<Item = (Role, &T)> {
        Role::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}

/// Result of one engine computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumSnapshot {
    /// Region whose instrument set was used
    pub region: Region,
    /// Recommended instrument identifier
    pub signal: String,
    /// Trailing return per role (0.0 when data was missing)
    pub momentum: RoleMap<f64>,
    /// Latest price keyed by instrument identifier (0.0 when missing)
    pub prices: BTreeMap<String, f64>,
    /// Observations available per role. Fewer than `lookback + 1` means the
    /// return was measured over a shorter window.
    pub observations: RoleMap<usize>,
    /// Lookback window in observations
    pub lookback: usize,
    /// When the snapshot was computed
    pub computed_at: DateTime<Utc>,
}

impl MomentumSnapshot {
    /// Whether the role's momentum covers the full lookback window
    pub fn has_full_window(&self, role: Role) -> bool {
        *self.observations.get(role) > self.lookback
    }

    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        let mut rows = String::new();
        for (role, momentum) in self.momentum.iter() {
            let short = if self.has_full_window(role) { "" } else { " *" };
            rows.push_str(&format!(
                "{:<10} {:>+9.2}%   ({} obs){}\n",
                role.as_str(),
                momentum * 100.0,
                self.observations.get(role),
                short,
            ));
        }

        let mut prices = String::new();
        for (symbol, price) in &self.prices {
            prices.push_str(&format!("{:<10} {:>12.4}\n", symbol, price));
        }

        format!(
            r#"
══════════════════════════════════════════════════════
               GEM SIGNAL ({region})
══════════════════════════════════════════════════════

Signal:           {signal}
Computed:         {computed}

MOMENTUM ({lookback} obs lookback)
───────────────────────────────────────────────────────
{rows}
PRICES
───────────────────────────────────────────────────────
{prices}══════════════════════════════════════════════════════
"#,
            region = self.region,
            signal = self.signal,
            computed = self.computed_at.to_rfc3339(),
            lookback = self.lookback,
            rows = rows,
            prices = prices,
        )
    }
}
