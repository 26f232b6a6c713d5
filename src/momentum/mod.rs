//! Momentum engine module
//!
//! Turns raw price history for a region's four instruments into trailing
//! 12-month returns and a single allocation signal.

mod engine;
mod region;
mod types;

pub use engine::{select_signal, MomentumEngine, DEFAULT_LOOKBACK};
pub use region::{Region, RegionConfig};
pub use types::{MomentumError, MomentumSnapshot, PricePoint, PriceSeries, Role, RoleMap};
