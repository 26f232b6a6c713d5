//! Region registry
//!
//! Each region is a fixed, disjoint set of four instruments. Configurations
//! are looked up by key and never merged.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::types::{MomentumError, Role, RoleMap};

/// Region key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "US")]
    Us,
    #[serde(rename = "EU")]
    Eu,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Us, Region::Eu];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Us => "US",
            Region::Eu => "EU",
        }
    }

    /// Instrument set for this region
    pub fn config(&self) -> &'static RegionConfig {
        match self {
            Region::Us => &US,
            Region::Eu => &EU,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = MomentumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "US" => Ok(Region::Us),
            "EU" => Ok(Region::Eu),
            _ => Err(MomentumError::UnknownRegion(s.to_string())),
        }
    }
}

/// Instrument identifiers for the four roles of one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionConfig {
    pub region: Region,
    pub equity1: &'static str,
    pub equity2: &'static str,
    pub bond: &'static str,
    pub threshold: &'static str,
}

/// S&P 500, all-world ex-US, US aggregate bond, 13-week T-bill yield
static US: RegionConfig = RegionConfig {
    region: Region::Us,
    equity1: "SPY",
    equity2: "VEU",
    bond: "BND",
    threshold: "^IRX",
};

/// UCITS equivalents listed in Amsterdam/London
static EU: RegionConfig = RegionConfig {
    region: Region::Eu,
    equity1: "CSPX.AS",
    equity2: "EXUS.L",
    bond: "AGGH.AS",
    threshold: "PJEU.L",
};

impl RegionConfig {
    /// Instrument identifier for a role
    pub fn symbol(&self, role: Role) -> &'static str {
        match role {
            Role::Equity1 => self.equity1,
            Role::Equity2 => self.equity2,
            Role::Bond => self.bond,
            Role::Threshold => self.threshold,
        }
    }

    pub fn symbols(&self) -> RoleMap<&'static str> {
        RoleMap::from_fn(|role| self.symbol(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_from_str() {
        assert_eq!("US".parse::<Region>().unwrap(), Region::Us);
        assert_eq!("eu".parse::<Region>().unwrap(), Region::Eu);
        assert_eq!(
            "APAC".parse::<Region>(),
            Err(MomentumError::UnknownRegion("APAC".to_string()))
        );
    }

    #[test]
    fn test_us_config() {
        let config = Region::Us.config();
        assert_eq!(config.symbol(Role::Equity1), "SPY");
        assert_eq!(config.symbol(Role::Equity2), "VEU");
        assert_eq!(config.symbol(Role::Bond), "BND");
        assert_eq!(config.symbol(Role::Threshold), "^IRX");
    }

    #[test]
    fn test_regions_are_disjoint() {
        let us = Region::Us.config().symbols();
        let eu = Region::Eu.config().symbols();
        for (_, symbol) in us.iter() {
            assert!(eu.iter().all(|(_, other)| other != symbol));
        }
    }

    #[test]
    fn test_region_serde() {
        let json = serde_json::to_string(&Region::Eu).unwrap();
        assert_eq!(json, "\"EU\"");
        let back: Region = serde_json::from_str("\"US\"").unwrap();
        assert_eq!(back, Region::Us);
    }
}
