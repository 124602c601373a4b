//! Derived-field computation for station power.
//!
//! Both derived columns of the station table (`power_class`, `is_fast_dc`)
//! are functions of `power_kw`. This module is the single home of those
//! functions; the row checker recomputes them from here and compares against
//! the stored values, and any future repair tooling must write them from
//! here as well.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Power at or above this threshold counts as fast DC charging.
pub const FAST_DC_THRESHOLD_KW: f64 = 50.0;

/// Power at or above this threshold counts as high-power charging.
pub const HPC_THRESHOLD_KW: f64 = 150.0;

/// Power class bin for a charging station, ordered by power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerClass {
    /// Below 50 kW
    Slow,
    /// 50 kW up to (exclusive) 150 kW
    Fast,
    /// 150 kW and above
    Hpc,
}

impl PowerClass {
    /// Computes the bin implied by a max power value.
    pub fn from_kw(power_kw: f64) -> Self {
        if power_kw >= HPC_THRESHOLD_KW {
            PowerClass::Hpc
        } else if power_kw >= FAST_DC_THRESHOLD_KW {
            PowerClass::Fast
        } else {
            PowerClass::Slow
        }
    }

    /// The canonical lowercase spelling used in the dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerClass::Slow => "slow",
            PowerClass::Fast => "fast",
            PowerClass::Hpc => "hpc",
        }
    }
}

impl fmt::Display for PowerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerClass {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(PowerClass::Slow),
            "fast" => Ok(PowerClass::Fast),
            "hpc" => Ok(PowerClass::Hpc),
            _ => Err(()),
        }
    }
}

/// Whether a max power value denotes fast DC charging capability.
pub fn is_fast_dc(power_kw: f64) -> bool {
    power_kw >= FAST_DC_THRESHOLD_KW
}
