//! Rain risk bands for the school run

use serde::{Deserialize, Serialize};
use std::fmt;

/// Probability (percent) at which rain becomes worth mentioning
pub const POSSIBLE_THRESHOLD: u8 = 30;
/// Probability (percent) at which rain is expected
pub const LIKELY_THRESHOLD: u8 = 70;

/// Banded rain risk for a single school-run window
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    /// Below 30%
    Clear,
    /// 30% to 69%
    Possible,
    /// 70% and above
    Likely,
}

impl RiskBand {
    /// Band a rain probability in percent
    #[must_use]
    pub const fn from_probability(probability: u8) -> Self {
        if probability >= LIKELY_THRESHOLD {
            Self::Likely
        } else if probability >= POSSIBLE_THRESHOLD {
            Self::Possible
        } else {
            Self::Clear
        }
    }

    /// Human-readable description used in summaries
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Possible => "possible, caution",
            Self::Likely => "likely, take precaution",
        }
    }

    /// Table icon; only bands at or above the possible threshold get one
    #[must_use]
    pub const fn icon(&self) -> Option<&'static str> {
        match self {
            Self::Clear => None,
            Self::Possible => Some("🌦"),
            Self::Likely => Some("☔"),
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
