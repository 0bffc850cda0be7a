//! Wind direction classification
//!
//! Days are split into easterly and westerly by the half of the compass the
//! mean direction falls in. The split follows runway relevance rather than
//! meteorological convention: exactly 0° and exactly 180° count as westerly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 16-point compass labels, clockwise from north in 22.5° steps
pub const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Normalize a bearing into `[0, 360)`
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Map a bearing to its 16-point compass label
#[must_use]
pub fn compass_label(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return "?";
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = ((normalize_degrees(degrees) / 22.5) + 0.5) as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

/// Which half of the compass a day's wind comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindDirection {
    /// Strictly between 0° and 180°
    Easterly,
    /// Exactly 0°, exactly 180°, or between 180° and 360°
    Westerly,
}

impl WindDirection {
    /// Classify a mean wind bearing
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        let normalized = normalize_degrees(degrees);
        if normalized > 0.0 && normalized < 180.0 {
            Self::Easterly
        } else {
            Self::Westerly
        }
    }

    /// Short label for table columns
    #[must_use]
    pub const fn short_label(&self) -> &'static str {
        match self {
            Self::Easterly => "E",
            Self::Westerly => "W",
        }
    }

    /// Check if this is an easterly day
    #[must_use]
    pub const fn is_easterly(&self) -> bool {
        matches!(self, Self::Easterly)
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easterly => write!(f, "Easterly"),
            Self::Westerly => write!(f, "Westerly"),
        }
    }
}

/// Aggregate direction over a forecast window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominantWind {
    /// More easterly days than westerly
    Easterly,
    /// More westerly days than easterly
    Westerly,
    /// Equal counts, including the empty window
    Mixed,
}

impl DominantWind {
    /// Decide the dominant direction from day counts
    #[must_use]
    pub const fn from_counts(east: usize, west: usize) -> Self {
        if east > west {
            Self::Easterly
        } else if west > east {
            Self::Westerly
        } else {
            Self::Mixed
        }
    }
}

impl fmt::Display for DominantWind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easterly => write!(f, "Easterly"),
            Self::Westerly => write!(f, "Westerly"),
            Self::Mixed => write!(f, "Mixed"),
        }
    }
}
