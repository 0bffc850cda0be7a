//! Per-concern configuration: forecast point, day count and daily schedule.

use domain::{DomainError, GeoLocation, Schedule};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::default_true;

/// Open-Meteo caps forecasts at 16 days
pub const MAX_FORECAST_DAYS: u8 = 16;

/// Daily trigger time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Hour of day (0-23)
    #[serde(default = "default_hour")]
    pub hour: u32,

    /// Minute (0-59)
    #[serde(default)]
    pub minute: u32,

    /// IANA timezone identifier (default: UTC)
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

const fn default_hour() -> u32 {
    10
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            hour: default_hour(),
            minute: 0,
            timezone: default_timezone(),
        }
    }
}

impl ScheduleConfig {
    /// Convert to a validated domain [`Schedule`]
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown timezone or an out-of-range time.
    pub fn to_schedule(&self) -> Result<Schedule, DomainError> {
        Schedule::parse(self.hour, self.minute, &self.timezone)
    }
}

/// One monitored concern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcernConfig {
    /// Whether the concern is scheduled at all (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Name used in prompts and message titles
    #[serde(default)]
    pub location_name: String,

    /// Latitude (-90.0 to 90.0)
    #[serde(default)]
    pub latitude: f64,

    /// Longitude (-180.0 to 180.0)
    #[serde(default)]
    pub longitude: f64,

    /// Days to fetch, clamped to 1-16
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    /// Daily trigger time
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

const fn default_forecast_days() -> u8 {
    7
}

impl Default for ConcernConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            location_name: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            forecast_days: default_forecast_days(),
            schedule: ScheduleConfig::default(),
        }
    }
}

impl ConcernConfig {
    /// London Heathrow, 15 days, daily at 10:00 UTC
    #[must_use]
    pub fn wind_defaults() -> Self {
        Self {
            enabled: true,
            location_name: "London Heathrow".to_string(),
            latitude: 51.47,
            longitude: -0.4543,
            forecast_days: 15,
            schedule: ScheduleConfig::default(),
        }
    }

    /// Central London, 7 days, daily at 06:30 London time
    #[must_use]
    pub fn school_run_defaults() -> Self {
        Self {
            enabled: true,
            location_name: "London".to_string(),
            latitude: 51.5074,
            longitude: -0.1278,
            forecast_days: 7,
            schedule: ScheduleConfig {
                hour: 6,
                minute: 30,
                timezone: "Europe/London".to_string(),
            },
        }
    }

    /// Convert to a validated domain [`GeoLocation`]
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if out of range.
    pub fn location(&self) -> Result<GeoLocation, DomainError> {
        GeoLocation::new(self.latitude, self.longitude)
    }

    /// Clamp `forecast_days` into 1-16, logging when it changes
    pub fn clamp_forecast_days(&mut self, concern: &str) {
        let clamped = self.forecast_days.clamp(1, MAX_FORECAST_DAYS);
        if clamped != self.forecast_days {
            warn!(
                concern,
                configured = self.forecast_days,
                used = clamped,
                "forecast_days out of range, clamped"
            );
            self.forecast_days = clamped;
        }
    }
}
