//! Forecast entities
//!
//! Produced fresh by a forecaster on every cycle and discarded afterwards.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::value_objects::{WindDirection, compass_label};

/// Local hours covered by [`RainForecast::morning_rain_prob`], in order
pub const MORNING_HOURS: [u32; 5] = [6, 7, 8, 9, 10];

/// Local hours covered by [`RainForecast::afternoon_prob`], in order
pub const AFTERNOON_HOURS: [u32; 4] = [15, 16, 17, 18];

/// One day of wind forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Forecast date (local to the forecast point)
    pub date: NaiveDate,
    /// Maximum wind speed at 10 m in km/h
    pub wind_speed_max: f64,
    /// Maximum gust at 10 m in km/h
    pub wind_gust_max: f64,
    /// Dominant wind bearing in degrees, 0 = north
    pub wind_dir_mean: f64,
}

impl ForecastDay {
    /// Create a forecast day
    #[must_use]
    pub const fn new(
        date: NaiveDate,
        wind_speed_max: f64,
        wind_gust_max: f64,
        wind_dir_mean: f64,
    ) -> Self {
        Self {
            date,
            wind_speed_max,
            wind_gust_max,
            wind_dir_mean,
        }
    }

    /// Easterly/westerly classification of this day
    #[must_use]
    pub fn direction(&self) -> WindDirection {
        WindDirection::from_degrees(self.wind_dir_mean)
    }

    /// 16-point compass label of the mean bearing
    #[must_use]
    pub fn compass(&self) -> &'static str {
        compass_label(self.wind_dir_mean)
    }
}

/// One day of rain forecast with the school-run hours broken out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RainForecast {
    /// Forecast date (local to the forecast point)
    pub date: NaiveDate,
    /// Daily maximum precipitation probability in percent
    pub precip_prob: u8,
    /// Hourly probabilities for [`MORNING_HOURS`]; may be shorter or empty
    #[serde(default)]
    pub morning_rain_prob: Vec<u8>,
    /// Hourly probabilities for [`AFTERNOON_HOURS`]; may be shorter or empty
    #[serde(default)]
    pub afternoon_prob: Vec<u8>,
}

impl RainForecast {
    /// Create a rain forecast day
    #[must_use]
    pub const fn new(
        date: NaiveDate,
        precip_prob: u8,
        morning_rain_prob: Vec<u8>,
        afternoon_prob: Vec<u8>,
    ) -> Self {
        Self {
            date,
            precip_prob,
            morning_rain_prob,
            afternoon_prob,
        }
    }

    /// Day of the week of the forecast date
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Saturday or Sunday
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Highest morning probability among the given local hours
    ///
    /// `None` when no entry covers any of the hours.
    #[must_use]
    pub fn morning_max(&self, hours: RangeInclusive<u32>) -> Option<u8> {
        max_in_window(&self.morning_rain_prob, &MORNING_HOURS, &hours)
    }

    /// Highest afternoon probability among the given local hours
    ///
    /// `None` when no entry covers any of the hours.
    #[must_use]
    pub fn afternoon_max(&self, hours: RangeInclusive<u32>) -> Option<u8> {
        max_in_window(&self.afternoon_prob, &AFTERNOON_HOURS, &hours)
    }
}

fn max_in_window(values: &[u8], covered: &[u32], window: &RangeInclusive<u32>) -> Option<u8> {
    values
        .iter()
        .zip(covered)
        .filter(|(_, hour)| window.contains(hour))
        .map(|(value, _)| *value)
        .max()
}
