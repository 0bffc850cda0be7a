//! Weather data models
//!
//! Types for representing forecast data from the Open-Meteo API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of wind forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWind {
    /// Forecast date in the location's timezone
    pub date: NaiveDate,
    /// Maximum wind speed at 10 m (km/h)
    pub wind_speed_max: f64,
    /// Maximum gust at 10 m (km/h)
    pub wind_gusts_max: f64,
    /// Dominant wind direction (degrees)
    pub wind_direction_dominant: f64,
}

/// One day of rain forecast with hourly school-run values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRain {
    /// Forecast date in the location's timezone
    pub date: NaiveDate,
    /// Daily maximum precipitation probability (0-100)
    pub precipitation_probability_max: u8,
    /// Hourly probabilities for the morning hours, in hour order
    pub morning: Vec<u8>,
    /// Hourly probabilities for the afternoon hours, in hour order
    pub afternoon: Vec<u8>,
}

/// Raw API response from Open-Meteo
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub daily: Option<DailyData>,
    #[serde(default)]
    pub hourly: Option<HourlyData>,
}

/// Daily arrays; every requested variable is a parallel array to `time`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DailyData {
    pub time: Vec<String>,
    #[serde(default)]
    pub wind_speed_10m_max: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub wind_gusts_10m_max: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub wind_direction_10m_dominant: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub precipitation_probability_max: Option<Vec<Option<f64>>>,
}

/// Hourly arrays
#[derive(Debug, Default, Deserialize)]
pub(crate) struct HourlyData {
    pub time: Vec<String>,
    #[serde(default)]
    pub precipitation_probability: Option<Vec<Option<f64>>>,
}

/// Convert an API percentage to `u8`, treating null as 0
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn percent(value: Option<f64>) -> u8 {
    match value {
        Some(v) if v.is_finite() => v.round().clamp(0.0, 100.0) as u8,
        _ => 0,
    }
}
