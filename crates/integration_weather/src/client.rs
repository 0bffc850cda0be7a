//! Open-Meteo weather client
//!
//! HTTP client for the Open-Meteo Forecast API.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use domain::entities::{AFTERNOON_HOURS, MORNING_HOURS};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ApiResponse, DailyData, DailyRain, DailyWind, HourlyData, percent};

/// Open-Meteo caps forecasts at 16 days
pub const MAX_FORECAST_DAYS: u8 = 16;

const WIND_DAILY_FIELDS: &str =
    "wind_speed_10m_max,wind_gusts_10m_max,wind_direction_10m_dominant";
const RAIN_DAILY_FIELDS: &str = "precipitation_probability_max";
const RAIN_HOURLY_FIELDS: &str = "precipitation_probability";

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Parallel arrays in the response disagree in length
    #[error("Inconsistent data: {0}")]
    InconsistentData(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Weather client trait for fetching forecast data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Daily wind maxima and dominant direction
    async fn get_daily_wind(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<Vec<DailyWind>, WeatherError>;

    /// Daily rain probability with hourly morning and afternoon values
    async fn get_daily_rain(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<Vec<DailyRain>, WeatherError>;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(WeatherConfig::default())
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Build the API URL for a forecast request
    fn build_forecast_url(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
        daily: &str,
        hourly: Option<&str>,
    ) -> String {
        let days = days.clamp(1, MAX_FORECAST_DAYS);
        let mut url = format!(
            "{}/forecast?latitude={}&longitude={}&daily={}&timezone=auto&forecast_days={}",
            self.config.base_url.trim_end_matches('/'),
            latitude,
            longitude,
            daily,
            days
        );
        if let Some(hourly) = hourly {
            url.push_str("&hourly=");
            url.push_str(hourly);
        }
        url
    }

    /// Send a request and decode the response, mapping HTTP status to errors
    async fn fetch(&self, url: &str) -> Result<ApiResponse, WeatherError> {
        debug!(url = %url, "Fetching forecast");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_connect() {
                WeatherError::ConnectionFailed(e.to_string())
            } else {
                WeatherError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        debug!(
            lat = api_response.latitude,
            lon = api_response.longitude,
            timezone = %api_response.timezone,
            "Forecast received"
        );
        Ok(api_response)
    }

    fn parse_dates(daily: &DailyData) -> Result<Vec<NaiveDate>, WeatherError> {
        if daily.time.is_empty() {
            return Err(WeatherError::ParseError(
                "No daily forecast data in response".to_string(),
            ));
        }
        daily
            .time
            .iter()
            .map(|t| {
                NaiveDate::parse_from_str(t, "%Y-%m-%d")
                    .map_err(|e| WeatherError::ParseError(format!("Invalid date {t}: {e}")))
            })
            .collect()
    }

    fn require_column<'a, T>(
        name: &str,
        column: Option<&'a Vec<T>>,
        expected: usize,
    ) -> Result<&'a [T], WeatherError> {
        let column = column
            .ok_or_else(|| WeatherError::ParseError(format!("Missing daily field {name}")))?;
        if column.len() != expected {
            return Err(WeatherError::InconsistentData(format!(
                "{name} has {} entries, expected {expected}",
                column.len()
            )));
        }
        Ok(column)
    }

    /// Parse daily wind arrays
    ///
    /// Days are returned up to the first day with a missing value.
    fn parse_daily_wind(daily: &DailyData) -> Result<Vec<DailyWind>, WeatherError> {
        let dates = Self::parse_dates(daily)?;
        let n = dates.len();
        let speed = Self::require_column("wind_speed_10m_max", daily.wind_speed_10m_max.as_ref(), n)?;
        let gusts = Self::require_column("wind_gusts_10m_max", daily.wind_gusts_10m_max.as_ref(), n)?;
        let direction = Self::require_column(
            "wind_direction_10m_dominant",
            daily.wind_direction_10m_dominant.as_ref(),
            n,
        )?;

        let mut days = Vec::with_capacity(n);
        for (i, date) in dates.into_iter().enumerate() {
            let (Some(wind_speed_max), Some(wind_gusts_max), Some(wind_direction_dominant)) =
                (speed[i], gusts[i], direction[i])
            else {
                warn!(date = %date, "Wind forecast incomplete from this day on, truncating");
                break;
            };
            days.push(DailyWind {
                date,
                wind_speed_max,
                wind_gusts_max,
                wind_direction_dominant,
            });
        }

        if days.is_empty() {
            return Err(WeatherError::ParseError(
                "No complete wind forecast day in response".to_string(),
            ));
        }
        Ok(days)
    }

    /// Index hourly probabilities by local date and hour
    fn index_hourly(hourly: &HourlyData) -> Result<HashMap<(NaiveDate, u32), u8>, WeatherError> {
        let values = Self::require_column(
            "precipitation_probability",
            hourly.precipitation_probability.as_ref(),
            hourly.time.len(),
        )?;

        hourly
            .time
            .iter()
            .zip(values)
            .map(|(t, value)| {
                let at = NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M")
                    .map_err(|e| WeatherError::ParseError(format!("Invalid hour {t}: {e}")))?;
                Ok(((at.date(), at.hour()), percent(*value)))
            })
            .collect()
    }

    /// Parse daily rain probability and pick the school-run hours
    fn parse_daily_rain(
        daily: &DailyData,
        hourly: Option<&HourlyData>,
    ) -> Result<Vec<DailyRain>, WeatherError> {
        let dates = Self::parse_dates(daily)?;
        let probability = Self::require_column(
            "precipitation_probability_max",
            daily.precipitation_probability_max.as_ref(),
            dates.len(),
        )?;
        let by_hour = hourly.map(Self::index_hourly).transpose()?.unwrap_or_default();

        let pick = |date: NaiveDate, hours: &[u32]| -> Vec<u8> {
            if by_hour.is_empty() {
                return Vec::new();
            }
            hours
                .iter()
                .map(|hour| by_hour.get(&(date, *hour)).copied().unwrap_or(0))
                .collect()
        };

        Ok(dates
            .into_iter()
            .zip(probability)
            .map(|(date, p)| DailyRain {
                date,
                precipitation_probability_max: percent(*p),
                morning: pick(date, &MORNING_HOURS),
                afternoon: pick(date, &AFTERNOON_HOURS),
            })
            .collect())
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude, days = %days))]
    async fn get_daily_wind(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<Vec<DailyWind>, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = self.build_forecast_url(latitude, longitude, days, WIND_DAILY_FIELDS, None);
        let api_response = self.fetch(&url).await?;
        let daily = api_response.daily.ok_or_else(|| {
            WeatherError::ParseError("No daily forecast data in response".to_string())
        })?;

        Self::parse_daily_wind(&daily)
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude, days = %days))]
    async fn get_daily_rain(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<Vec<DailyRain>, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = self.build_forecast_url(
            latitude,
            longitude,
            days,
            RAIN_DAILY_FIELDS,
            Some(RAIN_HOURLY_FIELDS),
        );
        let api_response = self.fetch(&url).await?;
        let daily = api_response.daily.ok_or_else(|| {
            WeatherError::ParseError("No daily forecast data in response".to_string())
        })?;

        Self::parse_daily_rain(&daily, api_response.hourly.as_ref())
    }
}
