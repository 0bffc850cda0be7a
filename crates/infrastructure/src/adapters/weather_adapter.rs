//! Weather adapter - Implements the forecast ports using integration_weather

use application::error::ApplicationError;
use application::ports::{RainForecastPort, WindForecastPort};
use async_trait::async_trait;
use domain::entities::{ForecastDay, RainForecast};
use domain::value_objects::GeoLocation;
use integration_weather::{
    DailyRain, DailyWind, OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for forecasts from the Open-Meteo API
pub struct WeatherAdapter {
    client: Box<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"OpenMeteoClient")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(WeatherConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client =
            OpenMeteoClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self::with_client(Box::new(client)))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn with_client(client: Box<dyn WeatherClient>) -> Self {
        Self { client }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            WeatherError::ParseError(e) | WeatherError::InconsistentData(e) => {
                ApplicationError::ExternalService(format!("Malformed forecast: {e}"))
            },
            WeatherError::InvalidCoordinates => {
                ApplicationError::Configuration("Invalid coordinates".into())
            },
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }

    const fn map_wind(day: &DailyWind) -> ForecastDay {
        ForecastDay::new(
            day.date,
            day.wind_speed_max,
            day.wind_gusts_max,
            day.wind_direction_dominant,
        )
    }

    fn map_rain(day: DailyRain) -> RainForecast {
        RainForecast::new(
            day.date,
            day.precipitation_probability_max,
            day.morning,
            day.afternoon,
        )
    }
}

#[async_trait]
impl WindForecastPort for WeatherAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude(), days))]
    async fn fetch_wind_forecast(
        &self,
        location: &GeoLocation,
        days: u8,
    ) -> Result<Vec<ForecastDay>, ApplicationError> {
        let result = self
            .client
            .get_daily_wind(location.latitude(), location.longitude(), days)
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(forecast) => debug!(days = forecast.len(), "Retrieved wind forecast"),
            Err(e) => debug!(error = %e, "Failed to get wind forecast"),
        }

        result.map(|forecast| forecast.iter().map(Self::map_wind).collect())
    }
}

#[async_trait]
impl RainForecastPort for WeatherAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude(), days))]
    async fn fetch_rain_forecast(
        &self,
        location: &GeoLocation,
        days: u8,
    ) -> Result<Vec<RainForecast>, ApplicationError> {
        let result = self
            .client
            .get_daily_rain(location.latitude(), location.longitude(), days)
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(forecast) => debug!(days = forecast.len(), "Retrieved rain forecast"),
            Err(e) => debug!(error = %e, "Failed to get rain forecast"),
        }

        result.map(|forecast| forecast.into_iter().map(Self::map_rain).collect())
    }
}
