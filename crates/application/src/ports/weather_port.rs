//! Forecast ports
//!
//! One port per concern. Implementations must return at most `days` entries
//! with every field populated; inconsistent upstream data is an error on the
//! adapter side and never reaches the analyzers.

use async_trait::async_trait;
use domain::entities::{ForecastDay, RainForecast};
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for daily wind forecasts
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WindForecastPort: Send + Sync {
    /// Fetch `days` days of wind forecast for a location
    async fn fetch_wind_forecast(
        &self,
        location: &GeoLocation,
        days: u8,
    ) -> Result<Vec<ForecastDay>, ApplicationError>;
}

/// Port for daily rain forecasts with school-run hours
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RainForecastPort: Send + Sync {
    /// Fetch `days` days of rain forecast for a location
    async fn fetch_rain_forecast(
        &self,
        location: &GeoLocation,
        days: u8,
    ) -> Result<Vec<RainForecast>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_wind_object_safe(_: &dyn WindForecastPort) {}
    fn _assert_rain_object_safe(_: &dyn RainForecastPort) {}

    #[test]
    fn traits_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WindForecastPort>();
        assert_send_sync::<dyn RainForecastPort>();
    }
}
