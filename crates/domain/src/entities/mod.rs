//! Domain entities - forecast data handed from forecasters to analyzers

mod forecast;

pub use forecast::{AFTERNOON_HOURS, ForecastDay, MORNING_HOURS, RainForecast};
