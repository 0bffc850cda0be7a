//! Open-Meteo weather integration
//!
//! Client for the Open-Meteo Forecast API (<https://open-meteo.com>).
//! Provides daily wind and rain forecasts without requiring an API key.

pub mod client;
mod models;

pub use client::{MAX_FORECAST_DAYS, OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{DailyRain, DailyWind};
