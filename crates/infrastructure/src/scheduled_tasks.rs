//! Factory functions for the scheduled report cycles
//!
//! Builds the wind and school-run cycle runners from [`AppConfig`] and wraps
//! the enabled ones in [`PeriodicTask`]s.

use std::sync::Arc;

use application::{
    CycleRunner, CycleSettings, InferencePort, MessengerPort, RainForecastPort, SchoolRunCycle,
    WindForecastPort, WindReportCycle, error::ApplicationError,
};
use tracing::{info, warn};

use crate::{
    adapters::{OllamaInferenceAdapter, TelegramAdapter, WeatherAdapter},
    config::{AppConfig, ConcernConfig, ConfigError},
    scheduler::{Clock, PeriodicTask},
};

/// Config section of the wind concern
pub const WIND_SECTION: &str = "wind";
/// Config section of the school-run concern
pub const SCHOOL_RUN_SECTION: &str = "school_run";

/// Port implementations shared by both cycles
#[derive(Clone)]
pub struct Collaborators {
    /// Daily wind forecasts
    pub wind_forecaster: Arc<dyn WindForecastPort>,
    /// Daily and hourly rain forecasts
    pub rain_forecaster: Arc<dyn RainForecastPort>,
    /// Summarizer
    pub inference: Arc<dyn InferencePort>,
    /// Notifier
    pub messenger: Arc<dyn MessengerPort>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("model", &self.inference.current_model())
            .field("transport", &self.messenger.transport_name())
            .finish_non_exhaustive()
    }
}

impl Collaborators {
    /// Build the Open-Meteo, Ollama and Telegram adapters
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApplicationError> {
        let weather = Arc::new(WeatherAdapter::with_config(config.weather.clone())?);
        let inference = Arc::new(OllamaInferenceAdapter::new(config.inference.clone())?);
        let messenger = Arc::new(TelegramAdapter::new(config.telegram.client_config())?);

        if !config.telegram.is_configured() {
            warn!("Telegram bot token or chat id missing, reports will only be logged");
        }

        Ok(Self {
            wind_forecaster: weather.clone(),
            rain_forecaster: weather,
            inference,
            messenger,
        })
    }
}

fn settings(
    config: &AppConfig,
    section: &'static str,
    concern: &ConcernConfig,
) -> Result<CycleSettings, ConfigError> {
    Ok(CycleSettings {
        location: concern
            .location()
            .map_err(|source| ConfigError::Invalid { section, source })?,
        location_name: concern.location_name.clone(),
        forecast_days: concern.forecast_days,
        destination: config.telegram.destination(),
    })
}

/// Build the wind cycle runner
///
/// # Errors
///
/// Returns an error if the configured location is invalid.
pub fn create_wind_cycle(
    config: &AppConfig,
    collaborators: &Collaborators,
) -> Result<Arc<dyn CycleRunner>, ConfigError> {
    let settings = settings(config, WIND_SECTION, &config.wind)?;
    Ok(Arc::new(WindReportCycle::new(
        Arc::clone(&collaborators.wind_forecaster),
        Arc::clone(&collaborators.inference),
        Arc::clone(&collaborators.messenger),
        settings,
    )))
}

/// Build the school-run cycle runner
///
/// # Errors
///
/// Returns an error if the configured location is invalid.
pub fn create_school_run_cycle(
    config: &AppConfig,
    collaborators: &Collaborators,
) -> Result<Arc<dyn CycleRunner>, ConfigError> {
    let settings = settings(config, SCHOOL_RUN_SECTION, &config.school_run)?;
    Ok(Arc::new(SchoolRunCycle::new(
        Arc::clone(&collaborators.rain_forecaster),
        Arc::clone(&collaborators.inference),
        Arc::clone(&collaborators.messenger),
        settings,
    )))
}

/// Periodic tasks for every enabled concern
///
/// # Errors
///
/// Returns an error if an enabled concern has an invalid location or schedule.
pub fn create_periodic_tasks(
    config: &AppConfig,
    collaborators: &Collaborators,
    clock: &Arc<dyn Clock>,
) -> Result<Vec<PeriodicTask>, ConfigError> {
    type Factory = fn(&AppConfig, &Collaborators) -> Result<Arc<dyn CycleRunner>, ConfigError>;
    let concerns: [(&'static str, &ConcernConfig, Factory); 2] = [
        (WIND_SECTION, &config.wind, create_wind_cycle),
        (SCHOOL_RUN_SECTION, &config.school_run, create_school_run_cycle),
    ];

    let mut tasks = Vec::with_capacity(concerns.len());
    for (section, concern, factory) in concerns {
        if !concern.enabled {
            info!(concern = section, "Concern disabled, not scheduled");
            continue;
        }
        let schedule = concern
            .schedule
            .to_schedule()
            .map_err(|source| ConfigError::Invalid { section, source })?;
        let runner = factory(config, collaborators)?;
        tasks.push(PeriodicTask::new(runner, schedule, Arc::clone(clock)));
    }
    Ok(tasks)
}
