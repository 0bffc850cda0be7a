//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `SKYWATCH_*` environment variables (`__` separates sections,
//! e.g. `SKYWATCH_WIND__SCHEDULE__HOUR=9`), then the legacy variables of the
//! single-concern deployment (`OLLAMA_HOST`, `FORECAST_DAYS`, ...).
//!
//! Split into focused sub-modules:
//! - `concerns`: forecast point, day count and schedule per concern
//! - `messenger`: Telegram
//! - `telemetry`: log filter and format

mod concerns;
mod messenger;
mod telemetry;

use std::{collections::HashMap, path::Path};

use ai_core::InferenceConfig;
use domain::DomainError;
use integration_weather::WeatherConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub use concerns::{ConcernConfig, MAX_FORECAST_DAYS, ScheduleConfig};
pub use messenger::TelegramAppConfig;
pub use telemetry::TelemetryAppConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "SKYWATCH";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Configuration errors
///
/// All of these are fatal at startup, before any periodic task runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File or environment could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// A section holds a value the domain rejects
    #[error("Invalid {section} configuration: {source}")]
    Invalid {
        section: &'static str,
        #[source]
        source: DomainError,
    },

    /// Both concerns are disabled
    #[error("No concern enabled: enable at least one of wind or school_run")]
    NothingEnabled,
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Open-Meteo client configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Ollama inference configuration
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Telegram configuration
    #[serde(default)]
    pub telegram: TelegramAppConfig,

    /// Airport wind concern
    #[serde(default = "ConcernConfig::wind_defaults")]
    pub wind: ConcernConfig,

    /// School-run rain concern
    #[serde(default = "ConcernConfig::school_run_defaults")]
    pub school_run: ConcernConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig::default(),
            inference: InferenceConfig::default(),
            telegram: TelegramAppConfig::default(),
            wind: ConcernConfig::wind_defaults(),
            school_run: ConcernConfig::school_run_defaults(),
            telemetry: TelemetryAppConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment and an optional file
    ///
    /// Without an explicit path, `config.toml` in the working directory is
    /// used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or validation rejects a value.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_with_env(path, &env)
    }

    /// Load configuration against an explicit environment map
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or validation rejects a value.
    pub fn load_with_env(
        path: Option<&Path>,
        env: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = ::config::Config::builder()
            // Start with defaults
            .set_default("weather.base_url", defaults.weather.base_url.as_str())?
            .set_default("inference.base_url", defaults.inference.base_url.as_str())?
            .set_default(
                "inference.default_model",
                defaults.inference.default_model.as_str(),
            )?;
        builder = seed_concern_defaults(builder, "wind", &defaults.wind)?;
        builder = seed_concern_defaults(builder, "school_run", &defaults.school_run)?;

        builder = match path {
            Some(path) => builder.add_source(::config::File::from(path).required(true)),
            None => builder.add_source(::config::File::with_name("config").required(false)),
        };

        // Override with environment variables (e.g., SKYWATCH_WIND__SCHEDULE__HOUR)
        let env_source: ::config::Map<String, String> =
            env.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(Some(env_source)),
        );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_legacy_env(env);
        config.normalize();
        config.validate()?;

        debug!(config = ?config, "Configuration loaded");
        Ok(config)
    }

    /// Apply the legacy single-concern environment variables
    ///
    /// Unparseable or out-of-range numeric values are ignored.
    pub fn apply_legacy_env(&mut self, env: &HashMap<String, String>) {
        let get = |key: &str| env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        if let Some(host) = get("OLLAMA_HOST") {
            self.inference.base_url = host.to_string();
        }
        if let Some(model) = get("OLLAMA_MODEL") {
            self.inference.default_model = model.to_string();
        }
        if let Some(raw) = get("FORECAST_DAYS") {
            match raw.parse::<u32>() {
                Ok(days) if days >= 1 => {
                    self.wind.forecast_days =
                        u8::try_from(days.min(u32::from(MAX_FORECAST_DAYS))).unwrap_or(MAX_FORECAST_DAYS);
                },
                _ => warn!(value = raw, "Ignoring invalid FORECAST_DAYS"),
            }
        }
        if let Some(raw) = get("WIND_CHECK_HOUR") {
            match raw.parse::<u32>() {
                Ok(hour) if hour < 24 => self.wind.schedule.hour = hour,
                _ => warn!(value = raw, "Ignoring invalid WIND_CHECK_HOUR"),
            }
        }
        if let Some(raw) = get("WIND_CHECK_MINUTE") {
            match raw.parse::<u32>() {
                Ok(minute) if minute < 60 => self.wind.schedule.minute = minute,
                _ => warn!(value = raw, "Ignoring invalid WIND_CHECK_MINUTE"),
            }
        }
        if let Some(token) = get("TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = Some(SecretString::from(token.to_owned()));
        }
        if let Some(chat_id) = get("TELEGRAM_CHAT_ID") {
            self.telegram.chat_id = Some(chat_id.to_string());
        }
    }

    /// Clamp values that have a safe nearest setting
    pub fn normalize(&mut self) {
        self.wind.clamp_forecast_days("wind");
        self.school_run.clamp_forecast_days("school_run");
    }

    /// Check every enabled concern
    ///
    /// # Errors
    ///
    /// Returns the first invalid location or schedule, or
    /// `ConfigError::NothingEnabled`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.wind.enabled && !self.school_run.enabled {
            return Err(ConfigError::NothingEnabled);
        }
        for (section, concern) in [("wind", &self.wind), ("school_run", &self.school_run)] {
            if !concern.enabled {
                continue;
            }
            concern
                .location()
                .map_err(|source| ConfigError::Invalid { section, source })?;
            concern
                .schedule
                .to_schedule()
                .map_err(|source| ConfigError::Invalid { section, source })?;
        }
        Ok(())
    }
}

fn seed_concern_defaults(
    builder: ::config::ConfigBuilder<::config::builder::DefaultState>,
    section: &str,
    concern: &ConcernConfig,
) -> Result<::config::ConfigBuilder<::config::builder::DefaultState>, ::config::ConfigError> {
    builder
        .set_default(format!("{section}.enabled"), concern.enabled)?
        .set_default(
            format!("{section}.location_name"),
            concern.location_name.as_str(),
        )?
        .set_default(format!("{section}.latitude"), concern.latitude)?
        .set_default(format!("{section}.longitude"), concern.longitude)?
        .set_default(
            format!("{section}.forecast_days"),
            i64::from(concern.forecast_days),
        )?
        .set_default(
            format!("{section}.schedule.hour"),
            i64::from(concern.schedule.hour),
        )?
        .set_default(
            format!("{section}.schedule.minute"),
            i64::from(concern.schedule.minute),
        )?
        .set_default(
            format!("{section}.schedule.timezone"),
            concern.schedule.timezone.as_str(),
        )
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.wind.location_name, "London Heathrow");
        assert_eq!(config.wind.forecast_days, 15);
        assert_eq!(config.school_run.schedule.timezone, "Europe/London");
        assert_eq!(config.inference.default_model, "llama3.1");
        assert!(!config.telegram.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn app_config_deserialization() {
        let json = r#"{"wind": {"location_name": "Gatwick", "latitude": 51.15, "longitude": -0.18}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.wind.location_name, "Gatwick");
        assert_eq!(config.school_run.location_name, "London");
    }

    #[test]
    fn load_with_empty_environment_uses_defaults() {
        let file = write_toml("");
        let config = AppConfig::load_with_env(Some(file.path()), &HashMap::new()).unwrap();
        assert_eq!(config.wind.schedule.hour, 10);
        assert_eq!(config.school_run.schedule.minute, 30);
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
    }

    #[test]
    fn file_overrides_defaults_per_field() {
        let file = write_toml(
            r#"
            [wind.schedule]
            hour = 7
            timezone = "Europe/London"

            [school_run]
            forecast_days = 5

            [telemetry]
            json = true
            "#,
        );
        let config = AppConfig::load_with_env(Some(file.path()), &HashMap::new()).unwrap();
        assert_eq!(config.wind.schedule.hour, 7);
        assert_eq!(config.wind.schedule.minute, 0);
        assert_eq!(config.wind.schedule.timezone, "Europe/London");
        assert_eq!(config.wind.location_name, "London Heathrow");
        assert_eq!(config.school_run.forecast_days, 5);
        assert_eq!(config.school_run.location_name, "London");
        assert!(config.telemetry.json);
    }

    #[test]
    fn prefixed_environment_overrides_file() {
        let file = write_toml("[wind.schedule]\nhour = 7\n");
        let config = AppConfig::load_with_env(
            Some(file.path()),
            &env(&[
                ("SKYWATCH_WIND__SCHEDULE__HOUR", "9"),
                ("SKYWATCH_SCHOOL_RUN__LOCATION_NAME", "Richmond"),
                ("SKYWATCH_TELEGRAM__CHAT_ID", "-100200300"),
            ]),
        )
        .unwrap();
        assert_eq!(config.wind.schedule.hour, 9);
        assert_eq!(config.school_run.location_name, "Richmond");
        assert_eq!(config.telegram.chat_id.as_deref(), Some("-100200300"));
    }

    #[test]
    fn legacy_environment_variables() {
        let file = write_toml("");
        let config = AppConfig::load_with_env(
            Some(file.path()),
            &env(&[
                ("OLLAMA_HOST", "http://ollama:11434"),
                ("OLLAMA_MODEL", "mistral"),
                ("FORECAST_DAYS", "10"),
                ("WIND_CHECK_HOUR", "6"),
                ("WIND_CHECK_MINUTE", "45"),
                ("TELEGRAM_BOT_TOKEN", "123:abc"),
                ("TELEGRAM_CHAT_ID", "42"),
            ]),
        )
        .unwrap();
        assert_eq!(config.inference.base_url, "http://ollama:11434");
        assert_eq!(config.inference.default_model, "mistral");
        assert_eq!(config.wind.forecast_days, 10);
        assert_eq!(config.wind.schedule.hour, 6);
        assert_eq!(config.wind.schedule.minute, 45);
        assert!(config.telegram.is_configured());
        assert_eq!(
            config.telegram.destination().credential().expose_secret(),
            "123:abc"
        );
    }

    #[test]
    fn invalid_legacy_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_legacy_env(&env(&[
            ("FORECAST_DAYS", "zero"),
            ("WIND_CHECK_HOUR", "24"),
            ("WIND_CHECK_MINUTE", "-1"),
        ]));
        assert_eq!(config.wind.forecast_days, 15);
        assert_eq!(config.wind.schedule.hour, 10);
        assert_eq!(config.wind.schedule.minute, 0);

        config.apply_legacy_env(&env(&[("FORECAST_DAYS", "0")]));
        assert_eq!(config.wind.forecast_days, 15);
    }

    #[test]
    fn legacy_forecast_days_capped_at_sixteen() {
        let mut config = AppConfig::default();
        config.apply_legacy_env(&env(&[("FORECAST_DAYS", "40")]));
        assert_eq!(config.wind.forecast_days, 16);
    }

    #[test]
    fn forecast_days_are_clamped_on_load() {
        let file = write_toml("[wind]\nforecast_days = 30\n[school_run]\nforecast_days = 0\n");
        let config = AppConfig::load_with_env(Some(file.path()), &HashMap::new()).unwrap();
        assert_eq!(config.wind.forecast_days, 16);
        assert_eq!(config.school_run.forecast_days, 1);
    }

    #[test]
    fn invalid_timezone_is_fatal() {
        let file = write_toml("[school_run.schedule]\ntimezone = \"Europe/Atlantis\"\n");
        let err = AppConfig::load_with_env(Some(file.path()), &HashMap::new()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                section: "school_run",
                source: DomainError::InvalidTimezone(_)
            }
        ));
    }

    #[test]
    fn invalid_coordinates_are_fatal() {
        let file = write_toml("[wind]\nlatitude = 95.0\n");
        let err = AppConfig::load_with_env(Some(file.path()), &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { section: "wind", .. }));
    }

    #[test]
    fn disabled_concern_is_not_validated() {
        let file = write_toml("[wind]\nenabled = false\nlatitude = 95.0\n");
        let config = AppConfig::load_with_env(Some(file.path()), &HashMap::new()).unwrap();
        assert!(!config.wind.enabled);
    }

    #[test]
    fn nothing_enabled_is_fatal() {
        let mut config = AppConfig::default();
        config.wind.enabled = false;
        config.school_run.enabled = false;
        assert!(matches!(config.validate(), Err(ConfigError::NothingEnabled)));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = AppConfig::load_with_env(
            Some(Path::new("/nonexistent/skywatch.toml")),
            &HashMap::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn config_has_debug_impl() {
        let config = AppConfig::default();
        let debug = format!("{config:?}");
        assert!(debug.contains("AppConfig"));
    }
}
