//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and hosts the runtime
//! pieces around them: configuration, logging and the daily scheduler.

pub mod adapters;
pub mod config;
pub mod scheduled_tasks;
pub mod scheduler;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ConcernConfig, ConfigError, TelegramAppConfig, TelemetryAppConfig};
pub use scheduled_tasks::{
    Collaborators, create_periodic_tasks, create_school_run_cycle, create_wind_cycle,
};
pub use scheduler::{
    Clock, PeriodicTask, SchedulerError, ShutdownReason, ShutdownSignal, Supervisor, SystemClock,
};
pub use telemetry::{TelemetryError, init_telemetry};
