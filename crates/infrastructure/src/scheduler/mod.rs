//! Daily scheduling of the report cycles
//!
//! Each concern gets a [`PeriodicTask`] that runs its cycle once at start-up
//! and then at every trigger of its [`Schedule`](domain::Schedule). The
//! [`Supervisor`] runs all tasks concurrently and returns only when the
//! shared [`ShutdownSignal`] fires.

mod clock;
mod periodic;
mod shutdown;
mod supervisor;

use thiserror::Error;

pub use clock::{Clock, SystemClock};
pub use periodic::PeriodicTask;
pub use shutdown::{ShutdownReason, ShutdownSignal};
pub use supervisor::Supervisor;

/// Why a periodic task or the supervisor stopped
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The shutdown signal fired
    #[error("Scheduler cancelled: {0}")]
    Cancelled(ShutdownReason),

    /// A task's join handle reported a panic or abort
    #[error("Periodic task panicked: {0}")]
    TaskPanicked(String),
}

impl SchedulerError {
    /// Whether this is an orderly shutdown
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}
