//! Run-now-then-daily loop around one cycle runner

use std::{any::Any, fmt, panic::AssertUnwindSafe, sync::Arc, time::Duration};

use application::{CycleOutcome, CycleRunner};
use domain::Schedule;
use futures::FutureExt;
use tracing::{error, info, warn};

use super::{Clock, SchedulerError, ShutdownSignal};

/// One concern on its own daily schedule
#[derive(Clone)]
pub struct PeriodicTask {
    runner: Arc<dyn CycleRunner>,
    schedule: Schedule,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for PeriodicTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeriodicTask")
            .field("concern", &self.runner.name())
            .field("schedule", &self.schedule)
            .finish_non_exhaustive()
    }
}

impl PeriodicTask {
    /// Create a task for `runner` firing on `schedule`
    #[must_use]
    pub fn new(runner: Arc<dyn CycleRunner>, schedule: Schedule, clock: Arc<dyn Clock>) -> Self {
        Self {
            runner,
            schedule,
            clock,
        }
    }

    /// Concern name of the wrapped runner
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.runner.name()
    }

    /// The task's schedule
    #[must_use]
    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Run a cycle now, then once per scheduled trigger, until `shutdown` fires
    ///
    /// Cycle failures and panics are logged and never end the loop. An
    /// in-flight cycle is dropped when the signal fires.
    pub async fn run(&self, shutdown: ShutdownSignal) -> SchedulerError {
        let concern = self.name();
        info!(concern, schedule = %self.schedule, "Periodic task started");

        loop {
            tokio::select! {
                biased;
                reason = shutdown.cancelled() => {
                    warn!(concern, reason = %reason, "Cycle aborted by shutdown");
                    return SchedulerError::Cancelled(reason);
                },
                outcome = AssertUnwindSafe(self.runner.run_cycle()).catch_unwind() => {
                    match outcome {
                        Ok(outcome) => log_outcome(concern, &outcome),
                        Err(panic) => error!(
                            concern,
                            panic = %panic_message(panic.as_ref()),
                            "Cycle panicked"
                        ),
                    }
                },
            }

            let now = self.clock.now();
            let next_run = self.schedule.next_trigger(now);
            let wait = (next_run - now).to_std().unwrap_or(Duration::ZERO);
            info!(concern, next_run = %next_run, wait_secs = wait.as_secs(), "Waiting for next run");

            tokio::select! {
                biased;
                reason = shutdown.cancelled() => {
                    info!(concern, reason = %reason, "Periodic task stopped");
                    return SchedulerError::Cancelled(reason);
                },
                () = tokio::time::sleep(wait) => {},
            }
        }
    }
}

fn log_outcome(concern: &str, outcome: &CycleOutcome) {
    match outcome {
        CycleOutcome::FetchFailed => warn!(concern, "Cycle ended without a report"),
        CycleOutcome::Completed {
            summarized,
            delivery,
        } => info!(concern, summarized, delivery = ?delivery, "Cycle finished"),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}
