//! Runs every periodic task concurrently under one shutdown signal

use tokio::task::JoinSet;
use tracing::{error, info};

use super::{PeriodicTask, SchedulerError, ShutdownSignal};

/// Owner of the periodic tasks
#[derive(Debug, Default)]
pub struct Supervisor {
    tasks: Vec<PeriodicTask>,
}

impl Supervisor {
    /// Create a supervisor over `tasks`
    #[must_use]
    pub const fn new(tasks: Vec<PeriodicTask>) -> Self {
        Self { tasks }
    }

    /// Number of supervised tasks
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether there is nothing to supervise
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Start all tasks and wait for shutdown or the first task to end
    ///
    /// Tasks are not restarted. Remaining tasks are aborted when this returns.
    pub async fn run(self, shutdown: ShutdownSignal) -> SchedulerError {
        let mut set = JoinSet::new();
        for task in self.tasks {
            info!(concern = task.name(), schedule = %task.schedule(), "Starting periodic task");
            let shutdown = shutdown.clone();
            set.spawn(async move { task.run(shutdown).await });
        }

        let result = tokio::select! {
            reason = shutdown.cancelled() => SchedulerError::Cancelled(reason),
            Some(joined) = set.join_next() => match joined {
                Ok(err) => err,
                Err(e) => {
                    error!(error = %e, "Periodic task failed");
                    SchedulerError::TaskPanicked(e.to_string())
                },
            },
        };

        set.abort_all();
        info!(result = %result, "Supervisor stopped");
        result
    }
}
