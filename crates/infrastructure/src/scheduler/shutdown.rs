//! Process-wide cancellation signal

use std::{fmt, sync::Arc};

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Why the process is stopping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownReason {
    /// Ctrl+C / SIGINT
    Interrupt,
    /// SIGTERM
    Terminate,
    /// Programmatic request
    Requested(String),
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => write!(f, "interrupted"),
            Self::Terminate => write!(f, "terminated"),
            Self::Requested(why) => write!(f, "requested: {why}"),
        }
    }
}

/// Cancellation token plus the reason recorded by whoever fired it first
///
/// Clones share state; triggering any clone cancels all of them.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    token: CancellationToken,
    reason: Arc<RwLock<Option<ShutdownReason>>>,
}

impl ShutdownSignal {
    /// Create a signal that has not fired
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal; only the first reason is kept
    pub fn trigger(&self, reason: ShutdownReason) {
        {
            let mut slot = self.reason.write();
            if slot.is_some() {
                return;
            }
            info!(reason = %reason, "Shutdown requested");
            *slot = Some(reason);
        }
        self.token.cancel();
    }

    /// Whether the signal has fired
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The recorded reason, if fired
    #[must_use]
    pub fn reason(&self) -> Option<ShutdownReason> {
        self.reason.read().clone()
    }

    /// Wait until the signal fires and return its reason
    pub async fn cancelled(&self) -> ShutdownReason {
        self.token.cancelled().await;
        self.reason()
            .unwrap_or_else(|| ShutdownReason::Requested("cancelled".to_string()))
    }

    /// Underlying token, for handing to code that only needs cancellation
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}
