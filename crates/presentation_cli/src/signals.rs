//! OS signal handling

use infrastructure::{ShutdownReason, ShutdownSignal};
use tokio::signal;
use tracing::{error, info};

/// Trigger `shutdown` on Ctrl+C or SIGTERM
///
/// Returns early if the signal fires for another reason.
pub async fn watch(shutdown: ShutdownSignal) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let reason = tokio::select! {
        () = ctrl_c => ShutdownReason::Interrupt,
        () = terminate => ShutdownReason::Terminate,
        _ = shutdown.cancelled() => return,
    };

    info!(reason = %reason, "Received signal, shutting down");
    shutdown.trigger(reason);
}
