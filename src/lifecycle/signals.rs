//! OS signal handling.
//!
//! Ctrl+C (SIGINT) and, on Unix, SIGTERM both request a graceful shutdown.
//! A handler that cannot be installed is logged and then never fires; the
//! other signal still works.

/// Resolves when the process is asked to terminate.
pub async fn termination() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!(signal = "SIGINT", "Termination requested"),
        _ = terminate => tracing::info!(signal = "SIGTERM", "Termination requested"),
    }
}
