//! # OS shutdown signal.
//!
//! [`wait_for_shutdown_signal`] completes on the first termination request:
//! - **unix**: `SIGINT` (via Ctrl-C), `SIGTERM`, `SIGQUIT`;
//! - **other platforms**: Ctrl-C.

/// Waits for a termination signal. Each call installs its own listeners.
///
/// Returns `Err` if a listener cannot be installed.
pub(crate) async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        let mut quit = signal(SignalKind::quit())?;

        tokio::select! {
            res = tokio::signal::ctrl_c() => res,
            _ = terminate.recv() => Ok(()),
            _ = quit.recv() => Ok(()),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}
