// Signal handling module
//
// Supported signals:
// - SIGTERM: stop accepting and exit
// - SIGINT:  stop accepting and exit (Ctrl+C)

use std::io;

use crate::logger;

/// Resolves once a termination signal arrives.
///
/// If the handlers cannot be registered the server keeps running until the
/// process is killed.
pub async fn shutdown_signal() {
    match wait_for_signal().await {
        Ok(name) => logger::log_shutdown(name),
        Err(e) => {
            logger::log_warning(&format!(
                "Failed to register signal handlers: {e}; running until killed"
            ));
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => Ok("SIGTERM"),
        _ = sigint.recv() => Ok("SIGINT"),
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
async fn wait_for_signal() -> io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("Ctrl+C")
}
