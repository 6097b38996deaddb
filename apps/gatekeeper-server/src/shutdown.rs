//! Graceful shutdown trigger.

use std::future::Future;
use std::io;

/// Resolves once `signal` fires.
///
/// If the signal cannot be listened for, the error is logged and this never
/// resolves, so the server keeps running instead of stopping at startup.
pub async fn wait_for_signal<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await;
}
