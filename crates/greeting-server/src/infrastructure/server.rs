//! Listener and lifecycle for the HTTP service.
//!
//! [`run_server`] binds the configured address and serves the router until
//! the shutdown future resolves.  In-flight requests are allowed to finish
//! before it returns.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use greeting_core::ConfigService;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::infrastructure::http::router;
use crate::settings::{CorsPolicy, ServerSettings};

/// Binds `settings.bind_addr` and serves `service` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound (port in use, missing
/// permission) or the server fails while running.
pub async fn run_server<F>(
    settings: &ServerSettings,
    service: ConfigService,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {}", settings.bind_addr))?;

    serve(listener, service, &settings.cors, shutdown).await
}

/// Serves the config routes on an already-bound `listener`.
///
/// # Errors
///
/// Returns an error if the server fails while running.
pub async fn serve<F>(
    listener: TcpListener,
    service: ConfigService,
    cors: &CorsPolicy,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener
        .local_addr()
        .context("failed to read listener address")?;
    info!("config service listening on {local_addr}");

    let app = router(Arc::new(service), cors);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    info!("config service stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or on SIGTERM on unix.
///
/// If a handler cannot be installed the error is logged and that signal is
/// ignored, so the other one can still stop the server.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => {
                error!("failed to listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
