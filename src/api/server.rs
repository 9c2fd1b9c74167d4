//! Server lifecycle: bind, serve, stop on Ctrl-C.

use anyhow::{Context, Result};
use log::{error, info};
use tokio::net::TcpListener;

use crate::api::router::build_router;
use crate::api::types::AppState;
use crate::config::Config;

/// Serve the API until a shutdown signal arrives.
pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    let app = build_router(state, &config.server.cors_origins);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Failed to listen for shutdown signal: {e}"),
    }
}
