use std::future::Future;
use std::io;

use anyhow::Context;

use crate::app::{router_with_config, AppState};
use crate::config;

pub async fn handle(port: Option<u16>) -> anyhow::Result<()> {
    let config = config::config();
    config.check().map_err(anyhow::Error::msg)?;
    tracing::info!("Starting Product API in {:?} mode", config.environment);

    let state = AppState::from_config(config)
        .await
        .context("failed to initialise storage")?;
    tracing::info!("Using {} storage", state.storage.name());

    let app = router_with_config(state, config);

    let port = port.unwrap_or(config.server.port);
    let bind_addr = format!("{}:{}", config.server.bind_address, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Product API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Product API stopped");
    Ok(())
}

async fn shutdown_signal() {
    shutdown_on(tokio::signal::ctrl_c()).await
}

/// Resolve when `signal` fires. If the signal cannot be listened for, the
/// server keeps running until it is killed.
async fn shutdown_on(signal: impl Future<Output = io::Result<()>>) {
    match signal.await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
