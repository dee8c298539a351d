//! Chainboard - Network Upgrade Dashboard Gateway
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use chainboard_domain::{ChainboardError, Result};
use chainboard_lib::{build_router, AppContext};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging FIRST so we can see .env loading
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load environment variables from .env file
    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(err) => warn!(error = %err, "could not load .env file"),
    }

    let config = chainboard_infra::config::load()?;
    let listen_addr = config.listen_addr;

    let context = Arc::new(AppContext::new(config)?);
    let app = build_router(context);

    let listener = tokio::net::TcpListener::bind(listen_addr).await.map_err(|err| {
        ChainboardError::Network(format!("failed to bind {listen_addr}: {err}"))
    })?;

    info!(%listen_addr, "chainboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| ChainboardError::Internal(format!("server error: {err}")))?;

    info!("shutdown complete");
    Ok(())
}

/// Resolve when the process receives an interrupt.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
