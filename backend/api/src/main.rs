//! Intercobros API — entry point.
//!
//! Serves clients, avales, collection cases and synthetic payment ledgers
//! from an in-memory store. Ledger figures come from `intercobros_ledger`
//! and are recomputed on every request; only payments recorded while the
//! process runs are kept, and only until it stops.

mod api;
mod auth;
mod cobros;
mod config;
mod errors;
mod extract;
mod records;
mod store;


use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use api::AppState;
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;

    // ─── Store and accounts ───────────────────────────────
    let state = Arc::new(AppState::from_config(&config)?);
    info!("Demo account: {}", config.admin_username);

    // ─── REST API ─────────────────────────────────────────
    let app = api::router(state);

    let addr = format!("0.0.0.0:{}", config.api_port);
    info!("API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped; in-memory store discarded");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
