//! Roster board document service.
//!
//! Serves the persisted board document over a small JSON API gated by a
//! shared PIN, backed by flat files on disk.

use anyhow::Result;
use roster_server::{api, config, state::AppState, store::FileStore};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize tracing (prefer RUST_LOG, fallback to ROSTER_LOG_LEVEL)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting roster board server");
    info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.data_dir.display(),
        "Configuration loaded"
    );

    if config.uses_default_pin() {
        warn!("ROSTER_PIN is unset; running with the built-in default PIN");
    }

    // Open the document store, seeding defaults on first start
    let store = FileStore::new(&config.data_dir, config.seed_dir.as_deref())?;

    // Create application state
    let state = AppState::new(store, config.pin.clone());

    // Build and run the server
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received shutdown signal");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
