//! Trading Bot Configuration Store — Entry Point
//!
//! Validates the configuration documents and keeps them under watch,
//! publishing a fresh snapshot whenever a document changes on disk.
//! Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Build strategy/market/exchange repositories over the JSON store
//! 4. Load every document once (schema or I/O failure aborts startup)
//! 5. Spawn the document watcher (hot reload)
//! 6. Wait for SIGINT → graceful shutdown

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use tradebot_config_store::adapters::persistence::ConfigRepositories;
use tradebot_config_store::config;
use tradebot_config_store::config::hot_reload::DocumentWatcher;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config = config::loader::load_config(&config_path)
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.service.log_level)
                }),
        )
        .json()
        .init();

    info!(
        name = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        datastore = %config.datastore.dir,
        "Starting configuration store"
    );

    // ── 3. Repositories over the JSON document store ────────
    let repositories = ConfigRepositories::from_config(&config.datastore);

    // ── 4. Validate every document before doing anything else
    let startup = repositories.clone();
    let snapshot = tokio::task::spawn_blocking(move || startup.snapshot())
        .await
        .context("Startup validation task failed")?
        .context("Configuration documents failed to load")?;

    info!(
        strategies = snapshot.strategies.len(),
        markets = snapshot.markets.len(),
        enabled_markets = snapshot.enabled_markets().count(),
        exchange = %snapshot.exchange.name,
        "Configuration documents validated"
    );

    if !config.watcher.enabled {
        warn!("Document watcher disabled, exiting after validation");
        return Ok(());
    }

    // ── 5. Spawn the document watcher ───────────────────────
    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);
    let (mut watcher, _snapshot_rx) = DocumentWatcher::new(
        repositories,
        snapshot,
        Duration::from_secs(config.watcher.poll_interval_seconds),
    );
    let watcher_shutdown = shutdown_tx.subscribe();
    let watcher_handle = tokio::spawn(async move {
        if let Err(e) = watcher.run(watcher_shutdown).await {
            error!(error = %e, "Document watcher failed");
        }
    });

    info!("Document watcher running");

    // ── 6. Wait for SIGINT ──────────────────────────────────
    signal::ctrl_c().await.context("Failed to listen for SIGINT")?;
    info!("SIGINT received, initiating graceful shutdown");

    let _ = shutdown_tx.send(());
    let _ = tokio::time::timeout(Duration::from_secs(5), watcher_handle).await;

    info!("Shutdown complete");
    Ok(())
}
