//! # mqttsyncd — MQTT settings daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the settings repository, broker probe and tools inventory
//! - Construct the settings service, injecting adapters via port traits
//! - Build the axum router and serve it
//! - Handle graceful shutdown (SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use mqttsync_adapter_http_axum::state::AppState;
use mqttsync_adapter_mqtt::{PathInventory, RumqttcProbe};
use mqttsync_adapter_storage_sqlite_sqlx::SqliteSettingsRepository;
use mqttsync_app::services::settings_service::SettingsService;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let pool = config.database.open().await.context("opening database")?;

    // Adapters
    let repo = SqliteSettingsRepository::new(pool);
    let probe = RumqttcProbe::new(config.probe.clone());
    let inventory = PathInventory::new(config.inventory.clone());

    // Services
    let settings_service = SettingsService::new(repo, probe, inventory);

    // HTTP
    let app = mqttsync_adapter_http_axum::router::build(AppState::new(settings_service));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(%bind_addr, "mqttsyncd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving http")?;

    tracing::info!("mqttsyncd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
