mod api;
mod app_system;
mod auth;
mod clients;
mod config;
mod domain;
mod inventory_actor;
mod messages;
mod user_actor;


use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use crate::api::AppState;
use crate::app_system::{setup_tracing, StockSystem};
use crate::auth::TokenKeys;
use crate::config::{AppConfig, Cli, DEV_JWT_SECRET};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli).context("Failed to load configuration")?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    // Setup tracing once for the entire application
    setup_tracing();

    if config.auth.jwt_secret == DEV_JWT_SECRET {
        warn!("Running with the built-in development JWT secret; set auth.jwt_secret before deploying");
    }

    let system = StockSystem::new();
    if config.seed_demo_data {
        system.seed_demo_data().await.map_err(anyhow::Error::msg)?;
    }

    let state = AppState {
        inventory: system.inventory_client.clone(),
        directory: system.directory_client.clone(),
        tokens: TokenKeys::new(&config.auth.jwt_secret, config.auth.token_ttl_hours),
    };
    let app = api::router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Server is running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    system.shutdown().await.map_err(anyhow::Error::msg)?;

    info!("Application stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
