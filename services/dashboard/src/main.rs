use std::sync::Arc;
use tracing::{info, warn};

use bot_dashboard::{app, simulation, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to read .env: {}", e);
        }
    }

    let (config, load_error) = AppConfig::load_or_default();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .init();

    info!("Starting Bot Dashboard...");

    match load_error {
        Some(e) => warn!("Failed to load configuration: {}. Using defaults.", e),
        None => info!("Loaded configuration"),
    }

    if config.gemini.credential().is_none() {
        warn!("Gemini API key not found. AI-powered features will be disabled.");
    }

    let state = Arc::new(AppState::from_config(&config)?);
    info!("✓ Loaded {} bots", state.dashboard.read().await.registry.len());

    let tasks = simulation::spawn_all(
        state.dashboard.clone(),
        state.metrics.clone(),
        config.simulation.bot_tick(),
        config.simulation.aggregate_tick(),
    );

    let router = app(state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Bot Dashboard listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tasks.abort();
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
