//! Dextrix trading engine
//!
//! Runs the evaluation cycle against the configured exchange connector
//! and serves the HTTP API alongside it.

use dextrix::api::{self, AppState, HealthStatus};
use dextrix::config;
use dextrix::connectors::http::HttpConnector;
use dextrix::connectors::paper::PaperConnector;
use dextrix::connectors::ExchangeConnector;
use dextrix::engine::{EngineConfig, TradingEngine};
use dextrix::execution::ExecutionController;
use dextrix::logging;
use dextrix::metrics::Metrics;
use dextrix::models::market::TokenInfo;
use dextrix::profiles::ProfileManager;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;
use tokio::sync::{watch, RwLock};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    logging::init_logging();

    let environment = config::get_environment();
    let quote_token = config::quote_token();
    info!("Starting Dextrix Trading Engine");
    info!(environment = %environment, "Environment");

    let metrics = Arc::new(Metrics::new()?);
    let profiles = Arc::new(ProfileManager::new());
    let execution = Arc::new(ExecutionController::new());

    let connector: Arc<dyn ExchangeConnector> = match config::get_quote_api_url() {
        Some(url) => {
            info!(url = %url, "using quote-aggregator HTTP connector");
            Arc::new(HttpConnector::new(&url)?)
        }
        None => {
            info!("QUOTE_API_URL not set, using paper connector");
            Arc::new(
                PaperConnector::new(&quote_token)
                    .with_token(TokenInfo::new("WETH", "0xC02aaA39", 18), 2450.0)
                    .with_token(TokenInfo::new("WBTC", "0x2260FAC5", 8), 64200.0)
                    .with_token(TokenInfo::new("LINK", "0x514910771", 18), 14.8)
                    .with_balance(&quote_token, 10_000.0),
            )
        }
    };

    let engine_config = EngineConfig {
        quote_token,
        trading_enabled: config::trading_enabled(),
        scan_interval_override: config::scan_interval_override(),
        ..EngineConfig::default()
    };
    let engine = Arc::new(TradingEngine::new(
        engine_config,
        connector,
        profiles.clone(),
        execution.clone(),
        metrics.clone(),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let engine_task = {
        let engine = engine.clone();
        tokio::spawn(async move {
            engine.run(shutdown_rx).await;
        })
    };

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics: metrics.clone(),
        start_time: Arc::new(Instant::now()),
        profiles,
        execution,
        engine,
    };
    let port = config::get_port();
    let server_task = tokio::spawn(async move {
        if let Err(e) = api::start_server(port, state).await {
            tracing::error!(error = %e, "HTTP server exited with error");
        }
    });

    info!("Engine and API started, waiting for shutdown signal...");
    signal::ctrl_c().await?;
    info!("Shutting down...");

    // Stop scheduling new cycles; the in-flight cycle finishes naturally.
    let _ = shutdown_tx.send(true);
    let _ = engine_task.await;
    server_task.abort();
    info!("Stopped");

    Ok(())
}
