//! HTTP surface using Axum
//!
//! Read-only accessors for trades, performance, positions and profiles,
//! plus the profile commands (create/update/delete/activate). The engine
//! itself never depends on this module.

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::engine::TradingEngine;
use crate::execution::ExecutionController;
use crate::metrics::Metrics;
use crate::models::profile::{
    RiskSettings, StrategyKind, StrategyWeights, TradingProfile, TradingSettings,
};
use crate::profiles::{ProfileError, ProfileManager};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub profiles: Arc<ProfileManager>,
    pub execution: Arc<ExecutionController>,
    pub engine: Arc<TradingEngine>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "dextrix-trading-engine"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
struct ProfileRequest {
    id: Option<String>,
    name: String,
    #[serde(default)]
    description: String,
    weights: StrategyWeights,
    enabled: HashSet<StrategyKind>,
    #[serde(default)]
    risk: RiskSettings,
    #[serde(default)]
    trading: TradingSettings,
}

impl ProfileRequest {
    fn into_profile(self, id: String) -> TradingProfile {
        TradingProfile {
            id,
            name: self.name,
            description: self.description,
            weights: self.weights,
            enabled: self.enabled,
            risk: self.risk,
            trading: self.trading,
            builtin: false,
        }
    }
}

fn profile_error_status(e: &ProfileError) -> StatusCode {
    match e {
        ProfileError::InvalidWeights { .. } => StatusCode::BAD_REQUEST,
        ProfileError::Immutable(_) => StatusCode::FORBIDDEN,
        ProfileError::NotFound(_) => StatusCode::NOT_FOUND,
        ProfileError::DuplicateId(_) => StatusCode::CONFLICT,
    }
}

async fn list_profiles(State(state): State<AppState>) -> Json<Value> {
    let profiles = state.profiles.list().await;
    let active = state.profiles.active_id().await;
    Json(json!({ "active": active, "profiles": profiles }))
}

async fn current_profile(State(state): State<AppState>) -> Json<TradingProfile> {
    Json(state.profiles.current().await)
}

async fn create_profile(
    State(state): State<AppState>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<TradingProfile>, StatusCode> {
    let id = request
        .id
        .clone()
        .unwrap_or_else(|| request.name.to_lowercase().replace(' ', "-"));
    let profile = request.into_profile(id.clone());
    state.profiles.create(profile.clone()).await.map_err(|e| {
        error!(error = %e, "failed to create profile");
        profile_error_status(&e)
    })?;
    Ok(Json(profile))
}

async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<TradingProfile>, StatusCode> {
    let profile = request.into_profile(id.clone());
    state.profiles.update(&id, profile.clone()).await.map_err(|e| {
        error!(error = %e, profile = %id, "failed to update profile");
        profile_error_status(&e)
    })?;
    Ok(Json(profile))
}

async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    state.profiles.delete(&id).await.map_err(|e| {
        error!(error = %e, profile = %id, "failed to delete profile");
        profile_error_status(&e)
    })?;
    Ok(StatusCode::NO_CONTENT)
}

async fn activate_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    if !state.profiles.switch(&id).await {
        return Err(StatusCode::NOT_FOUND);
    }
    info!(profile = %id, "profile activated via API");
    Ok(Json(json!({ "active": id })))
}

async fn active_trades(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.execution.active_trades().await))
}

async fn trade_history(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.execution.trade_history().await))
}

async fn performance(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.execution.performance().await))
}

async fn dca_positions(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.engine.dca_positions().await))
}

async fn clear_dca_position(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<StatusCode, StatusCode> {
    if state.engine.clear_dca_position(&token).await {
        info!(token = %token, "DCA position cleared via API");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/profiles", get(list_profiles))
        .route("/api/profiles", post(create_profile))
        .route("/api/profiles/current", get(current_profile))
        .route("/api/profiles/{id}", put(update_profile))
        .route("/api/profiles/{id}", delete(delete_profile))
        .route("/api/profiles/{id}/activate", post(activate_profile))
        .route("/api/trades/active", get(active_trades))
        .route("/api/trades/history", get(trade_history))
        .route("/api/performance", get(performance))
        .route("/api/positions", get(dca_positions))
        .route("/api/positions/{token}", delete(clear_dca_position))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    port: u16,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
