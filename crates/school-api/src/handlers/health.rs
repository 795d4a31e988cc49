//! Health check handlers
//!
//! Endpoints for ping, liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use school_service::{HealthResponse, PingResponse, ReadinessResponse};

use crate::state::AppState;

/// GET /ping
pub async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    let env = state.config().app.env;
    Json(PingResponse {
        ping: "pong!",
        environment: env.as_str().to_string(),
        testing: env.is_testing(),
    })
}

/// Basic health check (liveness probe)
///
/// GET /health, GET /health/live
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with dependency health
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let db_healthy = state.pool().acquire().await.is_ok();

    let redis_healthy = match state.redis() {
        Some(redis) => Some(redis.health_check().await.is_ok()),
        None => None,
    };

    let response = ReadinessResponse::ready(db_healthy, redis_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
