//! ヘルスチェックAPI

use crate::types::health::{DetailedHealth, HealthStatus, SystemHealth};
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

/// 全体状態に対応するHTTPステータス（unhealthy のみ 503）
pub fn status_code_for(status: HealthStatus) -> StatusCode {
    match status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
pub async fn get_health(State(state): State<AppState>) -> (StatusCode, Json<SystemHealth>) {
    let health = state.aggregator.get_system_health().await;
    (status_code_for(health.status), Json(health))
}

/// GET /health/detailed
pub async fn get_detailed_health(
    State(state): State<AppState>,
) -> (StatusCode, Json<DetailedHealth>) {
    let detailed = state.aggregator.get_detailed_health().await;
    (status_code_for(detailed.health.status), Json(detailed))
}

/// GET /health/live
pub async fn get_liveness() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
