//! REST APIハンドラー
//!
//! ヘルスチェック・モデル一覧ゲートウェイのルーティング

pub mod error;
pub mod health;
pub mod models;

use crate::AppState;
use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// APIルーターを作成
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::get_health))
        .route("/health/detailed", get(health::get_detailed_health))
        .route("/health/live", get(health::get_liveness))
        .route("/api/models", get(models::list_models))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
