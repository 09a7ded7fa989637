//! モデル一覧ゲートウェイ
//!
//! `GET /api/models` を上流のモデルサービス（`GET <upstream>/models`）へ委譲する。
//! 上流の詳細（URL・ステータス・ボディ）はログにのみ残し、クライアントには返さない。

use crate::api::error::AppError;
use crate::common::error::{DeckError, DeckResult};
use crate::AppState;
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// 上流リクエストのタイムアウト（秒）
const MODELS_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// 上流へ付与するリクエストIDヘッダー
const REQUEST_ID_HEADER: &str = "x-request-id";

/// 上流モデルサービスへのハンドル
#[derive(Clone)]
pub struct ModelsUpstream {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for ModelsUpstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelsUpstream")
            .field("base_url", &self.base_url)
            .field("api_key_present", &self.api_key.is_some())
            .finish()
    }
}

impl ModelsUpstream {
    /// 新しいハンドルを作成
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> DeckResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(MODELS_UPSTREAM_TIMEOUT_SECS))
            .build()
            .map_err(|e| DeckError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// モデル一覧を取得
    ///
    /// 送信エラー・2xx 以外・JSON以外の応答はすべて `DeckError::Upstream`。
    pub async fn fetch_models(&self) -> DeckResult<Value> {
        let url = format!("{}/models", self.base_url);
        let request_id = Uuid::new_v4().to_string();
        debug!(request_id = %request_id, "Forwarding models request to {}", url);

        let mut request = self
            .http_client
            .get(&url)
            .header(REQUEST_ID_HEADER, &request_id);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            DeckError::Upstream(format!("models request {} failed: {}", request_id, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                request_id = %request_id,
                status = status.as_u16(),
                body = %body,
                "Models upstream returned error status"
            );
            return Err(DeckError::Upstream(format!("HTTP {}", status)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| DeckError::Upstream(format!("Invalid models response: {}", e)))
    }
}

/// 成功時のレスポンス
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    /// 常に true
    pub success: bool,
    /// 上流のJSONをそのまま格納
    pub data: Value,
    /// レスポンス生成時刻
    pub timestamp: DateTime<Utc>,
}

/// GET /api/models
pub async fn list_models(State(state): State<AppState>) -> Result<Json<ModelsResponse>, AppError> {
    let upstream = state.models_upstream.as_ref().ok_or_else(|| {
        DeckError::ServiceUnavailable("models upstream is not configured".to_string())
    })?;

    let data = upstream.fetch_models().await?;

    Ok(Json(ModelsResponse {
        success: true,
        data,
        timestamp: Utc::now(),
    }))
}
