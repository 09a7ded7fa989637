//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! # エラーエンベロープ
//!
//! `DeckError`は`external_message()`と`status_code()`を提供し、
//! ダッシュボード向けの `{success, error, timestamp}` 形式のレスポンスを生成できる。
//! プローブ単位の失敗はエラーではなく `ServiceHealth` として表現する。

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// agentdeck error type
#[derive(Debug, Error)]
pub enum DeckError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Timeout error
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Service unavailable (upstream handle not configured)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Upstream service returned an unexpected response
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Store (database) connectivity error
    #[error("Store error: {0}")]
    Store(String),

    /// Cache (key-value store) error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DeckError {
    /// Returns a safe error message for external clients.
    ///
    /// The message never contains URLs, hostnames or upstream response bodies.
    /// Use the `Display` implementation for server-side logs.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Common(_) => "Request error",
            Self::NotFound(_) => "Not found",
            Self::Http(_) => "Backend service unavailable",
            Self::Timeout(_) => "Request timeout",
            Self::ServiceUnavailable(_) => "Service temporarily unavailable",
            Self::Upstream(_) => "Internal server error",
            Self::Store(_) => "Internal server error",
            Self::Cache(_) => "Internal server error",
            Self::Internal(_) => "Internal server error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Common(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Cache(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts this error to the dashboard error envelope.
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope::new(self.external_message())
    }
}

impl From<reqwest::Error> for DeckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DeckError::Timeout(err.to_string())
        } else {
            DeckError::Http(err.to_string())
        }
    }
}

/// 失敗時のレスポンスエンベロープ
///
/// # Example
///
/// ```json
/// {
///   "success": false,
///   "error": "Service temporarily unavailable",
///   "timestamp": "2024-01-01T00:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    /// 常に false
    pub success: bool,
    /// クライアント向けエラーメッセージ
    pub error: String,
    /// レスポンス生成時刻
    pub timestamp: DateTime<Utc>,
}

impl ErrorEnvelope {
    /// 現在時刻でエンベロープを作成
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Result type alias (agentdeck)
pub type DeckResult<T> = Result<T, DeckError>;
