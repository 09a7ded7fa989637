//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::DeckError;
use axum::{response::IntoResponse, Json};

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub DeckError);

impl From<DeckError> for AppError {
    fn from(err: DeckError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // 詳細はログにのみ出力し、クライアントには external_message() を返す
        let status = self.0.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self.0, status = status.as_u16(), "Request rejected");
        }

        (status, Json(self.0.to_envelope())).into_response()
    }
}
