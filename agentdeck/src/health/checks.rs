//! 依存サービスの専用チェック
//!
//! HTTPではなく専用プロトコルで疎通確認するサービス（ストア / キャッシュ）のチェック。
//! 失敗は `None` ではなく `CheckOutcome::Failed` として明示的に返す。

use crate::common::error::{DeckError, DeckResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::{Connection, PgConnection};
use tracing::debug;

/// 専用チェックの結果
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// 成功（付加情報付き）
    Passed(Value),
    /// 失敗（理由付き）
    Failed(String),
}

impl CheckOutcome {
    /// 成功したか
    pub fn is_passed(&self) -> bool {
        matches!(self, CheckOutcome::Passed(_))
    }
}

impl From<DeckResult<Value>> for CheckOutcome {
    fn from(result: DeckResult<Value>) -> Self {
        match result {
            Ok(details) => CheckOutcome::Passed(details),
            Err(e) => CheckOutcome::Failed(e.to_string()),
        }
    }
}

/// 専用チェックの抽象
///
/// タイムアウトは呼び出し側（`ProbeExecutor`）が付与する。
/// 実装は全ての終了経路で接続を解放すること。
#[async_trait]
pub trait DependencyCheck: Send + Sync {
    /// 指定URLに対して疎通確認を行う
    async fn check(&self, url: &str) -> CheckOutcome;
}

/// PostgreSQLストアの疎通確認（接続 → `SELECT 1` → 切断）
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresCheck;

impl PostgresCheck {
    async fn run(url: &str) -> DeckResult<Value> {
        let mut conn = PgConnection::connect(url)
            .await
            .map_err(|e| DeckError::Store(format!("connection failed: {}", e)))?;

        let result: Result<i32, sqlx::Error> = sqlx::query_scalar("SELECT 1")
            .fetch_one(&mut conn)
            .await;

        if let Err(e) = conn.close().await {
            debug!(error = %e, "Failed to close store connection cleanly");
        }

        let value = result.map_err(|e| DeckError::Store(format!("query failed: {}", e)))?;
        Ok(json!({ "connected": true, "result": value }))
    }
}

#[async_trait]
impl DependencyCheck for PostgresCheck {
    async fn check(&self, url: &str) -> CheckOutcome {
        Self::run(url).await.into()
    }
}

/// Redisキャッシュの疎通確認（一時接続 → `PING`）
///
/// 接続はスコープを抜けた時点で必ず破棄される。
#[derive(Debug, Clone, Copy, Default)]
pub struct RedisCheck;

impl RedisCheck {
    async fn run(url: &str) -> DeckResult<Value> {
        let client = redis::Client::open(url)
            .map_err(|e| DeckError::Cache(format!("invalid URL: {}", e)))?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| DeckError::Cache(format!("connection failed: {}", e)))?;

        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| DeckError::Cache(format!("ping failed: {}", e)))?;

        drop(conn);
        Ok(json!({ "connected": true, "ping": pong }))
    }
}

#[async_trait]
impl DependencyCheck for RedisCheck {
    async fn check(&self, url: &str) -> CheckOutcome {
        Self::run(url).await.into()
    }
}
