//! プローブ実行
//!
//! 単一サービスのヘルスチェックを行い `ServiceHealth` を生成する。
//! ストア / キャッシュは専用チェック、それ以外はHTTP GETで確認する。
//! 失敗はエラーではなく結果データとして返し、プローブ境界の外へ伝播させない。

use super::checks::{CheckOutcome, DependencyCheck, PostgresCheck, RedisCheck};
use crate::common::error::{DeckError, DeckResult};
use crate::config::{CACHE_SERVICE, STORE_SERVICE};
use crate::types::health::{HealthStatus, ServiceHealth};
use chrono::Utc;
use reqwest::{header::USER_AGENT, Client, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// ヘルスチェック時に送るUser-Agent
pub fn health_check_user_agent() -> String {
    format!("agentdeck-health-check/{}", env!("CARGO_PKG_VERSION"))
}

/// プローブ実行器
#[derive(Clone)]
pub struct ProbeExecutor {
    /// HTTPクライアント（タイムアウト設定済み）
    client: Client,
    /// プローブ1件あたりのタイムアウト
    timeout: Duration,
    /// ストア用チェック
    store_check: Arc<dyn DependencyCheck>,
    /// キャッシュ用チェック
    cache_check: Arc<dyn DependencyCheck>,
}

impl ProbeExecutor {
    /// 新しいプローブ実行器を作成
    pub fn new(timeout: Duration) -> DeckResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeckError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout,
            store_check: Arc::new(PostgresCheck),
            cache_check: Arc::new(RedisCheck),
        })
    }

    /// 専用チェックを差し替える
    pub fn with_checks(
        mut self,
        store_check: Arc<dyn DependencyCheck>,
        cache_check: Arc<dyn DependencyCheck>,
    ) -> Self {
        self.store_check = store_check;
        self.cache_check = cache_check;
        self
    }

    /// プローブのタイムアウト
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 単一サービスをプローブ
    pub async fn probe(&self, name: &str, url: &str) -> ServiceHealth {
        match name {
            STORE_SERVICE => self.probe_dependency(name, url, self.store_check.as_ref()).await,
            CACHE_SERVICE => self.probe_dependency(name, url, self.cache_check.as_ref()).await,
            _ => self.probe_http(name, url).await,
        }
    }

    /// 専用チェックによるプローブ
    ///
    /// 成功 → healthy、失敗（タイムアウト含む） → degraded。
    async fn probe_dependency(
        &self,
        name: &str,
        url: &str,
        check: &dyn DependencyCheck,
    ) -> ServiceHealth {
        let start = Instant::now();
        let outcome = match tokio::time::timeout(self.timeout, check.check(url)).await {
            Ok(outcome) => outcome,
            Err(_) => CheckOutcome::Failed(format!(
                "Check timed out after {}ms",
                self.timeout.as_millis()
            )),
        };
        let elapsed = start.elapsed();

        match outcome {
            CheckOutcome::Passed(details) => {
                debug!(
                    service = name,
                    response_time_ms = elapsed.as_millis() as u64,
                    "Dependency check succeeded"
                );
                service_health(name, HealthStatus::Healthy, elapsed, None, Some(details))
            }
            CheckOutcome::Failed(reason) => {
                warn!(service = name, error = %reason, "Dependency check failed");
                service_health(name, HealthStatus::Degraded, elapsed, Some(reason), None)
            }
        }
    }

    /// HTTP GETによるプローブ
    ///
    /// 200 → healthy、それ以外の応答 → degraded、送信エラー → unhealthy。
    async fn probe_http(&self, name: &str, url: &str) -> ServiceHealth {
        let start = Instant::now();
        let result = self
            .client
            .get(url)
            .header(USER_AGENT, health_check_user_agent())
            .send()
            .await;

        match result {
            Ok(response) => {
                let status_code = response.status();
                let data = read_body(response).await;
                let elapsed = start.elapsed();
                let details = json!({
                    "statusCode": status_code.as_u16(),
                    "data": data,
                });

                if status_code == StatusCode::OK {
                    debug!(
                        service = name,
                        response_time_ms = elapsed.as_millis() as u64,
                        "Health check succeeded"
                    );
                    service_health(name, HealthStatus::Healthy, elapsed, None, Some(details))
                } else {
                    let error = format!("HTTP {}", status_code.as_u16());
                    warn!(service = name, error = %error, "Health check returned non-OK status");
                    service_health(
                        name,
                        HealthStatus::Degraded,
                        elapsed,
                        Some(error),
                        Some(details),
                    )
                }
            }
            Err(e) => {
                let elapsed = start.elapsed();
                let error = if e.is_timeout() {
                    format!("Request timed out after {}ms", self.timeout.as_millis())
                } else {
                    e.to_string()
                };
                warn!(service = name, error = %error, "Health check failed");
                service_health(name, HealthStatus::Unhealthy, elapsed, Some(error), None)
            }
        }
    }
}

/// 応答ボディを読み取る（JSONとして解釈できなければ文字列のまま）
async fn read_body(response: reqwest::Response) -> Value {
    match response.text().await {
        Ok(text) if text.is_empty() => Value::Null,
        Ok(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
        Err(e) => {
            debug!(error = %e, "Failed to read health check response body");
            Value::Null
        }
    }
}

fn service_health(
    name: &str,
    status: HealthStatus,
    elapsed: Duration,
    error: Option<String>,
    details: Option<Value>,
) -> ServiceHealth {
    ServiceHealth {
        name: name.to_string(),
        status,
        response_time: elapsed.as_millis() as u64,
        last_checked: Utc::now(),
        error,
        details,
    }
}
