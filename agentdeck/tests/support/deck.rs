//! テスト用の AppState 組み立て

use agentdeck::api::models::ModelsUpstream;
use agentdeck::health::{CheckOutcome, DependencyCheck, HealthAggregator, ProbeExecutor};
use agentdeck::registry::ServiceRegistry;
use agentdeck::types::health::EnvironmentInfo;
use agentdeck::AppState;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// 固定結果を返す専用チェック
#[allow(dead_code)]
pub struct StubCheck(pub CheckOutcome);

#[async_trait]
impl DependencyCheck for StubCheck {
    async fn check(&self, _url: &str) -> CheckOutcome {
        self.0.clone()
    }
}

/// テスト用の環境情報
#[allow(dead_code)]
pub fn test_environment() -> EnvironmentInfo {
    EnvironmentInfo {
        environment: "test".to_string(),
        port: 0,
        database_configured: false,
        redis_configured: false,
        models_upstream_configured: false,
        upstream_api_key_present: false,
    }
}

/// ストア / キャッシュを成功スタブにしたアグリゲーター
#[allow(dead_code)]
pub fn aggregator(registry: ServiceRegistry, timeout: Duration) -> HealthAggregator {
    let executor = ProbeExecutor::new(timeout).unwrap().with_checks(
        Arc::new(StubCheck(CheckOutcome::Passed(
            serde_json::json!({"connected": true}),
        ))),
        Arc::new(StubCheck(CheckOutcome::Passed(
            serde_json::json!({"connected": true, "ping": "PONG"}),
        ))),
    );
    HealthAggregator::new(registry, executor, test_environment())
}

/// AppState を組み立てる
#[allow(dead_code)]
pub fn app_state(registry: ServiceRegistry, models_upstream: Option<ModelsUpstream>) -> AppState {
    AppState {
        aggregator: Arc::new(aggregator(registry, Duration::from_secs(2))),
        models_upstream,
    }
}
