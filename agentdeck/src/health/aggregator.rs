//! ヘルスアグリゲーター
//!
//! レジストリの全プローブ対象を並列にプローブし、全体状態を導出する。
//! 1件の失敗が他のプローブを中断することはなく、リトライも行わない。

use super::probe::ProbeExecutor;
use super::system::{collect_system_info, environment_info};
use crate::common::error::DeckResult;
use crate::config::AppConfig;
use crate::registry::ServiceRegistry;
use crate::types::health::{
    DetailedHealth, EnvironmentInfo, HealthStatus, ServiceHealth, SystemHealth,
};
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// メモ化したプローブ結果
#[derive(Debug, Clone)]
struct CachedProbes {
    taken_at: Instant,
    services: Vec<ServiceHealth>,
}

/// ヘルスアグリゲーター
pub struct HealthAggregator {
    /// サービスレジストリ（読み取り専用）
    registry: Arc<ServiceRegistry>,
    /// プローブ実行器
    executor: ProbeExecutor,
    /// 起動時刻
    started_at: Instant,
    /// バージョン
    version: String,
    /// 設定の有無（詳細ヘルス用）
    environment: EnvironmentInfo,
    /// メモ化期間（ゼロなら無効）
    cache_ttl: Duration,
    /// 直近のプローブ結果
    cache: RwLock<Option<CachedProbes>>,
}

impl HealthAggregator {
    /// 新しいアグリゲーターを作成
    pub fn new(
        registry: ServiceRegistry,
        executor: ProbeExecutor,
        environment: EnvironmentInfo,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            executor,
            started_at: Instant::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment,
            cache_ttl: Duration::ZERO,
            cache: RwLock::new(None),
        }
    }

    /// アプリケーション設定から構築
    pub fn from_config(config: &AppConfig) -> DeckResult<Self> {
        let registry = ServiceRegistry::from_config(&config.health);
        let executor = ProbeExecutor::new(config.health.probe_timeout)?;

        Ok(Self::new(registry, executor, environment_info(config))
            .with_cache_ttl(config.health.cache_ttl))
    }

    /// メモ化期間を設定
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// サービスレジストリ
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// 起動からの経過時間
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// 全サービスをプローブ
    ///
    /// URL未設定のサービスは除外し、結果はレジストリ登録順で返す。
    pub async fn check_all_services(&self) -> Vec<ServiceHealth> {
        if !self.cache_ttl.is_zero() {
            if let Some(cached) = self.cache.read().await.as_ref() {
                if cached.taken_at.elapsed() < self.cache_ttl {
                    debug!("Serving memoized probe results");
                    return cached.services.clone();
                }
            }
        }

        let services = self.probe_all().await;

        if !self.cache_ttl.is_zero() {
            *self.cache.write().await = Some(CachedProbes {
                taken_at: Instant::now(),
                services: services.clone(),
            });
        }

        services
    }

    async fn probe_all(&self) -> Vec<ServiceHealth> {
        let started = Instant::now();

        // join_all は入力順で結果を返す（完了順ではない）
        let probes = self.registry.probe_targets().filter_map(|endpoint| {
            let url = endpoint.url.as_deref()?;
            Some(self.executor.probe(&endpoint.name, url))
        });
        let services = join_all(probes).await;

        debug!(
            services = services.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Aggregation cycle completed"
        );

        services
    }

    /// システムヘルスを取得
    pub async fn get_system_health(&self) -> SystemHealth {
        let services = self.check_all_services().await;
        let status = HealthStatus::worst(services.iter().map(|s| &s.status));

        SystemHealth {
            status,
            services,
            uptime: self.uptime().as_millis() as u64,
            timestamp: Utc::now(),
            version: self.version.clone(),
        }
    }

    /// 詳細ヘルスを取得
    pub async fn get_detailed_health(&self) -> DetailedHealth {
        let health = self.get_system_health().await;

        DetailedHealth {
            health,
            system: collect_system_info(),
            environment: self.environment.clone(),
        }
    }
}
