//! サービスレジストリ
//!
//! 論理サービス名からプローブ先URLへの静的マッピング。
//! 起動時に設定から明示的に構築し、以後は読み取り専用で共有する。

use crate::config::{HealthConfig, CACHE_SERVICE, STORE_SERVICE};
use serde::Serialize;
use tracing::{debug, info};

/// プローブ対象のサービス
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceEndpoint {
    /// 論理サービス名
    pub name: String,
    /// プローブ先URL（`None` はプローブ対象外）
    pub url: Option<String>,
}

impl ServiceEndpoint {
    /// 新しいエンドポイントを作成
    pub fn new(name: impl Into<String>, url: Option<String>) -> Self {
        Self {
            name: name.into(),
            url,
        }
    }

    /// プローブ対象か
    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }
}

/// サービスレジストリ
///
/// 登録順を保持する。URLの妥当性検証は行わず、不正なURLはプローブ失敗として現れる。
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    entries: Vec<ServiceEndpoint>,
}

impl ServiceRegistry {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ヘルス設定からレジストリを構築
    ///
    /// 登録順: ストア、キャッシュ、HTTPサービス（設定順）。
    pub fn from_config(config: &HealthConfig) -> Self {
        let mut registry = Self::new();

        registry.register(STORE_SERVICE, config.database_url.clone());
        registry.register(CACHE_SERVICE, Some(config.redis_url.clone()));
        for (name, url) in &config.http_services {
            registry.register(name.clone(), url.clone());
        }

        info!(
            total = registry.len(),
            enabled = registry.probe_targets().count(),
            "Service registry initialized"
        );

        registry
    }

    /// サービスを登録
    ///
    /// 同名のサービスが既にある場合は位置を保ったままURLを置き換える。
    pub fn register(&mut self, name: impl Into<String>, url: Option<String>) {
        let name = name.into();
        if let Some(existing) = self.entries.iter_mut().find(|e| e.name == name) {
            debug!(service = %name, "Replacing registered service URL");
            existing.url = url;
            return;
        }
        self.entries.push(ServiceEndpoint::new(name, url));
    }

    /// 登録済みエンドポイント（登録順）
    pub fn entries(&self) -> &[ServiceEndpoint] {
        &self.entries
    }

    /// プローブ対象のエンドポイント（登録順）
    pub fn probe_targets(&self) -> impl Iterator<Item = &ServiceEndpoint> {
        self.entries.iter().filter(|e| e.is_enabled())
    }

    /// 名前で検索
    pub fn get(&self, name: &str) -> Option<&ServiceEndpoint> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// 登録数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 空か
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
