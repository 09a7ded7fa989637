//! agentdeck server
//!
//! エージェント基盤の依存サービスを並列にプローブし、
//! 全体ヘルスとエージェント管理APIへのアクセスを提供する。

#![warn(missing_docs)]

/// 共通エラー型
pub mod common;

/// 型定義
pub mod types;

/// 設定（環境変数）
pub mod config;

/// サービスレジストリ
pub mod registry;

/// ヘルスチェック集約
pub mod health;

/// エージェント管理クライアント
pub mod agents;

/// REST APIハンドラー
pub mod api;

/// ロギング初期化
pub mod logging;

/// axumサーバー
pub mod server;

/// CLIインターフェース
pub mod cli;

use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// ヘルスアグリゲーター
    pub aggregator: Arc<health::HealthAggregator>,
    /// モデル一覧の上流（未設定なら `/api/models` は 503）
    pub models_upstream: Option<api::models::ModelsUpstream>,
}

impl AppState {
    /// アプリケーション設定から構築
    pub fn from_config(config: &config::AppConfig) -> common::error::DeckResult<Self> {
        let aggregator = health::HealthAggregator::from_config(config)?;
        let models_upstream = match &config.models_upstream_url {
            Some(url) => Some(api::models::ModelsUpstream::new(
                url.clone(),
                config.upstream_api_key.clone(),
            )?),
            None => None,
        };

        Ok(Self {
            aggregator: Arc::new(aggregator),
            models_upstream,
        })
    }
}
