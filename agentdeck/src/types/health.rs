//! ヘルス型定義
//!
//! プローブ結果・システムヘルス・詳細ヘルスの型。
//! JSONのフィールド名はダッシュボードの既存契約に合わせてcamelCaseで出力する。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// サービスのヘルス状態
///
/// 重大度順に `Healthy < Degraded < Unhealthy` で順序付けされる。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// 正常
    Healthy,
    /// 応答はあるが期待通りではない
    Degraded,
    /// 到達不能
    Unhealthy,
}

impl HealthStatus {
    /// 文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Unhealthy => "unhealthy",
        }
    }

    /// 全サービスの状態から全体状態を導出する
    ///
    /// unhealthy が1つでもあれば unhealthy、次に degraded、それ以外は healthy。
    /// 空の場合は healthy。
    pub fn worst<'a, I>(statuses: I) -> HealthStatus
    where
        I: IntoIterator<Item = &'a HealthStatus>,
    {
        statuses
            .into_iter()
            .copied()
            .max()
            .unwrap_or(HealthStatus::Healthy)
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 単一サービスのプローブ結果
///
/// プローブごとに新規作成され、作成後は変更しない。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    /// サービス名
    pub name: String,
    /// 状態
    pub status: HealthStatus,
    /// 応答時間（ミリ秒）
    pub response_time: u64,
    /// チェック時刻
    pub last_checked: DateTime<Utc>,
    /// エラーメッセージ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 付加情報（サービスの応答をそのまま格納）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// システム全体のヘルス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    /// 全体状態
    pub status: HealthStatus,
    /// サービスごとの結果（レジストリ登録順）
    pub services: Vec<ServiceHealth>,
    /// プロセス稼働時間（ミリ秒）
    pub uptime: u64,
    /// スナップショット生成時刻
    pub timestamp: DateTime<Utc>,
    /// サーバーバージョン
    pub version: String,
}

/// プロセス・ランタイム情報
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    /// OS種別（linux / macos / windows など）
    pub platform: String,
    /// CPUアーキテクチャ
    pub arch: String,
    /// プロセスID
    pub pid: u32,
    /// 論理CPU数
    pub cpu_count: usize,
    /// ホスト名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// OSの稼働時間（秒）
    pub system_uptime_secs: u64,
    /// メモリ情報
    pub memory: MemoryInfo,
}

/// メモリ使用量（バイト）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemoryInfo {
    /// 本プロセスの常駐メモリ
    pub process_rss: u64,
    /// システム総メモリ
    pub total: u64,
    /// システム使用メモリ
    pub used: u64,
}

/// 設定の有無（値そのものは含めない）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentInfo {
    /// 環境名（development / production など）
    pub environment: String,
    /// 待ち受けポート
    pub port: u16,
    /// データベースURLが設定されているか
    pub database_configured: bool,
    /// RedisURLが明示設定されているか
    pub redis_configured: bool,
    /// モデル一覧の上流サービスが設定されているか
    pub models_upstream_configured: bool,
    /// 上流APIキーが設定されているか
    pub upstream_api_key_present: bool,
}

/// 詳細ヘルス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealth {
    /// システムヘルス
    #[serde(flatten)]
    pub health: SystemHealth,
    /// プロセス・ランタイム情報
    pub system: SystemInfo,
    /// 設定の有無
    pub environment: EnvironmentInfo,
}
