//! エージェント型定義
//!
//! エージェント管理REST APIの契約型。契約自体は外部のエージェントAPIが所有するため、
//! 未知のフィールドや状態値は寛容に受け入れる。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// エージェントの稼働状態
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// 稼働中
    Running,
    /// 停止中
    Stopped,
    /// 起動処理中
    Starting,
    /// 停止処理中
    Stopping,
    /// エラー
    Error,
    /// 不明（APIが未知の値を返した場合を含む）
    #[default]
    #[serde(other)]
    Unknown,
}

impl AgentStatus {
    /// 文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Running => "running",
            AgentStatus::Stopped => "stopped",
            AgentStatus::Starting => "starting",
            AgentStatus::Stopping => "stopping",
            AgentStatus::Error => "error",
            AgentStatus::Unknown => "unknown",
        }
    }
}

/// エージェント
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// 一意識別子
    pub id: String,
    /// 表示名
    pub name: String,
    /// 種別（browser / ai / mcp など）
    #[serde(rename = "type", default)]
    pub agent_type: String,
    /// 稼働状態
    #[serde(default)]
    pub status: AgentStatus,
    /// 説明
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 最終アクティビティ時刻
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
}

/// エージェント操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentAction {
    /// 起動
    Start,
    /// 停止
    Stop,
    /// 再起動
    Restart,
    /// 削除
    Delete,
}

impl AgentAction {
    /// 文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentAction::Start => "start",
            AgentAction::Stop => "stop",
            AgentAction::Restart => "restart",
            AgentAction::Delete => "delete",
        }
    }

    /// 取り消し不能な操作か
    pub fn is_destructive(&self) -> bool {
        matches!(self, AgentAction::Delete)
    }
}

/// エージェント操作の結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentActionResult {
    /// 成功したか
    pub success: bool,
    /// 補足メッセージ
    #[serde(default, alias = "error", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
