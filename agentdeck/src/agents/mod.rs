//! エージェント管理クライアント
//!
//! エージェント管理REST APIに対して一覧取得・起動・停止・再起動・削除を行う。

use crate::common::error::{CommonError, DeckError, DeckResult};
use crate::types::agent::{Agent, AgentAction, AgentActionResult};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// リクエストタイムアウト（秒）
const AGENT_API_TIMEOUT_SECS: u64 = 30;

/// 一覧APIのレスポンス（配列 or `{agents: [...]}`）
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AgentListResponse {
    Bare(Vec<Agent>),
    Wrapped { agents: Vec<Agent> },
}

impl From<AgentListResponse> for Vec<Agent> {
    fn from(response: AgentListResponse) -> Self {
        match response {
            AgentListResponse::Bare(agents) => agents,
            AgentListResponse::Wrapped { agents } => agents,
        }
    }
}

/// エージェント管理クライアント
#[derive(Clone)]
pub struct AgentClient {
    http_client: Client,
    base_url: String,
}

impl AgentClient {
    /// 新しいクライアントを作成
    ///
    /// # Arguments
    /// * `base_url` - エージェント管理APIのベースURL（例: "http://localhost:8000"）
    pub fn new(base_url: impl Into<String>) -> DeckResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(AGENT_API_TIMEOUT_SECS))
            .build()
            .map_err(|e| DeckError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(base_url, http_client))
    }

    /// 既存のHTTPクライアントを使って作成
    pub fn with_client(base_url: impl Into<String>, http_client: Client) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// ベースURL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `<base>/api/agents/<segments...>` を組み立てる
    ///
    /// 各セグメントはパーセントエンコードされるため、`/` `#` `?` を含むIDでも
    /// 別のパスに解釈されることはない。
    fn agents_url(&self, segments: &[&str]) -> DeckResult<Url> {
        let invalid_base = || {
            DeckError::from(CommonError::Config(format!(
                "Invalid agent API URL: {}",
                self.base_url
            )))
        };

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid_base())?;
        url.path_segments_mut()
            .map_err(|_| invalid_base())?
            .pop_if_empty()
            .extend(["api", "agents"])
            .extend(segments);
        Ok(url)
    }

    /// エージェント一覧を取得
    pub async fn list(&self) -> DeckResult<Vec<Agent>> {
        let url = self.agents_url(&[])?;
        debug!("Fetching agents from {}", url);

        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DeckError::Upstream(format!(
                "Failed to list agents: HTTP {}",
                status
            )));
        }

        let body: AgentListResponse = response
            .json()
            .await
            .map_err(|e| DeckError::Upstream(format!("Invalid agent list response: {}", e)))?;

        Ok(body.into())
    }

    /// エージェントを起動
    pub async fn start(&self, id: &str) -> DeckResult<AgentActionResult> {
        self.perform(AgentAction::Start, id).await
    }

    /// エージェントを停止
    pub async fn stop(&self, id: &str) -> DeckResult<AgentActionResult> {
        self.perform(AgentAction::Stop, id).await
    }

    /// エージェントを再起動
    pub async fn restart(&self, id: &str) -> DeckResult<AgentActionResult> {
        self.perform(AgentAction::Restart, id).await
    }

    /// エージェントを削除
    pub async fn delete(&self, id: &str) -> DeckResult<AgentActionResult> {
        self.perform(AgentAction::Delete, id).await
    }

    /// 操作を実行
    ///
    /// 2xx 以外は `Err`。2xx で `success: false` の場合はデータとして返す。
    /// 2xx でボディが空の場合（204 など）は成功とみなす。
    pub async fn perform(&self, action: AgentAction, id: &str) -> DeckResult<AgentActionResult> {
        let id = validate_agent_id(id)?;

        let (method, url) = match action {
            AgentAction::Delete => (Method::DELETE, self.agents_url(&[id])?),
            _ => (Method::POST, self.agents_url(&[id, action.as_str()])?),
        };

        let response = self.http_client.request(method, url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(DeckError::NotFound(format!("agent {}", id)));
        }
        if !status.is_success() {
            warn!(agent_id = id, action = action.as_str(), status = %status, "Agent action rejected");
            return Err(DeckError::Upstream(format!(
                "Agent {} failed: HTTP {}",
                action.as_str(),
                status
            )));
        }

        let text = response.text().await?;
        let result = if text.trim().is_empty() {
            AgentActionResult {
                success: true,
                message: None,
            }
        } else {
            serde_json::from_str::<AgentActionResult>(&text).map_err(|e| {
                DeckError::Upstream(format!("Invalid agent action response: {}", e))
            })?
        };

        info!(
            agent_id = id,
            action = action.as_str(),
            success = result.success,
            "Agent action completed"
        );

        Ok(result)
    }
}

/// エージェントIDを検証する
///
/// 空文字列と、パス上で親・自身を指す `.` / `..` は受け付けない。
fn validate_agent_id(id: &str) -> DeckResult<&str> {
    let id = id.trim();
    match id {
        "" => Err(CommonError::Validation("agent id must not be empty".to_string()).into()),
        "." | ".." => Err(CommonError::Validation(format!("invalid agent id: {}", id)).into()),
        _ => Ok(id),
    }
}
