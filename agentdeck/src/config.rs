//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to legacy variable names with warning logs, and assembles the explicit
//! configuration structs handed to the registry and the server at startup.

use std::time::Duration;

/// ストアプローブのサービス名
pub const STORE_SERVICE: &str = "database";

/// キャッシュプローブのサービス名
pub const CACHE_SERVICE: &str = "redis";

/// RedisURLのデフォルト
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// プローブタイムアウトのデフォルト（ミリ秒）
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5000;

/// Get an environment variable with fallback to a legacy name
///
/// If the new variable name is set, returns its value.
/// If only the old (legacy) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use agentdeck::config::get_env_with_fallback;
///
/// let url = get_env_with_fallback("AGENTDECK_REDIS_URL", "REDIS_URL");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// 空文字列を「未設定」として扱う
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `name=url,name2=url2` 形式の追加サービス定義を解釈する
///
/// `name=` のようにURLが空のものは「プローブ対象外」として登録する。
/// `=` を含まない要素や名前が空の要素は無視する。
/// ストア / キャッシュ用の予約名（`database` / `redis`）は専用設定でのみ指定できるため無視する。
pub fn parse_service_list(raw: &str) -> Vec<(String, Option<String>)> {
    raw.split(',')
        .filter_map(|entry| {
            let (name, url) = entry.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                tracing::warn!(entry = %entry, "Ignoring service entry without a name");
                return None;
            }
            if name == STORE_SERVICE || name == CACHE_SERVICE {
                tracing::warn!(
                    service = name,
                    "Ignoring extra service with a reserved name; use the dedicated URL setting"
                );
                return None;
            }
            Some((name.to_string(), non_empty(Some(url.to_string()))))
        })
        .collect()
}

/// ヘルスアグリゲーター設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthConfig {
    /// データベース接続文字列（未設定ならストアプローブを行わない）
    pub database_url: Option<String>,
    /// RedisURL
    pub redis_url: String,
    /// RedisURLが明示的に設定されたか
    pub redis_url_explicit: bool,
    /// HTTPプローブ対象（名前, ヘルスURL）。URLが `None` のものはプローブしない
    pub http_services: Vec<(String, Option<String>)>,
    /// プローブ1件あたりのタイムアウト
    pub probe_timeout: Duration,
    /// プローブ結果のメモ化期間（ゼロなら無効）
    pub cache_ttl: Duration,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            redis_url: DEFAULT_REDIS_URL.to_string(),
            redis_url_explicit: false,
            http_services: Vec::new(),
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            cache_ttl: Duration::ZERO,
        }
    }
}

impl HealthConfig {
    /// Load health configuration from environment variables.
    pub fn from_env() -> Self {
        let database_url = non_empty(get_env_with_fallback(
            "AGENTDECK_DATABASE_URL",
            "DATABASE_URL",
        ));
        let redis_url = non_empty(get_env_with_fallback("AGENTDECK_REDIS_URL", "REDIS_URL"));

        let mut http_services = vec![
            (
                "agent-api".to_string(),
                service_url_from_env(
                    "AGENTDECK_AGENT_API_HEALTH_URL",
                    "AGENT_API_HEALTH_URL",
                    "http://localhost:8000/health",
                ),
            ),
            (
                "browser-worker".to_string(),
                service_url_from_env(
                    "AGENTDECK_BROWSER_WORKER_URL",
                    "BROWSER_WORKER_URL",
                    "http://localhost:3001/health",
                ),
            ),
            (
                "mcp-server".to_string(),
                service_url_from_env(
                    "AGENTDECK_MCP_SERVER_URL",
                    "MCP_SERVER_URL",
                    "http://localhost:3002/health",
                ),
            ),
        ];

        if let Some(extra) = get_env_with_fallback("AGENTDECK_EXTRA_SERVICES", "EXTRA_SERVICES") {
            http_services.extend(parse_service_list(&extra));
        }

        let probe_timeout_ms = get_env_with_fallback_parse(
            "AGENTDECK_PROBE_TIMEOUT_MS",
            "PROBE_TIMEOUT_MS",
            DEFAULT_PROBE_TIMEOUT_MS,
        );
        let cache_ttl_ms = get_env_with_fallback_parse(
            "AGENTDECK_HEALTH_CACHE_TTL_MS",
            "HEALTH_CACHE_TTL_MS",
            0u64,
        );

        Self {
            database_url,
            redis_url_explicit: redis_url.is_some(),
            redis_url: redis_url.unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            http_services,
            probe_timeout: Duration::from_millis(probe_timeout_ms),
            cache_ttl: Duration::from_millis(cache_ttl_ms),
        }
    }
}

/// HTTPサービスのURLを取得する
///
/// 変数が未定義ならデフォルト、空文字列なら「プローブ対象外」。
fn service_url_from_env(new_name: &str, old_name: &str, default: &str) -> Option<String> {
    match get_env_with_fallback(new_name, old_name) {
        Some(value) => non_empty(Some(value)),
        None => Some(default.to_string()),
    }
}

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// バインドアドレス
    pub host: String,
    /// 待ち受けポート
    pub port: u16,
    /// 環境名
    pub environment: String,
    /// モデル一覧の上流サービスURL
    pub models_upstream_url: Option<String>,
    /// 上流サービスのAPIキー
    pub upstream_api_key: Option<String>,
    /// エージェント管理APIのベースURL
    pub agent_api_url: String,
    /// ヘルス設定
    pub health: HealthConfig,
}

impl AppConfig {
    /// Load application configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: get_env_with_fallback_or("AGENTDECK_HOST", "HOST", "0.0.0.0"),
            port: get_env_with_fallback_parse("AGENTDECK_PORT", "PORT", 3100),
            environment: get_env_with_fallback_or("AGENTDECK_ENV", "NODE_ENV", "development"),
            models_upstream_url: non_empty(get_env_with_fallback(
                "AGENTDECK_MODELS_UPSTREAM_URL",
                "MODELS_UPSTREAM_URL",
            )),
            upstream_api_key: non_empty(get_env_with_fallback(
                "AGENTDECK_UPSTREAM_API_KEY",
                "UPSTREAM_API_KEY",
            )),
            agent_api_url: get_agent_api_url(),
            health: HealthConfig::from_env(),
        }
    }

    /// バインドアドレス文字列
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// エージェント管理APIのベースURLを取得
///
/// 環境変数 `AGENTDECK_AGENT_API_URL`（旧: `AGENT_API_URL`）から取得し、
/// 未設定の場合は `http://localhost:8000` を返す。
pub fn get_agent_api_url() -> String {
    get_env_with_fallback_or(
        "AGENTDECK_AGENT_API_URL",
        "AGENT_API_URL",
        "http://localhost:8000",
    )
}
