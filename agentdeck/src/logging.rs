//! ロギング初期化
//!
//! stdout への fmt 出力に加え、`AGENTDECK_LOG_DIR` が設定されていれば
//! 日次ローテーションのファイル出力を有効にする。

use crate::config::{get_env_with_fallback, get_env_with_fallback_or};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログファイル名のプレフィックス
pub const LOG_FILE_PREFIX: &str = "agentdeck.log";

/// ログレベルのデフォルト
const DEFAULT_LOG_LEVEL: &str = "info";

/// ログ出力先ディレクトリ（未設定ならファイル出力なし）
pub fn log_dir() -> Option<PathBuf> {
    get_env_with_fallback("AGENTDECK_LOG_DIR", "LOG_DIR").map(PathBuf::from)
}

/// フィルター文字列を解決する（`RUST_LOG` が最優先）
fn filter_directive() -> String {
    std::env::var("RUST_LOG")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| {
            get_env_with_fallback_or("AGENTDECK_LOG_LEVEL", "LOG_LEVEL", DEFAULT_LOG_LEVEL)
        })
}

/// ファイル出力用のライターを作成する
fn file_writer(dir: &Path) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    Ok(tracing_appender::non_blocking(appender))
}

/// ロギングを初期化する
///
/// 戻り値のガードはプロセス終了まで保持すること（drop するとファイル出力が止まる）。
pub fn init() -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(filter_directive())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let stdout_layer = fmt::layer().with_target(true);

    let dir = log_dir();
    let (file_layer, guard) = match &dir {
        Some(dir) => {
            let (writer, guard) = file_writer(dir)?;
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    if let Some(dir) = dir {
        tracing::info!(log_dir = %dir.display(), "File logging enabled");
    }

    Ok(guard)
}
