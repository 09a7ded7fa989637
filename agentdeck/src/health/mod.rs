//! ヘルスチェック集約
//!
//! 依存サービス（ストア / キャッシュ / エージェント系HTTPサービス）をプローブし、
//! 全体状態を最悪値で導出する。
//!
//! - `probe`: 単一サービスのプローブ（HTTP GET / 専用チェック）
//! - `checks`: ストア・キャッシュ用の専用チェック
//! - `aggregator`: 並列実行と全体状態の導出
//! - `system`: 詳細ヘルス用のランタイム情報

pub mod aggregator;
pub mod checks;
pub mod probe;
pub mod system;

pub use aggregator::HealthAggregator;
pub use checks::{CheckOutcome, DependencyCheck, PostgresCheck, RedisCheck};
pub use probe::ProbeExecutor;
