//! プロセス・ランタイム情報の収集
//!
//! 詳細ヘルス用。設定については値を含めず「設定されているか」のみを返す。

use crate::config::AppConfig;
use crate::types::health::{EnvironmentInfo, MemoryInfo, SystemInfo};
use sysinfo::{ProcessesToUpdate, System};

/// 現在のプロセス・ホスト情報を収集する
pub fn collect_system_info() -> SystemInfo {
    let mut system = System::new();
    system.refresh_memory();

    let process_rss = match sysinfo::get_current_pid() {
        Ok(pid) => {
            system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
            system.process(pid).map(|p| p.memory()).unwrap_or(0)
        }
        Err(e) => {
            tracing::debug!(error = e, "Failed to resolve current pid");
            0
        }
    };

    SystemInfo {
        platform: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        pid: std::process::id(),
        cpu_count: std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1),
        hostname: System::host_name(),
        system_uptime_secs: System::uptime(),
        memory: MemoryInfo {
            process_rss,
            total: system.total_memory(),
            used: system.used_memory(),
        },
    }
}

/// 設定の有無を抽出する
pub fn environment_info(config: &AppConfig) -> EnvironmentInfo {
    EnvironmentInfo {
        environment: config.environment.clone(),
        port: config.port,
        database_configured: config.health.database_url.is_some(),
        redis_configured: config.health.redis_url_explicit,
        models_upstream_configured: config.models_upstream_url.is_some(),
        upstream_api_key_present: config.upstream_api_key.is_some(),
    }
}
