//! status subcommand
//!
//! Queries a running server's health endpoint and prints a per-service table.

use crate::types::health::{HealthStatus, SystemHealth};
use anyhow::Context;
use clap::Args;
use std::fmt::Write as _;
use std::time::Duration;

/// Arguments for the status subcommand
#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    /// Base URL of the running server
    #[arg(short, long, default_value = "http://127.0.0.1:3100")]
    pub url: String,

    /// Query /health/detailed instead of /health
    #[arg(short, long, default_value_t = false)]
    pub detailed: bool,
}

/// Execute the status command
///
/// 全体状態が unhealthy の場合は終了コード 1 とするため `Err` を返す。
pub async fn execute(args: &StatusArgs) -> Result<(), anyhow::Error> {
    let path = if args.detailed {
        "/health/detailed"
    } else {
        "/health"
    };
    let url = format!("{}{}", args.url.trim_end_matches('/'), path);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", url))?;

    // 503 でもボディは SystemHealth
    let body: serde_json::Value = response
        .json()
        .await
        .context("Invalid health response")?;
    let health: SystemHealth =
        serde_json::from_value(body.clone()).context("Invalid health response")?;

    print!("{}", render_table(&health));
    if args.detailed {
        if let Some(system) = body.get("system") {
            println!("\nSystem: {}", system);
        }
        if let Some(environment) = body.get("environment") {
            println!("Environment: {}", environment);
        }
    }

    if health.status == HealthStatus::Unhealthy {
        anyhow::bail!("System is unhealthy");
    }
    Ok(())
}

/// ヘルス結果を表形式の文字列にする
pub fn render_table(health: &SystemHealth) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "NAME\tSTATUS\tRESPONSE\tERROR");
    for service in &health.services {
        let _ = writeln!(
            out,
            "{}\t{}\t{}ms\t{}",
            service.name,
            service.status,
            service.response_time,
            service.error.as_deref().unwrap_or("-")
        );
    }
    let _ = writeln!(
        out,
        "\nOverall: {} (version {}, uptime {})",
        health.status,
        health.version,
        format_uptime(health.uptime)
    );
    out
}

/// ミリ秒の稼働時間を `1h 02m 03s` 形式にする
fn format_uptime(uptime_ms: u64) -> String {
    let secs = uptime_ms / 1000;
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}h {:02}m {:02}s", h, m, s)
    } else if m > 0 {
        format!("{}m {:02}s", m, s)
    } else {
        format!("{}s", s)
    }
}
