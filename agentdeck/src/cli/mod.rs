//! CLI module for agentdeck
//!
//! Provides the command-line interface for the health server and agent management.

pub mod agents;
pub mod serve;
pub mod status;

use clap::{Parser, Subcommand};

/// agentdeck - Health aggregation and agent management for the agent platform
#[derive(Parser, Debug)]
#[command(name = "agentdeck")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    AGENTDECK_HOST                  Bind address (default: 0.0.0.0)
    AGENTDECK_PORT                  Listen port (default: 3100)
    AGENTDECK_ENV                   Environment name (default: development)
    AGENTDECK_LOG_LEVEL             Log level (default: info)
    AGENTDECK_LOG_DIR               Directory for daily rolling log files
    AGENTDECK_DATABASE_URL          PostgreSQL URL (store probe is skipped if unset)
    AGENTDECK_REDIS_URL             Redis URL (default: redis://localhost:6379)
    AGENTDECK_AGENT_API_URL         Agent management API (default: http://localhost:8000)
    AGENTDECK_AGENT_API_HEALTH_URL  Agent API health URL (empty disables the probe)
    AGENTDECK_BROWSER_WORKER_URL    Browser worker health URL (empty disables the probe)
    AGENTDECK_MCP_SERVER_URL        MCP server health URL (empty disables the probe)
    AGENTDECK_EXTRA_SERVICES        Additional probes as name=url,name2=url2
    AGENTDECK_MODELS_UPSTREAM_URL   Upstream for GET /api/models
    AGENTDECK_UPSTREAM_API_KEY      Bearer key sent to the models upstream
    AGENTDECK_PROBE_TIMEOUT_MS      Per-probe timeout (default: 5000)
    AGENTDECK_HEALTH_CACHE_TTL_MS   Probe result memoization (default: 0, disabled)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the health server
    Serve(serve::ServeArgs),
    /// Show health of a running server
    Status(status::StatusArgs),
    /// Manage agents through the agent management API
    Agents(agents::AgentsArgs),
}
