//! agents subcommand
//!
//! Lists and controls agents through the agent management API.

use crate::agents::AgentClient;
use crate::config::get_agent_api_url;
use crate::types::agent::{Agent, AgentAction, AgentActionResult};
use clap::{Args, Subcommand};
use std::fmt::Write as _;
use std::io::{BufRead, Write};

/// Arguments for the agents subcommand
#[derive(Args, Debug, Clone)]
pub struct AgentsArgs {
    /// Base URL of the agent management API
    /// (default: AGENTDECK_AGENT_API_URL or http://localhost:8000)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Agent operation
    #[command(subcommand)]
    pub command: AgentsCommand,
}

/// Agent operations
#[derive(Subcommand, Debug, Clone)]
pub enum AgentsCommand {
    /// List agents
    List,
    /// Start an agent
    Start {
        /// Agent ID
        id: String,
    },
    /// Stop an agent
    Stop {
        /// Agent ID
        id: String,
    },
    /// Restart an agent
    Restart {
        /// Agent ID
        id: String,
    },
    /// Delete an agent
    Delete {
        /// Agent ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long, default_value_t = false)]
        yes: bool,
    },
}

impl AgentsCommand {
    /// 対象の操作とIDを返す（List は `None`）
    pub fn action(&self) -> Option<(AgentAction, &str)> {
        match self {
            Self::List => None,
            Self::Start { id } => Some((AgentAction::Start, id.as_str())),
            Self::Stop { id } => Some((AgentAction::Stop, id.as_str())),
            Self::Restart { id } => Some((AgentAction::Restart, id.as_str())),
            Self::Delete { id, .. } => Some((AgentAction::Delete, id.as_str())),
        }
    }

    fn confirmed(&self) -> bool {
        matches!(self, Self::Delete { yes: true, .. })
    }
}

/// Execute the agents command
pub async fn execute(args: &AgentsArgs) -> Result<(), anyhow::Error> {
    let api_url = args.api_url.clone().unwrap_or_else(get_agent_api_url);
    let client = AgentClient::new(api_url)?;

    let Some((action, id)) = args.command.action() else {
        let agents = client.list().await?;
        if agents.is_empty() {
            println!("No agents registered");
        } else {
            print!("{}", render_agents(&agents));
        }
        return Ok(());
    };

    if action.is_destructive() && !args.command.confirmed() {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        let prompt = format!("Delete agent '{}'? This cannot be undone. [y/N]: ", id);
        if !confirm(&prompt, &mut stdin.lock(), &mut stdout)? {
            println!("Aborted");
            return Ok(());
        }
    }

    let result = client.perform(action, id).await?;
    println!("{}", describe_result(action, id, &result));
    if !result.success {
        anyhow::bail!("Agent {} was not accepted", action.as_str());
    }
    Ok(())
}

/// 確認プロンプトを表示し、`y` / `yes` のときのみ true
pub fn confirm<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<bool> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// エージェント一覧を表形式の文字列にする
pub fn render_agents(agents: &[Agent]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID\tNAME\tTYPE\tSTATUS\tLAST ACTIVITY");
    for agent in agents {
        let last_activity = agent
            .last_activity
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        let agent_type = if agent.agent_type.is_empty() {
            "-"
        } else {
            agent.agent_type.as_str()
        };
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            agent.id,
            agent.name,
            agent_type,
            agent.status.as_str(),
            last_activity
        );
    }
    out
}

fn describe_result(action: AgentAction, id: &str, result: &AgentActionResult) -> String {
    let outcome = if result.success { "succeeded" } else { "failed" };
    match &result.message {
        Some(message) => format!("{} {}: {} ({})", action.as_str(), id, outcome, message),
        None => format!("{} {}: {}", action.as_str(), id, outcome),
    }
}
