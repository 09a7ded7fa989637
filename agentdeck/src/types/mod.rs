//! 型定義

pub mod agent;
pub mod health;

pub use agent::{Agent, AgentAction, AgentActionResult, AgentStatus};
pub use health::{
    DetailedHealth, EnvironmentInfo, HealthStatus, MemoryInfo, ServiceHealth, SystemHealth,
    SystemInfo,
};
