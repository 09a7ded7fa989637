//! agentdeck Server Entry Point

use agentdeck::cli::{Cli, Commands};
use agentdeck::config::AppConfig;
use agentdeck::{logging, server, AppState};
use clap::Parser;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Status(args)) => {
            if let Err(e) = agentdeck::cli::status::execute(&args).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Agents(args)) => {
            if let Err(e) = agentdeck::cli::agents::execute(&args).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Serve(args)) => {
            let mut config = AppConfig::from_env();
            config.host = args.host;
            config.port = args.port;
            run_server(config).await;
        }
        None => {
            // No subcommand - default to serve
            run_server(AppConfig::from_env()).await;
        }
    }
}

async fn run_server(config: AppConfig) {
    let _guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        environment = %config.environment,
        bind_addr = %config.bind_addr(),
        agent_api_url = %config.agent_api_url,
        "Starting agentdeck v{}",
        env!("CARGO_PKG_VERSION")
    );

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to initialize application state");
            std::process::exit(1);
        }
    };

    if let Err(e) = server::run(state, &config.bind_addr()).await {
        error!(error = %e, "Server terminated with error");
        std::process::exit(1);
    }
}
