//! Svar CLI entry point.

use anyhow::Result;
use clap::Parser;
use svar::cli::{commands, Cli, Commands};
use svar::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("svar={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Ensure the data directory exists
    std::fs::create_dir_all(settings.data_dir())?;

    // Execute command
    match &cli.command {
        Commands::Init => {
            commands::run_init(&settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings).await?;
        }

        Commands::Seed { force } => {
            commands::run_seed(*force, settings).await?;
        }

        Commands::Latest { name, json } => {
            commands::run_latest(name, *json, settings).await?;
        }

        Commands::Policy { json } => {
            commands::run_policy(*json, settings).await?;
        }

        Commands::History { name, json } => {
            commands::run_history(name, *json, settings).await?;
        }

        Commands::Agent { task, model } => {
            commands::run_agent(task, model.clone(), settings).await?;
        }

        Commands::Playground { model } => {
            commands::run_playground(model.clone(), settings).await?;
        }

        Commands::Mcp => {
            commands::run_mcp(settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
