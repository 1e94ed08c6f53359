//! Reelsmith CLI entry point.

use anyhow::Result;
use clap::Parser;
use reelsmith::cli::{commands, Cli, Commands};
use reelsmith::config::Settings;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets may live in a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_ref().map(PathBuf::from);
    let settings = Settings::load_from(config_path.as_ref())?;

    // Initialize logging
    let log_level = cli.log_level(&settings.general.log_level);

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("reelsmith={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        None => {
            commands::run_pipeline(None, None, false, settings).await?;
        }

        Some(Commands::Run {
            topics,
            output,
            keep_going,
        }) => {
            commands::run_pipeline(topics, output, keep_going, settings).await?;
        }

        Some(Commands::Slug { topic }) => {
            commands::run_slug(&topic)?;
        }

        Some(Commands::Doctor) => {
            commands::run_doctor(&settings, config_path.as_ref())?;
        }

        Some(Commands::Config { action }) => {
            commands::run_config(&action, settings, config_path)?;
        }
    }

    Ok(())
}
