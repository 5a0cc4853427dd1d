//! Wayfarer command-line entry point.

mod cli;

use clap::Parser;
use cli::{Cli, Commands, handle_generate_command, handle_serve_command};
use tracing_subscriber::EnvFilter;
use wayfarer_server::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port } => handle_serve_command(config, host, port).await,
        Commands::Generate { input } => handle_generate_command(config, &input).await,
    }
}
