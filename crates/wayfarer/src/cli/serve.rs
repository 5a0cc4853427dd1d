//! Serve command handler.

use std::sync::Arc;
use wayfarer_server::AppConfig;

/// Handle the `serve` command.
#[tracing::instrument(skip_all)]
pub async fn handle_serve_command(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    config.override_listener(host, port);
    let planner = Arc::new(config.planner()?);

    wayfarer_server::serve(planner, &config.bind_address()).await?;

    tracing::info!("Server stopped");
    Ok(())
}
