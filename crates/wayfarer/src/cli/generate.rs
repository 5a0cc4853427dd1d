//! One-shot generation command handler.

use anyhow::Context;
use std::path::Path;
use wayfarer_core::PlannerInput;
use wayfarer_server::AppConfig;

/// Handle the `generate` command.
///
/// Reads a planner input from `input`, runs one generation, and prints the
/// result as pretty JSON on stdout.
#[tracing::instrument(skip(config), fields(input = %input.display()))]
pub async fn handle_generate_command(config: AppConfig, input: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file {}", input.display()))?;
    let input: PlannerInput =
        serde_json::from_str(&raw).context("Input is not a valid planner request")?;

    let planner = config.planner()?;
    let result = planner.generate(input).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
