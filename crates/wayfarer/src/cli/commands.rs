//! CLI argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wayfarer itinerary planner.
#[derive(Parser, Debug)]
#[command(name = "wayfarer")]
#[command(about = "Generate and edit travel itineraries with Gemini")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file (default: ./wayfarer.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Bind address, overriding configuration
        #[arg(long)]
        host: Option<String>,

        /// Listen port, overriding configuration
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate once from a JSON input file and print the result
    Generate {
        /// Planner input JSON: a trip request, optionally with modification fields
        #[arg(short, long)]
        input: PathBuf,
    },
}
