//! Foilcard CLI - inspect effects, presets, clamping and card geometry.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "foilcard")]
#[command(author, version, about = "Foilcard effect engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available effects and their parameters
    Effects(commands::effects::EffectsArgs),

    /// List, show and manage presets
    Presets(commands::presets::PresetsArgs),

    /// Show how a value is soft-clamped
    Clamp(commands::clamp::ClampArgs),

    /// Show face and edge visibility for a rotation
    Geometry(commands::geometry::GeometryArgs),

    /// Apply a preset (plus edits) and print the resulting state
    Apply(commands::apply::ApplyArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --json output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Effects(args) => commands::effects::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Clamp(args) => commands::clamp::run(args),
        Commands::Geometry(args) => commands::geometry::run(args),
        Commands::Apply(args) => commands::apply::run(args),
    }
}
