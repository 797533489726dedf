//! Preset management commands.
//!
//! Provides commands to list, show, validate and copy presets.

use clap::{Args, Subcommand};
use foilcard_config::{
    Preset, PresetCatalog, PresetValidator, ensure_user_presets_dir, settings_file,
    user_presets_dir,
};
use std::path::PathBuf;

use super::common::load_preset;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Only presets carrying this tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Show the values a preset sets
    Show {
        /// Preset id or path
        name: String,
    },

    /// Check preset files against the effect registry
    Validate {
        /// Preset files to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Copy a preset to the user presets directory for customization
    Copy {
        /// Source preset id
        source: String,

        /// New preset id (defaults to the source id)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show preset and settings locations
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { tag } => list(tag.as_deref()),
        PresetsCommand::Show { name } => show(&name),
        PresetsCommand::Validate { paths } => validate(&paths),
        PresetsCommand::Copy { source, name } => copy(&source, name),
        PresetsCommand::Paths => {
            println!("User presets: {}", user_presets_dir().display());
            println!("Settings:     {}", settings_file().display());
            Ok(())
        }
    }
}

fn list(tag: Option<&str>) -> anyhow::Result<()> {
    let catalog = PresetCatalog::load_default();

    println!("Presets");
    println!("=======");
    println!();

    for (preset, origin) in catalog.iter_with_origin() {
        if let Some(tag) = tag
            && !preset.tags.iter().any(|t| t == tag)
        {
            continue;
        }
        println!(
            "  {:16} {:18} [{}] {}",
            preset.id,
            preset.name,
            origin,
            preset.description.as_deref().unwrap_or("")
        );
    }

    println!();
    println!("Use 'foilcard presets show <id>' for the values a preset sets.");
    Ok(())
}

fn show(name: &str) -> anyhow::Result<()> {
    let catalog = PresetCatalog::load_default();
    let preset = load_preset(&catalog, name)?;

    println!("{} ({})", preset.name, preset.id);
    if let Some(description) = &preset.description {
        println!("{description}");
    }
    if !preset.tags.is_empty() {
        println!("Tags: {}", preset.tags.join(", "));
    }
    println!();

    for (effect_id, param_id, value) in preset.effects.triples() {
        println!("  {effect_id}.{param_id} = {value}");
    }
    if preset.is_empty() {
        println!("  (no values, applies registry defaults)");
    }
    Ok(())
}

fn validate(paths: &[PathBuf]) -> anyhow::Result<()> {
    let validator = PresetValidator::new();
    let mut failures = 0;

    for path in paths {
        let result = Preset::load(path)
            .map_err(anyhow::Error::from)
            .and_then(|preset| validator.validate_preset(&preset).map_err(anyhow::Error::from));
        match result {
            Ok(()) => println!("ok      {}", path.display()),
            Err(e) => {
                failures += 1;
                println!("invalid {}: {e}", path.display());
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} preset files are invalid", paths.len());
    }
    Ok(())
}

fn copy(source: &str, name: Option<String>) -> anyhow::Result<()> {
    let catalog = PresetCatalog::with_factory_presets();
    let mut preset = load_preset(&catalog, source)?;

    if let Some(name) = name {
        Preset::check_id(&name)?;
        preset.id = name;
    }

    let dir = ensure_user_presets_dir()?;
    let path = dir.join(format!("{}.toml", preset.id));
    if path.exists() {
        anyhow::bail!("Preset '{}' already exists at {}", preset.id, path.display());
    }

    preset.save(&path)?;
    tracing::info!(id = %preset.id, path = %path.display(), "preset copied");
    println!("Saved {}", path.display());
    Ok(())
}
