//! Apply a preset and print the resulting effect state.
//!
//! Runs the full preset transition on a virtual clock, then applies manual
//! `--set` edits on top, exactly as an editor would see them.

use clap::Args;
use foilcard_config::{EngineSettings, PresetCatalog, settings_file};
use foilcard_core::{ParamValue, Rotation};
use foilcard_engine::{EffectSession, ManualClock};
use foilcard_registry::EffectRegistry;

use super::common::{load_preset, parse_assignment};

#[derive(Args)]
pub struct ApplyArgs {
    /// Preset id or path to a preset file
    preset: String,

    /// Manual edit applied after the preset (e.g., gold.intensity=90)
    #[arg(short, long = "set", value_parser = parse_assignment)]
    edits: Vec<(String, String, ParamValue)>,

    /// Rotation around the X axis in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    x: f64,

    /// Rotation around the Y axis in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    y: f64,

    /// Print every parameter, not only those differing from defaults
    #[arg(long)]
    all: bool,

    /// Print the render frame as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ApplyArgs) -> anyhow::Result<()> {
    let settings = match EngineSettings::load_or_default(settings_file()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable settings file");
            EngineSettings::default()
        }
    };

    let catalog = PresetCatalog::load_default();
    let preset = load_preset(&catalog, &args.preset)?;

    let clock = ManualClock::new();
    let mut session = EffectSession::with_settings(
        EffectRegistry::new(),
        catalog,
        clock.clone(),
        &settings,
    )?;

    session.apply_preset(&preset.effects, Some(&preset.id));
    clock.advance(settings.timing.total());
    session.poll();

    for (effect_id, param_id, value) in args.edits {
        if !session.handle_effect_change(&effect_id, &param_id, value.clone()) {
            tracing::warn!(
                effect = %effect_id,
                param = %param_id,
                value = %value,
                "edit ignored (unknown parameter or wrong kind)"
            );
        }
    }

    session.set_rotation(Rotation::new(args.x, args.y));
    let frame = session.frame();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&frame)?);
        return Ok(());
    }

    println!("Preset: {} ({})", preset.name, preset.id);
    println!();

    let defaults = session.store().defaults();
    for (effect_id, param_id, value) in frame.values.triples() {
        if args.all || defaults.get(effect_id, param_id) != Some(value) {
            println!("  {effect_id}.{param_id} = {value}");
        }
    }

    println!();
    match &frame.dominant {
        Some(d) => println!("Dominant effect: {} ({})", d.effect_id, d.intensity),
        None => println!("Dominant effect: none"),
    }
    println!(
        "Back material:   {:?} {} (metalness {:.2}, roughness {:.2})",
        frame.back_material.kind,
        frame.back_material.color,
        frame.back_material.metalness,
        frame.back_material.roughness
    );
    println!(
        "Edge glow:       {} opacity {:.2}",
        frame.edge_glow.color, frame.edge_glow.opacity
    );
    println!(
        "Visible face:    {:?} (front {:.3})",
        frame.faces.visible_face, frame.faces.front
    );

    Ok(())
}
