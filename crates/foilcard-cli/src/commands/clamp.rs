//! Soft clamp inspection command.

use clap::Args;
use foilcard_core::{ParamValue, clamp_value, find_rule};
use foilcard_registry::EffectRegistry;

#[derive(Args)]
pub struct ClampArgs {
    /// Effect id
    effect: String,

    /// Parameter id
    param: String,

    /// Value to clamp
    #[arg(allow_negative_numbers = true)]
    value: f64,
}

pub fn run(args: ClampArgs) -> anyhow::Result<()> {
    let registry = EffectRegistry::new();
    if registry.param(&args.effect, &args.param).is_none() {
        anyhow::bail!("Unknown parameter: {}.{}", args.effect, args.param);
    }

    let clamped = clamp_value(&args.effect, &args.param, ParamValue::Numeric(args.value));

    match find_rule(&args.effect, &args.param) {
        Some(rule) => println!(
            "{}.{}: {} -> {} (soft {}, hard {})",
            args.effect, args.param, args.value, clamped, rule.soft, rule.hard
        ),
        None => println!(
            "{}.{}: {} -> {} (no clamp rule)",
            args.effect, args.param, args.value, clamped
        ),
    }
    Ok(())
}
