//! Effect listing and information command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use foilcard_core::{ParamDescriptor, ParamKind, effect_color, find_rule};
use foilcard_registry::{EffectCategory, EffectRegistry};

#[derive(Args)]
pub struct EffectsArgs {
    /// Show details for a specific effect
    #[arg(value_name = "EFFECT")]
    effect: Option<String>,
}

fn describe_range(param: &ParamDescriptor) -> String {
    match param.kind {
        ParamKind::Numeric => match (param.min, param.max) {
            (Some(min), Some(max)) => format!("{min} - {max}"),
            _ => "any".to_string(),
        },
        ParamKind::Boolean => "true / false".to_string(),
        ParamKind::Enumerated => param.options.join(" / "),
        ParamKind::Color => "#rrggbb".to_string(),
    }
}

pub fn run(args: EffectsArgs) -> anyhow::Result<()> {
    let registry = EffectRegistry::new();

    if let Some(effect_id) = &args.effect {
        let effect = registry
            .all_effects()
            .find(|e| e.id.eq_ignore_ascii_case(effect_id))
            .ok_or_else(|| anyhow::anyhow!("Unknown effect: {}", effect_id))?;

        println!("{} ({})", effect.name, effect.id);
        println!("{}", "=".repeat(effect.name.len() + effect.id.len() + 3));
        println!();
        println!("{}", effect.description);
        println!("Category: {}   Color: {}", effect.category, effect_color(effect.id));
        println!();

        println!("Parameters:");
        println!();
        println!(
            "  {:18}  {:10}  {:10}  {:24}  {}",
            "Id", "Kind", "Default", "Range", "Soft clamp"
        );
        println!(
            "  {:18}  {:10}  {:10}  {:24}  {}",
            "--", "----", "-------", "-----", "----------"
        );

        for param in effect.params {
            let clamp = find_rule(effect.id, param.id)
                .map(|r| format!("{} -> {}", r.soft, r.hard))
                .unwrap_or_default();
            println!(
                "  {:18}  {:10}  {:10}  {:24}  {}",
                param.id,
                param.kind.name(),
                param.default_value().to_string(),
                describe_range(param),
                clamp
            );
        }

        println!();
        println!("Example usage:");
        println!();
        println!(
            "  foilcard apply gold-rush --set {}.{}=50",
            effect.id,
            foilcard_core::INTENSITY_PARAM
        );
    } else {
        println!("Available Effects");
        println!("=================");

        for category in EffectCategory::ALL {
            let effects: Vec<_> = registry.effects_in_category(category).collect();
            if effects.is_empty() {
                continue;
            }
            println!();
            println!("{} - {}", category, category.description());
            for effect in effects {
                println!("  {:14} - {}", effect.id, effect.description);
            }
        }

        println!();
        println!("Use 'foilcard effects <id>' for detailed parameter info.");
    }

    Ok(())
}
