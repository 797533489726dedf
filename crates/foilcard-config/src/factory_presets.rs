//! Factory presets bundled with foilcard.
//!
//! These are embedded at compile time and always available, independent of
//! the user's preset directory. Each one only lists the values it changes;
//! applying a preset starts from registry defaults.

use crate::Preset;

/// TOML content for factory presets, keyed by preset id.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("gold-rush", GOLD_RUSH_PRESET),
    ("rainbow-holo", RAINBOW_HOLO_PRESET),
    ("mirror-chrome", MIRROR_CHROME_PRESET),
    ("prism-burst", PRISM_BURST_PRESET),
    ("soap-bubble", SOAP_BUBBLE_PRESET),
    ("ice-crystal", ICE_CRYSTAL_PRESET),
    ("worn-classic", WORN_CLASSIC_PRESET),
    ("brushed-steel", BRUSHED_STEEL_PRESET),
];

/// Rich gold plating.
const GOLD_RUSH_PRESET: &str = r#"
id = "gold-rush"
name = "Gold Rush"
description = "Rich gold plating with a slow shimmer"
tags = ["metallic"]

[effects.gold]
intensity = 80
goldTone = "rich"
"#;

/// Full-spectrum holographic foil.
const RAINBOW_HOLO_PRESET: &str = r#"
id = "rainbow-holo"
name = "Rainbow Holo"
description = "Wide rainbow spread that follows the tilt"
tags = ["prismatic", "animated"]

[effects.holographic]
intensity = 75
rainbowSpread = 85
shiftSpeed = 120
animated = true

[effects.foilspray]
intensity = 25
density = 40
"#;

/// Mirror chrome.
const MIRROR_CHROME_PRESET: &str = r#"
id = "mirror-chrome"
name = "Mirror Chrome"
description = "Polished chrome with tight highlights"
tags = ["metallic"]

[effects.chrome]
intensity = 85
sharpness = 90
highlightSize = 25
"#;

/// Prism refraction layered over light holo.
const PRISM_BURST_PRESET: &str = r#"
id = "prism-burst"
name = "Prism Burst"
description = "Geometric prism refraction over a light holo base"
tags = ["prismatic"]

[effects.prizm]
intensity = 70
complexity = 7
colorSeparation = 55

[effects.holographic]
intensity = 20
"#;

/// Thin-film interference.
const SOAP_BUBBLE_PRESET: &str = r#"
id = "soap-bubble"
name = "Soap Bubble"
description = "Thin-film interference bands"
tags = ["prismatic"]

[effects.interference]
intensity = 65
frequency = 8
thickness = 1.5
"#;

/// Faceted crystal.
const ICE_CRYSTAL_PRESET: &str = r#"
id = "ice-crystal"
name = "Ice Crystal"
description = "Clear faceted crystal with sparkle"
tags = ["surface"]

[effects.crystal]
intensity = 70
facets = 12
dispersion = 60
clarity = 90
sparkle = 70
"#;

/// Aged card stock.
const WORN_CLASSIC_PRESET: &str = r##"
id = "worn-classic"
name = "Worn Classic"
description = "Yellowed vintage stock with a brown patina"
tags = ["vintage"]

[effects.vintage]
intensity = 60
aging = 70
yellowing = 55
patina = "#8b7355"
"##;

/// Brushed steel with a touch of gold.
const BRUSHED_STEEL_PRESET: &str = r#"
id = "brushed-steel"
name = "Brushed Steel"
description = "Directional brushed steel with a faint white-gold tint"
tags = ["metallic"]

[effects.brushedmetal]
intensity = 70
direction = 90
grainDensity = 75

[effects.gold]
intensity = 15
goldTone = "white"
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use foilcard_config::factory_presets;
///
/// let presets = factory_presets();
/// assert!(!presets.is_empty());
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(id, toml)| parse_factory(id, toml))
        .collect()
}

fn parse_factory(id: &str, toml: &str) -> Option<Preset> {
    match Preset::from_toml(toml) {
        Ok(preset) => Some(preset),
        Err(e) => {
            tracing::warn!(id, error = %e, "skipping malformed factory preset");
            None
        }
    }
}

/// Get a factory preset by id or display name (case-insensitive).
///
/// ```rust
/// use foilcard_config::get_factory_preset;
///
/// let preset = get_factory_preset("Gold Rush").unwrap();
/// assert_eq!(preset.id, "gold-rush");
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    if let Some((id, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(name))
    {
        return parse_factory(id, toml);
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_preset;
    use foilcard_core::ParamValue;
    use foilcard_registry::EffectRegistry;

    #[test]
    fn test_factory_presets_load() {
        let presets = factory_presets();
        assert_eq!(presets.len(), FACTORY_PRESETS_TOML.len());
    }

    #[test]
    fn test_malformed_factory_entry_is_skipped() {
        assert!(parse_factory("broken", "id = [").is_none());
        assert!(parse_factory("gold-rush", FACTORY_PRESETS_TOML[0].1).is_some());
    }

    #[test]
    fn test_factory_ids_match_file_ids() {
        for (id, toml) in FACTORY_PRESETS_TOML {
            let preset = Preset::from_toml(toml).unwrap();
            assert_eq!(&preset.id, id);
        }
    }

    #[test]
    fn test_all_factory_presets_valid() {
        let registry = EffectRegistry::new();
        for preset in factory_presets() {
            if let Err(e) = validate_preset(&preset, &registry) {
                panic!("factory preset '{}' is invalid: {e}", preset.id);
            }
        }
    }

    #[test]
    fn test_get_factory_preset() {
        assert!(get_factory_preset("gold-rush").is_some());
        assert!(get_factory_preset("GOLD-RUSH").is_some());
        assert!(get_factory_preset("mirror chrome").is_some());
        assert!(get_factory_preset("nonexistent").is_none());
    }

    #[test]
    fn test_gold_rush_structure() {
        let preset = get_factory_preset("gold-rush").unwrap();
        assert_eq!(preset.effect_ids(), vec!["gold"]);
        assert_eq!(preset.effects.numeric("gold", "intensity"), Some(80.0));
        assert_eq!(
            preset.effects.get("gold", "goldTone"),
            Some(&ParamValue::from("rich"))
        );
    }
}
