//! Helpers shared by several commands.

use foilcard_config::{Preset, PresetCatalog, find_preset, get_factory_preset};
use foilcard_core::ParamValue;

/// Parse `effect.param=value` into its three parts.
pub fn parse_assignment(s: &str) -> Result<(String, String, ParamValue), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid assignment: '{s}' (expected effect.param=value)"))?;
    let (effect, param) = key
        .split_once('.')
        .ok_or_else(|| format!("Invalid key: '{key}' (expected effect.param)"))?;
    if effect.is_empty() || param.is_empty() {
        return Err(format!("Invalid key: '{key}' (expected effect.param)"));
    }
    Ok((effect.to_string(), param.to_string(), parse_value(value)))
}

/// Read a command-line value as boolean, number or text, in that order.
pub fn parse_value(s: &str) -> ParamValue {
    match s {
        "true" => ParamValue::Boolean(true),
        "false" => ParamValue::Boolean(false),
        _ => s
            .parse::<f64>()
            .map(ParamValue::Numeric)
            .unwrap_or_else(|_| ParamValue::Text(s.to_string())),
    }
}

/// Load a preset by catalog id or by path.
///
/// Searches in this order:
/// 1. The catalog (factory and user presets) by id
/// 2. A factory preset by display name, e.g. "Gold Rush"
/// 3. A `.toml` file path, or `<user presets>/<name>.toml`
pub fn load_preset(catalog: &PresetCatalog, name: &str) -> anyhow::Result<Preset> {
    if let Some(preset) = catalog.get(name) {
        return Ok(preset.clone());
    }

    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }

    if let Some(path) = find_preset(name) {
        return Ok(Preset::load(&path)?);
    }

    anyhow::bail!(
        "Preset not found: '{}'. Use 'foilcard presets list' to see available presets.",
        name
    )
}
