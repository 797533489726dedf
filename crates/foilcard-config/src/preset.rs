//! Preset file format and operations.

use foilcard_core::{EffectValues, ParamValue};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// A named bundle of parameter values across effects.
///
/// A preset only lists the parameters it cares about. Everything it leaves
/// out falls back to the registry default when the preset is applied.
///
/// # TOML Format
///
/// ```toml
/// id = "gold-rush"
/// name = "Gold Rush"
/// description = "Rich gold foil"
/// tags = ["metallic"]
///
/// [effects.gold]
/// intensity = 80
/// goldTone = "rich"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Stable identifier, used by catalogs and the CLI.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Free-form tags for browsing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Partial effect values, effect id → parameter id → value.
    #[serde(default)]
    pub effects: EffectValues,
}

impl Preset {
    /// Create a new empty preset.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            tags: Vec::new(),
            effects: EffectValues::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set a single parameter value.
    pub fn with_param(
        mut self,
        effect_id: &str,
        param_id: &str,
        value: impl Into<ParamValue>,
    ) -> Self {
        self.effects.set(effect_id, param_id, value.into());
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string, rejecting ids that are not
    /// usable as file stems.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let preset: Preset = toml::from_str(toml_str)?;
        Self::check_id(&preset.id)?;
        Ok(preset)
    }

    /// Ids are non-empty and limited to ASCII letters, digits, `-` and `_`,
    /// so `<id>.toml` is always a plain file name.
    pub fn check_id(id: &str) -> Result<(), ConfigError> {
        let valid = !id.is_empty()
            && id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if valid {
            Ok(())
        } else {
            Err(ConfigError::InvalidPresetId(id.to_string()))
        }
    }

    /// Save the preset to a TOML file, creating the parent directory.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Number of effects the preset touches.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// True if the preset sets no values.
    pub fn is_empty(&self) -> bool {
        self.effects.param_count() == 0
    }

    /// Ids of the effects the preset touches, in file order.
    pub fn effect_ids(&self) -> Vec<&str> {
        self.effects.iter().map(|(id, _)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_builder() {
        let preset = Preset::new("gold-rush", "Gold Rush")
            .with_description("Rich gold foil")
            .with_tag("metallic")
            .with_param("gold", "intensity", 80.0)
            .with_param("gold", "goldTone", "rich");

        assert_eq!(preset.id, "gold-rush");
        assert_eq!(preset.description.as_deref(), Some("Rich gold foil"));
        assert_eq!(preset.tags, vec!["metallic"]);
        assert_eq!(preset.len(), 1);
        assert_eq!(preset.effects.numeric("gold", "intensity"), Some(80.0));
    }

    #[test]
    fn test_preset_from_toml() {
        let toml = r#"
            id = "bubble"
            name = "Bubble"

            [effects.interference]
            intensity = 60
            thickness = 2.5

            [effects.holographic]
            animated = false
        "#;

        let preset = Preset::from_toml(toml).unwrap();
        assert_eq!(preset.name, "Bubble");
        assert!(preset.description.is_none());
        assert!(preset.tags.is_empty());
        assert_eq!(preset.effect_ids(), vec!["interference", "holographic"]);
        assert_eq!(preset.effects.numeric("interference", "intensity"), Some(60.0));
        assert_eq!(
            preset.effects.get("holographic", "animated"),
            Some(&ParamValue::Boolean(false))
        );
    }

    #[test]
    fn test_preset_without_effects_is_empty() {
        let preset = Preset::from_toml("id = \"blank\"\nname = \"Blank\"").unwrap();
        assert!(preset.is_empty());
    }

    #[test]
    fn test_preset_missing_name_fails() {
        assert!(Preset::from_toml("id = \"x\"").is_err());
    }

    #[test]
    fn test_preset_ids_must_be_file_stems() {
        assert!(Preset::check_id("gold-rush").is_ok());
        assert!(Preset::check_id("my_preset_2").is_ok());
        for bad in ["", "../gold", "gold rush", "a/b"] {
            assert!(
                matches!(Preset::check_id(bad), Err(ConfigError::InvalidPresetId(id)) if id == bad),
                "{bad:?} accepted"
            );
        }

        let err = Preset::from_toml("id = \"../escape\"\nname = \"Escape\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPresetId(_)));
    }

    #[test]
    fn test_preset_toml_keeps_mixed_kinds() {
        let preset = Preset::new("mix", "Mix")
            .with_param("vintage", "aging", 55.0)
            .with_param("vintage", "patina", "#aa8844")
            .with_param("gold", "colorEnhancement", false);

        let toml = preset.to_toml().unwrap();
        let loaded = Preset::from_toml(&toml).unwrap();
        assert_eq!(loaded, preset);
    }
}
