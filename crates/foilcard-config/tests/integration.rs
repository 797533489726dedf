//! Integration tests for foilcard-config.
//!
//! These tests exercise presets, the catalog and settings on real files.

use foilcard_config::{
    ConfigError, ConflictPolicy, EngineSettings, FileOp, Preset, PresetCatalog, PresetOrigin,
    PresetValidator, ValidationError, factory_presets, paths,
};
use foilcard_core::ParamValue;
use std::fs;
use tempfile::TempDir;

/// Saving and loading a preset keeps every value kind and the file order.
#[test]
fn test_preset_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("mixed.toml");

    let preset = Preset::new("mixed", "Mixed")
        .with_description("one of each kind")
        .with_tag("test")
        .with_param("gold", "intensity", 80.0)
        .with_param("gold", "goldTone", "rose")
        .with_param("gold", "colorEnhancement", false)
        .with_param("vintage", "patina", "#112233");

    preset.save(&path).expect("save should create the parent directory");
    let loaded = Preset::load(&path).unwrap();

    assert_eq!(loaded, preset);
    assert_eq!(loaded.effect_ids(), vec!["gold", "vintage"]);
}

/// Every factory preset passes strict validation.
#[test]
fn test_factory_presets_validate() {
    let validator = PresetValidator::new();
    for preset in factory_presets() {
        validator
            .validate_preset(&preset)
            .unwrap_or_else(|e| panic!("{} failed validation: {e}", preset.id));
    }
}

/// A preset directory overrides factory presets and skips broken files.
#[test]
fn test_catalog_load_dir() {
    let temp_dir = TempDir::new().unwrap();

    fs::write(
        temp_dir.path().join("gold-rush.toml"),
        "id = \"gold-rush\"\nname = \"My Gold\"\n[effects.gold]\nintensity = 50\n",
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("custom.toml"),
        "id = \"custom\"\nname = \"Custom\"\n[effects.chrome]\nintensity = 30\n",
    )
    .unwrap();
    fs::write(temp_dir.path().join("broken.toml"), "this is = not [valid").unwrap();
    fs::write(temp_dir.path().join("readme.txt"), "ignored").unwrap();

    let mut catalog = PresetCatalog::with_factory_presets();
    let factory_len = catalog.len();
    let loaded = catalog.load_dir(temp_dir.path());

    assert_eq!(loaded, 2);
    assert_eq!(catalog.len(), factory_len + 1);
    assert_eq!(catalog.get("gold-rush").unwrap().name, "My Gold");
    assert_eq!(
        catalog.origin("gold-rush"),
        Some(&PresetOrigin::File(temp_dir.path().join("gold-rush.toml")))
    );
    assert_eq!(catalog.origin("rainbow-holo"), Some(&PresetOrigin::Factory));
    assert_eq!(
        catalog.get("custom").unwrap().effects.get("chrome", "intensity"),
        Some(&ParamValue::Numeric(30.0))
    );
}

/// Loading a missing file reports the path.
#[test]
fn test_missing_preset_file() {
    let err = Preset::load("/nonexistent/foilcard/preset.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { op: FileOp::Read, .. }));
    assert!(err.to_string().contains("preset.toml"));
}

/// Validation errors convert into config errors.
#[test]
fn test_validation_error_conversion() {
    let preset = Preset::new("bad", "Bad").with_param("gold", "goldTone", "green");
    let err: ConfigError = PresetValidator::new()
        .validate_preset(&preset)
        .unwrap_err()
        .into();

    assert!(matches!(
        err,
        ConfigError::Validation(ValidationError::InvalidOption { .. })
    ));
}

/// Settings persist through a file and fall back to defaults when absent.
#[test]
fn test_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.toml");

    assert_eq!(
        EngineSettings::load_or_default(&path).unwrap(),
        EngineSettings::default()
    );

    let mut settings = EngineSettings::default();
    settings.conflict_policy = ConflictPolicy::Reject;
    settings.timing.validate_settle_ms = 50;
    settings.save(&path).unwrap();

    let loaded = EngineSettings::load_or_default(&path).unwrap();
    assert_eq!(loaded, settings);
}

/// Preset files found in a directory map back to their ids.
#[test]
fn test_list_and_identify_presets() {
    let temp_dir = TempDir::new().unwrap();
    Preset::new("alpha", "Alpha")
        .save(temp_dir.path().join("alpha.toml"))
        .unwrap();

    let files = paths::list_presets_in_dir(temp_dir.path());
    assert_eq!(files.len(), 1);
    assert_eq!(paths::preset_id_from_path(&files[0]).as_deref(), Some("alpha"));
}
