//! Foilcard Config - presets, settings and validation
//!
//! This crate handles everything foilcard reads from or writes to disk:
//!
//! - **Presets**: named bundles of partial effect values ([`Preset`]) in TOML
//! - **Factory presets**: built-in presets that ship with the library
//! - **Catalog**: [`PresetCatalog`] merging factory and user presets by id
//! - **Validation**: strict checks of preset files against the effect registry
//! - **Settings**: [`EngineSettings`] (transition timing, conflict policy, panel flags)
//! - **Paths**: platform-specific directories for user presets and settings
//!
//! # Quick Start
//!
//! ```rust
//! use foilcard_config::{PresetCatalog, validate_preset};
//! use foilcard_registry::EffectRegistry;
//!
//! let catalog = PresetCatalog::with_factory_presets();
//! let preset = catalog.get("gold-rush").unwrap();
//!
//! validate_preset(preset, &EffectRegistry::new()).unwrap();
//! assert_eq!(preset.effects.numeric("gold", "intensity"), Some(80.0));
//! ```
//!
//! # Preset Format
//!
//! ```toml
//! id = "gold-rush"
//! name = "Gold Rush"
//! description = "Rich gold plating"
//!
//! [effects.gold]
//! intensity = 80
//! goldTone = "rich"
//! ```

mod catalog;
mod error;
pub mod factory_presets;
pub mod paths;
mod preset;
mod settings;
mod validation;

pub use catalog::{PresetCatalog, PresetOrigin};
pub use error::{ConfigError, FileOp};
pub use factory_presets::{factory_presets, get_factory_preset};
pub use paths::{
    ensure_user_presets_dir, find_preset, settings_file, user_config_dir, user_presets_dir,
};
pub use preset::Preset;
pub use settings::{ConflictPolicy, EngineSettings, PanelState, TransitionTiming};
pub use validation::{
    PresetValidator, ValidationError, ValidationResult, validate_preset, validate_value,
};
