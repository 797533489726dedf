//! Named preset bundles available to a session.
//!
//! A [`PresetCatalog`] starts from the factory presets and can be extended
//! with presets from a directory or inserted programmatically. Ids are unique;
//! inserting an existing id replaces that preset in place, and the catalog
//! remembers where the winning copy came from.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::factory_presets::factory_presets;
use crate::paths;
use crate::Preset;

/// Where a catalog preset was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetOrigin {
    /// Embedded factory preset.
    Factory,
    /// Preset file on disk.
    File(PathBuf),
    /// Inserted by code at runtime.
    Runtime,
}

impl fmt::Display for PresetOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetOrigin::Factory => write!(f, "factory"),
            PresetOrigin::File(_) => write!(f, "user"),
            PresetOrigin::Runtime => write!(f, "runtime"),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    preset: Preset,
    origin: PresetOrigin,
}

/// Ordered collection of presets keyed by id.
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    entries: Vec<Entry>,
}

impl PresetCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the factory presets.
    pub fn with_factory_presets() -> Self {
        let mut catalog = Self::new();
        for preset in factory_presets() {
            catalog.insert_from(preset, PresetOrigin::Factory);
        }
        catalog
    }

    /// Factory presets plus everything in the user presets directory.
    pub fn load_default() -> Self {
        let mut catalog = Self::with_factory_presets();
        catalog.load_dir(&paths::user_presets_dir());
        catalog
    }

    /// Insert a preset, replacing any preset with the same id.
    ///
    /// Returns the replaced preset.
    pub fn insert(&mut self, preset: Preset) -> Option<Preset> {
        self.insert_from(preset, PresetOrigin::Runtime)
    }

    /// Insert a preset with an explicit origin, replacing any preset with the
    /// same id.
    pub fn insert_from(&mut self, preset: Preset, origin: PresetOrigin) -> Option<Preset> {
        match self.entries.iter_mut().find(|e| e.preset.id == preset.id) {
            Some(slot) => {
                slot.origin = origin;
                Some(std::mem::replace(&mut slot.preset, preset))
            }
            None => {
                self.entries.push(Entry { preset, origin });
                None
            }
        }
    }

    /// Remove a preset by id.
    pub fn remove(&mut self, id: &str) -> Option<Preset> {
        let index = self.entries.iter().position(|e| e.preset.id == id)?;
        Some(self.entries.remove(index).preset)
    }

    /// Load one preset file into the catalog, returning its id.
    pub fn load_file(&mut self, path: &Path) -> Result<String, ConfigError> {
        let preset = Preset::load(path)?;
        let id = preset.id.clone();
        if self.insert_from(preset, PresetOrigin::File(path.to_path_buf())).is_some() {
            tracing::debug!(id = %id, path = %path.display(), "preset file overrides existing preset");
        }
        Ok(id)
    }

    /// Load every `.toml` preset in a directory.
    ///
    /// Files that fail to parse are skipped with a warning. Returns the number
    /// of presets loaded.
    pub fn load_dir(&mut self, dir: &Path) -> usize {
        let mut loaded = 0;
        for path in paths::list_presets_in_dir(dir) {
            match self.load_file(&path) {
                Ok(_) => loaded += 1,
                Err(e) => {
                    let name = paths::preset_id_from_path(&path).unwrap_or_default();
                    tracing::warn!(preset = %name, error = %e, "skipping unreadable preset file");
                }
            }
        }
        tracing::debug!(dir = %dir.display(), loaded, "loaded preset directory");
        loaded
    }

    /// Preset by id.
    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.entry(id).map(|e| &e.preset)
    }

    /// Where the preset with this id was loaded from.
    pub fn origin(&self, id: &str) -> Option<&PresetOrigin> {
        self.entry(id).map(|e| &e.origin)
    }

    fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.preset.id == id)
    }

    /// Preset by id, or [`ConfigError::UnknownPreset`].
    pub fn require(&self, id: &str) -> Result<&Preset, ConfigError> {
        self.get(id)
            .ok_or_else(|| ConfigError::UnknownPreset(id.to_string()))
    }

    /// True if a preset with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Presets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.entries.iter().map(|e| &e.preset)
    }

    /// Presets with their origins, in insertion order.
    pub fn iter_with_origin(&self) -> impl Iterator<Item = (&Preset, &PresetOrigin)> {
        self.entries.iter().map(|e| (&e.preset, &e.origin))
    }

    /// Preset ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|p| p.id.as_str())
    }

    /// Presets carrying a tag.
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Preset> + 'a {
        self.iter().filter(move |p| p.tags.iter().any(|t| t == tag))
    }

    /// Number of presets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
