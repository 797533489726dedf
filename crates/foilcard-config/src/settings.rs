//! Engine settings: transition timing, conflict policy and panel flags.
//!
//! Settings live in `settings.toml` under the user config directory. Every
//! field has a default, so a partial or missing file is fine.
//!
//! ```toml
//! conflict_policy = "reject"
//!
//! [timing]
//! reset_settle_ms = 150
//! apply_settle_ms = 100
//! validate_settle_ms = 200
//!
//! [panels]
//! effects_open = true
//! presets_open = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Settle delays between the phases of a preset transition.
///
/// Only the ordering reset → apply → validate is fixed; the delays are
/// tunable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionTiming {
    /// Delay after resetting to defaults before the preset values land.
    pub reset_settle_ms: u64,
    /// Delay after applying before derived state is validated.
    pub apply_settle_ms: u64,
    /// Delay after validation before the lock is released.
    pub validate_settle_ms: u64,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            reset_settle_ms: 150,
            apply_settle_ms: 100,
            validate_settle_ms: 200,
        }
    }
}

impl TransitionTiming {
    /// No delays at all; every phase runs on the next poll.
    pub const IMMEDIATE: Self = Self {
        reset_settle_ms: 0,
        apply_settle_ms: 0,
        validate_settle_ms: 0,
    };

    /// Delay before the apply phase.
    pub fn reset_settle(&self) -> Duration {
        Duration::from_millis(self.reset_settle_ms)
    }

    /// Delay before the validate phase.
    pub fn apply_settle(&self) -> Duration {
        Duration::from_millis(self.apply_settle_ms)
    }

    /// Delay before the lock is released.
    pub fn validate_settle(&self) -> Duration {
        Duration::from_millis(self.validate_settle_ms)
    }

    /// Time from start to unlock.
    pub fn total(&self) -> Duration {
        self.reset_settle() + self.apply_settle() + self.validate_settle()
    }
}

/// What happens when a preset is applied while another is still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Cancel the in-flight transition and start the new one.
    #[default]
    Supersede,
    /// Ignore the new request until the current transition completes.
    Reject,
}

/// Open/closed flags of the editor's side panels.
///
/// Pure UI state; the engine carries it so a session can be restored as a
/// whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelState {
    /// Effect list panel.
    pub effects_open: bool,
    /// Preset browser panel.
    pub presets_open: bool,
    /// Per-effect parameter panel.
    pub parameters_open: bool,
    /// Rotation/geometry debug overlay.
    pub debug_open: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            effects_open: true,
            presets_open: true,
            parameters_open: true,
            debug_open: false,
        }
    }
}

/// All engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Preset conflict policy.
    pub conflict_policy: ConflictPolicy,
    /// Transition settle delays.
    pub timing: TransitionTiming,
    /// Panel flags.
    pub panels: PanelState,
}

impl EngineSettings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load settings from a file, or defaults if it does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Convert settings to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save settings to a TOML file, creating the parent directory.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }
        std::fs::write(path, self.to_toml()?).map_err(|e| ConfigError::write_file(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing_order() {
        let t = TransitionTiming::default();
        assert_eq!(t.reset_settle(), Duration::from_millis(150));
        assert_eq!(t.apply_settle(), Duration::from_millis(100));
        assert_eq!(t.validate_settle(), Duration::from_millis(200));
        assert_eq!(t.total(), Duration::from_millis(450));
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings = EngineSettings::from_toml(
            r#"
            conflict_policy = "reject"

            [timing]
            apply_settle_ms = 20
            "#,
        )
        .unwrap();

        assert_eq!(settings.conflict_policy, ConflictPolicy::Reject);
        assert_eq!(settings.timing.apply_settle_ms, 20);
        assert_eq!(settings.timing.reset_settle_ms, 150);
        assert_eq!(settings.panels, PanelState::default());
    }

    #[test]
    fn test_empty_settings_are_default() {
        assert_eq!(
            EngineSettings::from_toml("").unwrap(),
            EngineSettings::default()
        );
    }

    #[test]
    fn test_unknown_policy_fails() {
        assert!(EngineSettings::from_toml("conflict_policy = \"queue\"").is_err());
    }

    #[test]
    fn test_settings_toml_round_trip() {
        let settings = EngineSettings {
            conflict_policy: ConflictPolicy::Reject,
            timing: TransitionTiming::IMMEDIATE,
            panels: PanelState {
                debug_open: true,
                ..PanelState::default()
            },
        };
        let toml = settings.to_toml().unwrap();
        assert_eq!(EngineSettings::from_toml(&toml).unwrap(), settings);
    }
}
