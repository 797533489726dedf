//! Strict preset validation.
//!
//! The state store is lenient: it skips unknown keys and values of the wrong
//! kind one by one, and lets the clamp handle range. Preset files authored by
//! hand deserve a louder check, so this module reports every problem at once.
//!
//! # Example
//!
//! ```rust
//! use foilcard_config::{Preset, PresetValidator};
//!
//! let validator = PresetValidator::new();
//! let preset = Preset::new("shiny", "Shiny").with_param("chrome", "intensity", 60.0);
//! validator.validate_preset(&preset).expect("chrome.intensity is valid");
//!
//! let broken = Preset::new("broken", "Broken").with_param("gold", "goldTone", "green");
//! assert!(validator.validate_preset(&broken).is_err());
//! ```

use foilcard_core::{ParamDescriptor, ParamKind, ParamValue, is_hex_color};
use foilcard_registry::EffectRegistry;
use thiserror::Error;

use crate::Preset;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown effect id.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    /// Unknown parameter id.
    #[error("unknown parameter '{param}' for effect '{effect}'")]
    UnknownParameter {
        /// Effect id.
        effect: String,
        /// The unrecognized parameter id.
        param: String,
    },

    /// Value has the wrong shape for the parameter.
    #[error("parameter '{effect}.{param}' expects {expected}, got {found}")]
    KindMismatch {
        /// Effect id.
        effect: String,
        /// Parameter id.
        param: String,
        /// Kind the parameter declares.
        expected: ParamKind,
        /// Kind name of the supplied value.
        found: &'static str,
    },

    /// Enumerated value not among the declared options.
    #[error("parameter '{effect}.{param}' has no option '{value}'")]
    InvalidOption {
        /// Effect id.
        effect: String,
        /// Parameter id.
        param: String,
        /// The rejected option.
        value: String,
    },

    /// Color value is not a hex color.
    #[error("parameter '{effect}.{param}' expects a hex color, got '{value}'")]
    InvalidColor {
        /// Effect id.
        effect: String,
        /// Parameter id.
        param: String,
        /// The rejected value.
        value: String,
    },

    /// Numeric value outside the slider range.
    #[error("parameter '{effect}.{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Effect id.
        effect: String,
        /// Parameter id.
        param: String,
        /// The value that was out of range.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check a single value against a parameter descriptor.
pub fn validate_value(
    effect_id: &str,
    descriptor: &ParamDescriptor,
    value: &ParamValue,
) -> ValidationResult<()> {
    let mismatch = || ValidationError::KindMismatch {
        effect: effect_id.to_string(),
        param: descriptor.id.to_string(),
        expected: descriptor.kind,
        found: value.kind_name(),
    };

    match (descriptor.kind, value) {
        (ParamKind::Numeric, ParamValue::Numeric(v)) => {
            let min = descriptor.min.unwrap_or(f64::NEG_INFINITY);
            let max = descriptor.max.unwrap_or(f64::INFINITY);
            if v.is_nan() || *v < min || *v > max {
                return Err(ValidationError::OutOfRange {
                    effect: effect_id.to_string(),
                    param: descriptor.id.to_string(),
                    value: *v,
                    min,
                    max,
                });
            }
            Ok(())
        }
        (ParamKind::Boolean, ParamValue::Boolean(_)) => Ok(()),
        (ParamKind::Enumerated, ParamValue::Text(s)) => {
            if descriptor.options.contains(&s.as_str()) {
                Ok(())
            } else {
                Err(ValidationError::InvalidOption {
                    effect: effect_id.to_string(),
                    param: descriptor.id.to_string(),
                    value: s.clone(),
                })
            }
        }
        (ParamKind::Color, ParamValue::Text(s)) => {
            if is_hex_color(s) {
                Ok(())
            } else {
                Err(ValidationError::InvalidColor {
                    effect: effect_id.to_string(),
                    param: descriptor.id.to_string(),
                    value: s.clone(),
                })
            }
        }
        _ => Err(mismatch()),
    }
}

/// Validate every value of a preset against a registry.
///
/// Returns the single error when there is one, or
/// [`ValidationError::Multiple`] listing all of them.
pub fn validate_preset(preset: &Preset, registry: &EffectRegistry) -> ValidationResult<()> {
    let mut errors = Vec::new();

    for (effect_id, params) in preset.effects.iter() {
        let Some(effect) = registry.get(effect_id) else {
            errors.push(ValidationError::UnknownEffect(effect_id.to_string()));
            continue;
        };

        for (param_id, value) in params.iter() {
            match effect.param(param_id) {
                Some(descriptor) => {
                    if let Err(e) = validate_value(effect_id, descriptor, value) {
                        errors.push(e);
                    }
                }
                None => errors.push(ValidationError::UnknownParameter {
                    effect: effect_id.to_string(),
                    param: param_id.to_string(),
                }),
            }
        }
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Validator bound to a registry.
pub struct PresetValidator {
    registry: EffectRegistry,
}

impl Default for PresetValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetValidator {
    /// Validator for the built-in effects.
    pub fn new() -> Self {
        Self::with_registry(EffectRegistry::new())
    }

    /// Validator for a custom registry.
    pub fn with_registry(registry: EffectRegistry) -> Self {
        Self { registry }
    }

    /// The registry this validator checks against.
    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    /// Validate that an effect id exists.
    pub fn validate_effect(&self, effect_id: &str) -> ValidationResult<()> {
        if self.registry.get(effect_id).is_some() {
            Ok(())
        } else {
            Err(ValidationError::UnknownEffect(effect_id.to_string()))
        }
    }

    /// Validate one parameter value.
    pub fn validate_param(
        &self,
        effect_id: &str,
        param_id: &str,
        value: &ParamValue,
    ) -> ValidationResult<()> {
        self.validate_effect(effect_id)?;
        let descriptor = self.registry.param(effect_id, param_id).ok_or_else(|| {
            ValidationError::UnknownParameter {
                effect: effect_id.to_string(),
                param: param_id.to_string(),
            }
        })?;
        validate_value(effect_id, descriptor, value)
    }

    /// Validate a whole preset.
    pub fn validate_preset(&self, preset: &Preset) -> ValidationResult<()> {
        validate_preset(preset, &self.registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_effect() {
        let validator = PresetValidator::new();
        assert!(validator.validate_effect("gold").is_ok());
        assert_eq!(
            validator.validate_effect("sparkles"),
            Err(ValidationError::UnknownEffect("sparkles".to_string()))
        );
    }

    #[test]
    fn test_validate_param_kinds() {
        let validator = PresetValidator::new();
        let ok = |e, p, v: ParamValue| validator.validate_param(e, p, &v).is_ok();

        assert!(ok("gold", "intensity", 80.0.into()));
        assert!(ok("gold", "goldTone", "rose".into()));
        assert!(ok("holographic", "animated", false.into()));
        assert!(ok("vintage", "patina", "#abc".into()));

        assert!(!ok("gold", "goldTone", "green".into()));
        assert!(!ok("vintage", "patina", "brown".into()));
        assert!(!ok("gold", "intensity", "high".into()));
        assert!(!ok("gold", "shine", 1.0.into()));
    }

    #[test]
    fn test_kind_mismatch_reports_kinds() {
        let validator = PresetValidator::new();
        let err = validator
            .validate_param("holographic", "animated", &ParamValue::from(1.0))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::KindMismatch {
                effect: "holographic".to_string(),
                param: "animated".to_string(),
                expected: ParamKind::Boolean,
                found: "numeric",
            }
        );
    }

    #[test]
    fn test_out_of_range() {
        let validator = PresetValidator::new();
        let err = validator
            .validate_param("chrome", "intensity", &ParamValue::from(150.0))
            .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { max, .. } if max == 100.0));
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_validate_preset_collects_all_errors() {
        let preset = Preset::new("bad", "Bad")
            .with_param("gold", "intensity", 80.0)
            .with_param("gold", "goldTone", "green")
            .with_param("sparkles", "intensity", 10.0)
            .with_param("chrome", "shine", 1.0);

        match validate_preset(&preset, &EffectRegistry::new()) {
            Err(ValidationError::Multiple(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(matches!(errors[0], ValidationError::InvalidOption { .. }));
                assert!(matches!(errors[1], ValidationError::UnknownEffect(_)));
                assert!(matches!(errors[2], ValidationError::UnknownParameter { .. }));
            }
            other => panic!("expected multiple errors, got {other:?}"),
        }
    }

    #[test]
    fn test_single_error_is_not_wrapped() {
        let preset = Preset::new("bad", "Bad").with_param("sparkles", "intensity", 10.0);
        assert_eq!(
            validate_preset(&preset, &EffectRegistry::new()),
            Err(ValidationError::UnknownEffect("sparkles".to_string()))
        );
    }
}
