//! Effect registry for foilcard card effects.
//!
//! This crate provides the static catalog of visual effects a card can carry.
//! Every effect is described once, at startup, by an [`EffectDescriptor`]
//! listing its parameters; nothing here is mutated afterwards.
//!
//! # Features
//!
//! - **Effect Discovery**: List all available effects with metadata
//! - **Category System**: Effects organized by family (metallic, prismatic, ...)
//! - **Parameter Info**: Parameter descriptors for UI generation and validation
//! - **Defaults**: Build a complete default [`EffectValues`] set for a new session
//!
//! # Example
//!
//! ```rust
//! use foilcard_registry::{EffectCategory, EffectRegistry};
//!
//! let registry = EffectRegistry::new();
//!
//! // List all effects
//! for effect in registry.all_effects() {
//!     println!("{}: {}", effect.name, effect.description);
//! }
//!
//! // Filter by category
//! for effect in registry.effects_in_category(EffectCategory::Metallic) {
//!     println!("Metallic effect: {}", effect.name);
//! }
//!
//! // Every parameter starts at its default
//! let defaults = registry.default_values();
//! assert_eq!(defaults.numeric("gold", "intensity"), Some(0.0));
//! ```
//!
//! # Iteration Order
//!
//! Effects iterate in declaration order. [`EffectRegistry::default_values`]
//! preserves that order, and the dominant-effect tie-break depends on it.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! foilcard-registry = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;
use foilcard_core::{
    ClampRule, EffectValues, INTENSITY_PARAM, ParamDefault, ParamDescriptor, ParamKind, ParamMap,
};

/// Family of card effect for organization and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectCategory {
    /// Reflective metal finishes (chrome, brushed metal, gold)
    Metallic,
    /// Light-splitting rainbow finishes (holographic, prizm, ...)
    Prismatic,
    /// Surface texture finishes (crystal)
    Surface,
    /// Aged and print-era looks
    Vintage,
}

impl EffectCategory {
    /// Every category, in display order.
    pub const ALL: [EffectCategory; 4] = [
        EffectCategory::Metallic,
        EffectCategory::Prismatic,
        EffectCategory::Surface,
        EffectCategory::Vintage,
    ];

    /// Returns a human-readable name for the category.
    pub const fn name(&self) -> &'static str {
        match self {
            EffectCategory::Metallic => "Metallic",
            EffectCategory::Prismatic => "Prismatic",
            EffectCategory::Surface => "Surface",
            EffectCategory::Vintage => "Vintage",
        }
    }

    /// Returns a description of the category.
    pub const fn description(&self) -> &'static str {
        match self {
            EffectCategory::Metallic => "Chrome, brushed metal, gold and other reflective finishes",
            EffectCategory::Prismatic => {
                "Holographic, foil spray, prism and interference rainbow finishes"
            }
            EffectCategory::Surface => "Crystal facets and other surface textures",
            EffectCategory::Vintage => "Aged paper, patina and print-era looks",
        }
    }
}

impl fmt::Display for EffectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Describes an effect in the registry.
#[derive(Debug, Clone)]
pub struct EffectDescriptor {
    /// Unique identifier for the effect (lowercase, no spaces).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Brief description of the effect.
    pub description: &'static str,
    /// Category for organization.
    pub category: EffectCategory,
    /// Parameters in display order.
    pub params: &'static [ParamDescriptor],
}

impl EffectDescriptor {
    /// Number of parameters.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Parameter descriptor by id.
    pub fn param(&self, param_id: &str) -> Option<&ParamDescriptor> {
        self.params.iter().find(|p| p.id == param_id)
    }

    /// Every parameter at its default, in declaration order.
    pub fn default_params(&self) -> ParamMap {
        let mut map = ParamMap::with_capacity(self.params.len());
        for p in self.params {
            map.insert(p.id, p.default_value());
        }
        map
    }
}

const HOLOGRAPHIC_PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor::intensity(0.0),
    ParamDescriptor::numeric("shiftSpeed", "Shift Speed", 0.0, 200.0, 100.0).with_step(5.0),
    ParamDescriptor::numeric("rainbowSpread", "Rainbow Spread", 0.0, 100.0, 50.0).with_step(1.0),
    ParamDescriptor::toggle("animated", "Animated", true),
];

const FOILSPRAY_PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor::intensity(0.0),
    ParamDescriptor::numeric("density", "Density", 0.0, 100.0, 50.0).with_step(1.0),
    ParamDescriptor::numeric("direction", "Direction", 0.0, 360.0, 45.0).with_step(15.0),
];

const PRIZM_PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor::intensity(0.0),
    ParamDescriptor::numeric("complexity", "Complexity", 1.0, 10.0, 5.0).with_step(1.0),
    ParamDescriptor::numeric("colorSeparation", "Color Separation", 0.0, 100.0, 40.0)
        .with_step(1.0),
];

const INTERFERENCE_PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor::intensity(0.0),
    ParamDescriptor::numeric("frequency", "Frequency", 1.0, 20.0, 5.0).with_step(0.5),
    ParamDescriptor::numeric("thickness", "Thickness", 0.5, 5.0, 2.0).with_step(0.1),
];

const CHROME_PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor::intensity(0.0),
    ParamDescriptor::numeric("sharpness", "Sharpness", 0.0, 100.0, 70.0).with_step(1.0),
    ParamDescriptor::numeric("highlightSize", "Highlight Size", 0.0, 100.0, 40.0).with_step(1.0),
];

const BRUSHEDMETAL_PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor::intensity(0.0),
    ParamDescriptor::numeric("direction", "Direction", 0.0, 360.0, 45.0).with_step(15.0),
    ParamDescriptor::numeric("grainDensity", "Grain Density", 0.0, 100.0, 60.0).with_step(1.0),
];

const GOLD_TONES: &[&str] = &["rich", "rose", "white", "antique"];

const GOLD_PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor::intensity(0.0),
    ParamDescriptor::numeric("shimmerSpeed", "Shimmer Speed", 0.0, 200.0, 80.0).with_step(5.0),
    ParamDescriptor::numeric("platingThickness", "Plating Thickness", 0.0, 10.0, 5.0)
        .with_step(0.5),
    ParamDescriptor::choice("goldTone", "Gold Tone", GOLD_TONES, "rich"),
    ParamDescriptor::numeric("reflectivity", "Reflectivity", 0.0, 100.0, 75.0).with_step(1.0),
    ParamDescriptor::toggle("colorEnhancement", "Color Enhancement", true),
];

const CRYSTAL_PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor::intensity(0.0),
    ParamDescriptor::numeric("facets", "Facets", 3.0, 20.0, 8.0).with_step(1.0),
    ParamDescriptor::numeric("dispersion", "Dispersion", 0.0, 100.0, 60.0).with_step(1.0),
    ParamDescriptor::numeric("clarity", "Clarity", 0.0, 100.0, 80.0).with_step(1.0),
    ParamDescriptor::numeric("sparkle", "Sparkle", 0.0, 100.0, 50.0).with_step(1.0),
];

const VINTAGE_PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor::intensity(0.0),
    ParamDescriptor::numeric("aging", "Aging", 0.0, 100.0, 40.0).with_step(1.0),
    ParamDescriptor::numeric("yellowing", "Yellowing", 0.0, 100.0, 30.0).with_step(1.0),
    ParamDescriptor::color("patina", "Patina", "#8b7355"),
];

/// A configuration error in a registry.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// Two effects share an id.
    DuplicateEffect(&'static str),
    /// Two parameters of one effect share an id.
    DuplicateParam {
        /// Effect id.
        effect: &'static str,
        /// Repeated parameter id.
        param: &'static str,
    },
    /// An effect has no numeric `intensity` parameter.
    MissingIntensity(&'static str),
    /// A numeric parameter has `max <= min` or is missing its range.
    InvalidRange {
        /// Effect id.
        effect: &'static str,
        /// Parameter id.
        param: &'static str,
    },
    /// A default does not fit its own descriptor.
    InvalidDefault {
        /// Effect id.
        effect: &'static str,
        /// Parameter id.
        param: &'static str,
    },
    /// A clamp rule targets an unknown effect or a non-numeric parameter.
    UnknownClampTarget {
        /// Effect id named by the rule.
        effect: &'static str,
        /// Parameter id named by the rule.
        param: &'static str,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateEffect(id) => write!(f, "effect '{id}' is registered twice"),
            Self::DuplicateParam { effect, param } => {
                write!(f, "effect '{effect}' declares parameter '{param}' twice")
            }
            Self::MissingIntensity(id) => {
                write!(f, "effect '{id}' has no numeric '{INTENSITY_PARAM}' parameter")
            }
            Self::InvalidRange { effect, param } => {
                write!(f, "parameter '{effect}.{param}' has an invalid slider range")
            }
            Self::InvalidDefault { effect, param } => {
                write!(f, "parameter '{effect}.{param}' has a default outside its own domain")
            }
            Self::UnknownClampTarget { effect, param } => {
                write!(f, "clamp rule targets unknown numeric parameter '{effect}.{param}'")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RegistryError {}

/// Registry of all available card effects.
///
/// The registry provides a centralized way to discover effects and their
/// parameters by id. All built-in effects are registered by [`new`](Self::new).
#[derive(Debug, Clone)]
pub struct EffectRegistry {
    entries: Vec<EffectDescriptor>,
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectRegistry {
    /// Create a new registry with all built-in effects registered.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(9),
        };
        registry.register_builtin_effects();
        registry
    }

    /// Create a registry with no effects, for hosts that declare their own.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register all built-in effects.
    fn register_builtin_effects(&mut self) {
        // Prismatic
        self.register(EffectDescriptor {
            id: "holographic",
            name: "Holographic",
            description: "Shifting rainbow foil that follows the viewing angle",
            category: EffectCategory::Prismatic,
            params: HOLOGRAPHIC_PARAMS,
        });

        self.register(EffectDescriptor {
            id: "foilspray",
            name: "Foil Spray",
            description: "Fine metallic speckle sprayed across the card",
            category: EffectCategory::Prismatic,
            params: FOILSPRAY_PARAMS,
        });

        self.register(EffectDescriptor {
            id: "prizm",
            name: "Prizm",
            description: "Geometric prism refraction with color separation",
            category: EffectCategory::Prismatic,
            params: PRIZM_PARAMS,
        });

        self.register(EffectDescriptor {
            id: "interference",
            name: "Interference",
            description: "Thin-film soap-bubble interference bands",
            category: EffectCategory::Prismatic,
            params: INTERFERENCE_PARAMS,
        });

        // Metallic
        self.register(EffectDescriptor {
            id: "chrome",
            name: "Chrome",
            description: "Mirror-polished chrome with sharp highlights",
            category: EffectCategory::Metallic,
            params: CHROME_PARAMS,
        });

        self.register(EffectDescriptor {
            id: "brushedmetal",
            name: "Brushed Metal",
            description: "Directional brushed steel grain",
            category: EffectCategory::Metallic,
            params: BRUSHEDMETAL_PARAMS,
        });

        self.register(EffectDescriptor {
            id: "gold",
            name: "Gold",
            description: "Gold plating with selectable tone and shimmer",
            category: EffectCategory::Metallic,
            params: GOLD_PARAMS,
        });

        // Surface
        self.register(EffectDescriptor {
            id: "crystal",
            name: "Crystal",
            description: "Faceted crystal with dispersion and sparkle",
            category: EffectCategory::Surface,
            params: CRYSTAL_PARAMS,
        });

        // Vintage
        self.register(EffectDescriptor {
            id: "vintage",
            name: "Vintage",
            description: "Aged card stock with yellowing and patina",
            category: EffectCategory::Vintage,
            params: VINTAGE_PARAMS,
        });
    }

    /// Register an effect with the registry.
    ///
    /// Registration order is iteration order. Call [`validate`](Self::validate)
    /// after registering custom effects.
    pub fn register(&mut self, descriptor: EffectDescriptor) {
        self.entries.push(descriptor);
    }

    /// Returns descriptors for all registered effects.
    pub fn all_effects(&self) -> impl Iterator<Item = &EffectDescriptor> {
        self.entries.iter()
    }

    /// Returns descriptors for effects in a specific category.
    pub fn effects_in_category(
        &self,
        category: EffectCategory,
    ) -> impl Iterator<Item = &EffectDescriptor> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    /// Get a descriptor by effect ID.
    pub fn get(&self, id: &str) -> Option<&EffectDescriptor> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Get a parameter descriptor by effect and parameter ID.
    pub fn param(&self, effect_id: &str, param_id: &str) -> Option<&ParamDescriptor> {
        self.get(effect_id)?.param(param_id)
    }

    /// Effect IDs in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Complete value set with every parameter at its default.
    ///
    /// Effects appear in registration order.
    pub fn default_values(&self) -> EffectValues {
        let mut values = EffectValues::new();
        for effect in &self.entries {
            values.insert_effect(effect.id, effect.default_params());
        }
        values
    }

    /// Returns the number of registered effects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no effects are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks the registry for configuration errors.
    ///
    /// Meant to run once at startup; the built-in registry is checked by
    /// the test-suite.
    pub fn validate(&self) -> Result<(), RegistryError> {
        for (i, effect) in self.entries.iter().enumerate() {
            if self.entries[..i].iter().any(|e| e.id == effect.id) {
                return Err(RegistryError::DuplicateEffect(effect.id));
            }
            if !effect
                .param(INTENSITY_PARAM)
                .is_some_and(|p| p.kind == ParamKind::Numeric)
            {
                return Err(RegistryError::MissingIntensity(effect.id));
            }
            for (j, param) in effect.params.iter().enumerate() {
                if effect.params[..j].iter().any(|p| p.id == param.id) {
                    return Err(RegistryError::DuplicateParam {
                        effect: effect.id,
                        param: param.id,
                    });
                }
                validate_param(effect.id, param)?;
            }
        }
        Ok(())
    }

    /// Checks that every clamp rule targets a numeric parameter of this registry.
    pub fn validate_clamp_rules(&self, rules: &[ClampRule]) -> Result<(), RegistryError> {
        for rule in rules {
            let known = self
                .param(rule.effect_id, rule.parameter_id)
                .is_some_and(|p| p.kind == ParamKind::Numeric);
            if !known {
                return Err(RegistryError::UnknownClampTarget {
                    effect: rule.effect_id,
                    param: rule.parameter_id,
                });
            }
        }
        Ok(())
    }
}

fn validate_param(effect: &'static str, param: &ParamDescriptor) -> Result<(), RegistryError> {
    let invalid_default = || RegistryError::InvalidDefault {
        effect,
        param: param.id,
    };

    if param.kind == ParamKind::Numeric {
        let (Some(min), Some(max)) = (param.min, param.max) else {
            return Err(RegistryError::InvalidRange {
                effect,
                param: param.id,
            });
        };
        if min.is_nan() || max.is_nan() || max <= min {
            return Err(RegistryError::InvalidRange {
                effect,
                param: param.id,
            });
        }
        match param.default {
            ParamDefault::Numeric(d) if (min..=max).contains(&d) => {}
            _ => return Err(invalid_default()),
        }
    }

    if !param.accepts(&param.default_value()) {
        return Err(invalid_default());
    }
    Ok(())
}
