//! Dominant effect selection and the rendering decisions derived from it.
//!
//! Several effects can be active at once, but some rendering decisions are
//! single-valued: the card back has one material and the edges glow in one
//! color. Those follow the *dominant* effect, the active effect with the
//! highest `intensity`.
//!
//! # Selection Rules
//!
//! - An effect is active when its `intensity` parameter is numeric and
//!   strictly above [`ACTIVE_THRESHOLD`] (10 on the 0–100 scale). Values at
//!   or below it are treated as slider noise.
//! - The strictly greatest intensity wins. Ties go to the first effect in
//!   iteration order, which for a registry-built value set is registry
//!   declaration order.
//! - No active effect → `None`; callers render the neutral defaults
//!   ([`BackMaterial::neutral`], [`EdgeGlow::off`]).
//!
//! ```rust
//! use foilcard_core::{EffectValues, select_dominant};
//!
//! let values = EffectValues::new()
//!     .with_param("holographic", "intensity", 10.0)
//!     .with_param("gold", "intensity", 60.0)
//!     .with_param("chrome", "intensity", 60.0);
//!
//! let dominant = select_dominant(&values).unwrap();
//! assert_eq!(dominant.effect_id, "gold");
//! assert_eq!(dominant.intensity, 60.0);
//! ```

#[cfg(not(feature = "std"))]
use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::values::EffectValues;
use core::fmt;

/// Intensities at or below this value do not count as active.
pub const ACTIVE_THRESHOLD: f64 = 10.0;

/// Parameter id carrying each effect's strength.
pub const INTENSITY_PARAM: &str = "intensity";

/// Full-scale intensity.
pub const MAX_INTENSITY: f64 = 100.0;

/// The winning effect.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DominantEffect {
    /// Effect id.
    pub effect_id: String,
    /// Its intensity, on the 0–100 scale.
    pub intensity: f64,
}

impl DominantEffect {
    /// Intensity mapped to `[0, 1]`.
    pub fn strength(&self) -> f64 {
        (self.intensity / MAX_INTENSITY).clamp(0.0, 1.0)
    }
}

/// Intensity of one effect's entry, if it is active.
fn active_intensity(values: &EffectValues, effect_id: &str) -> Option<f64> {
    values
        .numeric(effect_id, INTENSITY_PARAM)
        .filter(|&i| i > ACTIVE_THRESHOLD)
}

/// All active effects in iteration order.
pub fn active_effects(values: &EffectValues) -> Vec<DominantEffect> {
    values
        .iter()
        .filter_map(|(id, _)| {
            active_intensity(values, id).map(|intensity| DominantEffect {
                effect_id: id.to_string(),
                intensity,
            })
        })
        .collect()
}

/// Picks the dominant effect. See the module docs for the rules.
pub fn select_dominant(values: &EffectValues) -> Option<DominantEffect> {
    let mut best: Option<(&str, f64)> = None;
    for (id, _) in values.iter() {
        let Some(intensity) = active_intensity(values, id) else {
            continue;
        };
        // strict comparison keeps the earlier entry on ties
        if best.is_none_or(|(_, top)| intensity > top) {
            best = Some((id, intensity));
        }
    }
    best.map(|(id, intensity)| DominantEffect {
        effect_id: id.to_string(),
        intensity,
    })
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectColor {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl EffectColor {
    /// Creates a color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as `[0, 1]` floats.
    pub fn to_unit(self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }
}

impl fmt::Display for EffectColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for EffectColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Color used when no effect is active or the effect id is unknown.
pub const DEFAULT_EFFECT_COLOR: EffectColor = EffectColor::rgb(0x3a, 0x3a, 0x4a);

/// Representative color per effect id.
static EFFECT_COLORS: &[(&str, EffectColor)] = &[
    ("holographic", EffectColor::rgb(0xb3, 0x88, 0xff)),
    ("foilspray", EffectColor::rgb(0xc8, 0xc8, 0xff)),
    ("prizm", EffectColor::rgb(0xff, 0x6e, 0xc7)),
    ("chrome", EffectColor::rgb(0xc0, 0xc0, 0xc0)),
    ("interference", EffectColor::rgb(0x7f, 0xff, 0xd4)),
    ("brushedmetal", EffectColor::rgb(0xa8, 0xa9, 0xad)),
    ("gold", EffectColor::rgb(0xff, 0xd7, 0x00)),
    ("crystal", EffectColor::rgb(0xe0, 0xf7, 0xff)),
    ("vintage", EffectColor::rgb(0xd2, 0xb4, 0x8c)),
];

/// Representative color of an effect; unknown ids get [`DEFAULT_EFFECT_COLOR`].
pub fn effect_color(effect_id: &str) -> EffectColor {
    EFFECT_COLORS
        .iter()
        .find(|(id, _)| *id == effect_id)
        .map_or(DEFAULT_EFFECT_COLOR, |(_, c)| *c)
}

/// Material family used for the card back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MaterialKind {
    /// Plain card stock.
    Neutral,
    /// Rainbow foil (holographic, foil spray, interference).
    Holographic,
    /// Prism refraction.
    Prismatic,
    /// Mirror chrome.
    Chrome,
    /// Directional brushed metal.
    BrushedMetal,
    /// Gold plating.
    Gold,
    /// Faceted crystal.
    Crystal,
    /// Aged paper.
    Vintage,
}

impl MaterialKind {
    /// Material family for an effect id; unknown ids get [`MaterialKind::Neutral`].
    pub fn for_effect(effect_id: &str) -> Self {
        match effect_id {
            "holographic" | "foilspray" | "interference" => Self::Holographic,
            "prizm" => Self::Prismatic,
            "chrome" => Self::Chrome,
            "brushedmetal" => Self::BrushedMetal,
            "gold" => Self::Gold,
            "crystal" => Self::Crystal,
            "vintage" => Self::Vintage,
            _ => Self::Neutral,
        }
    }

    /// `(metalness, roughness, max_emissive)` of the family.
    const fn surface(self) -> (f64, f64, f64) {
        match self {
            Self::Neutral => (0.0, 0.9, 0.0),
            Self::Holographic => (0.6, 0.25, 0.35),
            Self::Prismatic => (0.4, 0.2, 0.3),
            Self::Chrome => (1.0, 0.05, 0.1),
            Self::BrushedMetal => (0.9, 0.45, 0.05),
            Self::Gold => (1.0, 0.2, 0.2),
            Self::Crystal => (0.1, 0.02, 0.25),
            Self::Vintage => (0.0, 0.8, 0.0),
        }
    }
}

/// Material parameters for the card back.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BackMaterial {
    /// Material family.
    pub kind: MaterialKind,
    /// Base color.
    pub color: EffectColor,
    /// PBR metalness, `[0, 1]`.
    pub metalness: f64,
    /// PBR roughness, `[0, 1]`.
    pub roughness: f64,
    /// Emissive strength, scaled by the dominant intensity.
    pub emissive: f64,
}

impl BackMaterial {
    /// Plain card stock.
    pub fn neutral() -> Self {
        let (metalness, roughness, _) = MaterialKind::Neutral.surface();
        Self {
            kind: MaterialKind::Neutral,
            color: DEFAULT_EFFECT_COLOR,
            metalness,
            roughness,
            emissive: 0.0,
        }
    }

    /// Material for a dominant effect.
    pub fn for_effect(dominant: &DominantEffect) -> Self {
        let kind = MaterialKind::for_effect(&dominant.effect_id);
        let (metalness, roughness, max_emissive) = kind.surface();
        Self {
            kind,
            color: effect_color(&dominant.effect_id),
            metalness,
            roughness,
            emissive: max_emissive * dominant.strength(),
        }
    }
}

impl Default for BackMaterial {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Selects the card-back material from the dominant effect.
pub fn select_back_material(dominant: Option<&DominantEffect>) -> BackMaterial {
    dominant.map_or_else(BackMaterial::neutral, BackMaterial::for_effect)
}

/// Peak opacity of the edge glow at full intensity.
pub const GLOW_MAX_OPACITY: f64 = 0.8;

/// Extra brightness added at full intensity.
pub const GLOW_MAX_BOOST: f64 = 0.5;

/// Edge glow tint and intensity-scaled multipliers for secondary layers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EdgeGlow {
    /// Glow tint.
    pub color: EffectColor,
    /// Layer opacity, `[0, GLOW_MAX_OPACITY]`.
    pub opacity: f64,
    /// Brightness multiplier, `[1, 1 + GLOW_MAX_BOOST]`.
    pub brightness: f64,
}

impl EdgeGlow {
    /// No glow.
    pub const fn off() -> Self {
        Self {
            color: DEFAULT_EFFECT_COLOR,
            opacity: 0.0,
            brightness: 1.0,
        }
    }

    /// Glow opacity for an edge, given that edge's geometric visibility.
    pub fn opacity_at(&self, edge_visibility: f64) -> f64 {
        self.opacity * edge_visibility.clamp(0.0, 1.0)
    }
}

impl Default for EdgeGlow {
    fn default() -> Self {
        Self::off()
    }
}

/// Derives the edge glow from the dominant effect.
pub fn edge_glow(dominant: Option<&DominantEffect>) -> EdgeGlow {
    match dominant {
        None => EdgeGlow::off(),
        Some(d) => {
            let s = d.strength();
            EdgeGlow {
                color: effect_color(&d.effect_id),
                opacity: GLOW_MAX_OPACITY * s,
                brightness: 1.0 + GLOW_MAX_BOOST * s,
            }
        }
    }
}
