//! Parameter metadata for discoverable effect parameters.
//!
//! Each effect exposes an ordered list of [`ParamDescriptor`]s. A descriptor
//! carries everything a UI needs to build a control (kind, slider range,
//! step, options) and everything the state store needs to keep values
//! well-formed (the default and the kind check in [`ParamDescriptor::accepts`]).
//!
//! Descriptors are `const`-constructible so the registry can declare them in
//! static tables:
//!
//! ```rust
//! use foilcard_core::{ParamDescriptor, ParamKind, ParamValue};
//!
//! const INTENSITY: ParamDescriptor =
//!     ParamDescriptor::numeric("intensity", "Intensity", 0.0, 100.0, 0.0).with_step(1.0);
//! const TONE: ParamDescriptor =
//!     ParamDescriptor::choice("goldTone", "Gold Tone", &["rich", "rose", "white"], "rich");
//!
//! assert_eq!(INTENSITY.kind, ParamKind::Numeric);
//! assert!(TONE.accepts(&ParamValue::from("rose")));
//! assert!(!TONE.accepts(&ParamValue::from("green")));
//! ```

use crate::param::ParamValue;
use core::fmt;

/// Shape of a parameter's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Continuous slider.
    Numeric,
    /// On/off toggle.
    Boolean,
    /// One of a fixed list of string options.
    Enumerated,
    /// Hex color string (`#rrggbb`).
    Color,
}

impl ParamKind {
    /// Lowercase name for listings.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::Enumerated => "enumerated",
            Self::Color => "color",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Statically declared default value.
///
/// [`ParamValue`] owns a `String` and cannot live in a `const`; this is its
/// borrowed, const-friendly twin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamDefault {
    /// Numeric default.
    Numeric(f64),
    /// Boolean default.
    Boolean(bool),
    /// Option or color default.
    Text(&'static str),
}

impl ParamDefault {
    /// Materializes the default as an owned [`ParamValue`].
    pub fn to_value(self) -> ParamValue {
        match self {
            Self::Numeric(v) => ParamValue::Numeric(v),
            Self::Boolean(b) => ParamValue::Boolean(b),
            Self::Text(s) => ParamValue::from(s),
        }
    }
}

/// Describes a single effect parameter.
///
/// `min`/`max` bound the user-facing slider range of numeric parameters. They
/// are not the soft/hard limits of the clamp table in [`crate::clamp`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Stable string id used in presets and the state store (`"intensity"`).
    pub id: &'static str,

    /// Display name (`"Intensity"`).
    pub name: &'static str,

    /// Value shape.
    pub kind: ParamKind,

    /// Lower slider bound (numeric only).
    pub min: Option<f64>,

    /// Upper slider bound (numeric only).
    pub max: Option<f64>,

    /// Slider increment (numeric only).
    pub step: Option<f64>,

    /// Default value.
    pub default: ParamDefault,

    /// Allowed options (enumerated only, empty otherwise).
    pub options: &'static [&'static str],
}

impl ParamDescriptor {
    /// Numeric slider with a user-facing range.
    pub const fn numeric(
        id: &'static str,
        name: &'static str,
        min: f64,
        max: f64,
        default: f64,
    ) -> Self {
        Self {
            id,
            name,
            kind: ParamKind::Numeric,
            min: Some(min),
            max: Some(max),
            step: None,
            default: ParamDefault::Numeric(default),
            options: &[],
        }
    }

    /// 0–100 intensity slider with a step of 1 and the given default.
    pub const fn intensity(default: f64) -> Self {
        Self::numeric("intensity", "Intensity", 0.0, 100.0, default).with_step(1.0)
    }

    /// Boolean toggle.
    pub const fn toggle(id: &'static str, name: &'static str, default: bool) -> Self {
        Self {
            id,
            name,
            kind: ParamKind::Boolean,
            min: None,
            max: None,
            step: None,
            default: ParamDefault::Boolean(default),
            options: &[],
        }
    }

    /// Enumerated choice among `options`.
    pub const fn choice(
        id: &'static str,
        name: &'static str,
        options: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            kind: ParamKind::Enumerated,
            min: None,
            max: None,
            step: None,
            default: ParamDefault::Text(default),
            options,
        }
    }

    /// Hex color picker.
    pub const fn color(id: &'static str, name: &'static str, default: &'static str) -> Self {
        Self {
            id,
            name,
            kind: ParamKind::Color,
            min: None,
            max: None,
            step: None,
            default: ParamDefault::Text(default),
            options: &[],
        }
    }

    /// Sets the slider step.
    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Default as an owned value.
    pub fn default_value(&self) -> ParamValue {
        self.default.to_value()
    }

    /// Returns `true` if `value` has a shape this parameter can hold.
    ///
    /// Numeric values are accepted regardless of the slider range; range
    /// safety is the clamp's job. Enumerated parameters only accept listed
    /// options and color parameters only accept `#rgb`/`#rrggbb`/`#rrggbbaa`.
    pub fn accepts(&self, value: &ParamValue) -> bool {
        match (self.kind, value) {
            (ParamKind::Numeric, ParamValue::Numeric(v)) => !v.is_nan(),
            (ParamKind::Boolean, ParamValue::Boolean(_)) => true,
            (ParamKind::Enumerated, ParamValue::Text(s)) => self.options.contains(&s.as_str()),
            (ParamKind::Color, ParamValue::Text(s)) => is_hex_color(s),
            _ => false,
        }
    }
}

/// Checks for `#rgb`, `#rrggbb` or `#rrggbbaa`.
pub fn is_hex_color(s: &str) -> bool {
    let Some(hex) = s.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6 | 8) && hex.bytes().all(|b| b.is_ascii_hexdigit())
}
