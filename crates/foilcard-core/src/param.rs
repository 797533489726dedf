//! Parameter values.
//!
//! Every effect parameter is addressed by string id and carries one of three
//! value shapes. [`ParamValue`] is the tagged union used everywhere a value
//! crosses a module boundary: the state store, preset files, and the render
//! frame handed to a paint back end.
//!
//! ```rust
//! use foilcard_core::ParamValue;
//!
//! let intensity = ParamValue::from(80.0);
//! let tone = ParamValue::from("rich");
//!
//! assert_eq!(intensity.as_f64(), Some(80.0));
//! assert_eq!(tone.as_str(), Some("rich"));
//! assert!(intensity.is_numeric());
//! ```

#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};

use core::fmt;

/// A single effect parameter value.
///
/// With the `serde` feature the value (de)serializes untagged, so preset
/// files can write `intensity = 80`, `animated = true` or `goldTone = "rich"`
/// without a type annotation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParamValue {
    /// Boolean toggle (`animated`, `colorEnhancement`).
    Boolean(bool),
    /// Numeric slider value.
    Numeric(f64),
    /// Enumerated option or color string (`"rich"`, `"#ffd700"`).
    Text(String),
}

impl ParamValue {
    /// Returns the numeric payload, if any.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean payload, if any.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the text payload, if any.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// True for [`ParamValue::Numeric`].
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }

    /// Short name of the value shape, used in diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Numeric(_) => "numeric",
            Self::Text(_) => "text",
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Numeric(v)
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        Self::Numeric(f64::from(v))
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Numeric(f64::from(v))
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Numeric(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
