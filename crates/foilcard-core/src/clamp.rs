//! Soft/hard limit damping for runaway parameter values.
//!
//! Some parameter values are known to look broken past a point (a
//! holographic sheen above ~90% washes the card art out entirely). Rather than
//! stopping a slider at a hard wall, values above a rule's `soft` limit are
//! damped so the response keeps rising but decelerates, and never passes
//! `hard`.
//!
//! # Response Curve
//!
//! With `R = hard - soft` and `overage = value - soft`:
//!
//! ```text
//! value <= soft           → value
//! 0 < overage <= R        → soft + overage * max(0.1, 1 - (overage / R) * 0.5)
//! overage > R             → hard - (hard - knee) * exp(-(overage - R) / R)
//! knee = soft + R / 2
//! ```
//!
//! The quadratic section has slope 1 at `soft` (no visible kink) and slope 0
//! at the knee. The exponential tail starts at the knee and approaches `hard`
//! asymptotically, so the whole curve is continuous, strictly increasing and
//! bounded by `hard`.
//!
//! Far out the tail, `exp` underflows and the formula would land on `hard`
//! itself. Finite inputs are capped at the largest `f64` below `hard`; only
//! `+inf` maps to `hard`.
//!
//! # Example
//!
//! ```rust
//! use foilcard_core::{ParamValue, clamp_value};
//!
//! // Below the soft limit values pass through untouched.
//! assert_eq!(
//!     clamp_value("gold", "intensity", ParamValue::from(80.0)),
//!     ParamValue::from(80.0)
//! );
//!
//! // Above it they are damped but stay under the hard limit.
//! let damped = clamp_value("holographic", "intensity", ParamValue::from(100.0));
//! let v = damped.as_f64().unwrap();
//! assert!(v > 70.0 && v < 90.0);
//!
//! // Non-numeric values are never touched.
//! assert_eq!(
//!     clamp_value("gold", "goldTone", ParamValue::from("rich")),
//!     ParamValue::from("rich")
//! );
//! ```

use crate::param::ParamValue;
use core::fmt;
use libm::exp;

/// Lower bound on the damping factor inside the quadratic section.
pub const MIN_DAMPING: f64 = 0.1;

/// How much of the overage is shed by the time it reaches `hard - soft`.
pub const DAMPING_SLOPE: f64 = 0.5;

/// A soft/hard limit pair for one `(effect, parameter)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampRule {
    /// Effect id.
    pub effect_id: &'static str,
    /// Parameter id.
    pub parameter_id: &'static str,
    /// Value where damping begins.
    pub soft: f64,
    /// Absolute ceiling, never exceeded.
    pub hard: f64,
}

impl ClampRule {
    /// Creates a rule.
    pub const fn new(effect_id: &'static str, parameter_id: &'static str, soft: f64, hard: f64) -> Self {
        Self {
            effect_id,
            parameter_id,
            soft,
            hard,
        }
    }

    /// Applies this rule to a raw value.
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        soft_clamp(value, self.soft, self.hard)
    }

    /// True if this rule governs `(effect_id, parameter_id)`.
    #[inline]
    pub fn matches(&self, effect_id: &str, parameter_id: &str) -> bool {
        self.effect_id == effect_id && self.parameter_id == parameter_id
    }
}

/// Shipped clamp rules.
///
/// Limits sit above each effect's comfortable range; the gold `intensity`
/// soft limit in particular stays above 80 so rich-gold presets pass through
/// unchanged.
pub static CLAMP_RULES: &[ClampRule] = &[
    ClampRule::new("holographic", "intensity", 70.0, 90.0),
    ClampRule::new("holographic", "rainbowSpread", 80.0, 95.0),
    ClampRule::new("foilspray", "density", 80.0, 95.0),
    ClampRule::new("prizm", "intensity", 75.0, 90.0),
    ClampRule::new("prizm", "colorSeparation", 60.0, 85.0),
    ClampRule::new("interference", "intensity", 75.0, 90.0),
    ClampRule::new("chrome", "intensity", 85.0, 95.0),
    ClampRule::new("brushedmetal", "intensity", 85.0, 95.0),
    ClampRule::new("gold", "intensity", 85.0, 98.0),
    ClampRule::new("gold", "reflectivity", 85.0, 95.0),
    ClampRule::new("crystal", "intensity", 80.0, 95.0),
    ClampRule::new("crystal", "dispersion", 70.0, 90.0),
    ClampRule::new("crystal", "sparkle", 80.0, 95.0),
];

/// Damps `value` between `soft` and `hard`. See the module docs for the curve.
///
/// NaN passes through unchanged. `hard <= soft` is a configuration error
/// caught by [`validate_rules`]; here it degrades to a plain ceiling at
/// `hard`.
#[inline]
pub fn soft_clamp(value: f64, soft: f64, hard: f64) -> f64 {
    if value.is_nan() || value <= soft {
        return value;
    }
    let range = hard - soft;
    if range <= 0.0 {
        return value.min(hard);
    }

    let overage = value - soft;
    if overage <= range {
        let damping = 1.0 - (overage / range) * DAMPING_SLOPE;
        let candidate = soft + overage * damping.max(MIN_DAMPING);
        return candidate.min(hard);
    }

    if value == f64::INFINITY {
        return hard;
    }
    let knee = soft + range * (1.0 - DAMPING_SLOPE);
    let tail = hard - (hard - knee) * exp(-(overage - range) / range);
    tail.min(below(hard))
}

/// The largest `f64` strictly below a finite `x`.
#[inline]
fn below(x: f64) -> f64 {
    if x == 0.0 {
        -f64::from_bits(1)
    } else if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else {
        f64::from_bits(x.to_bits() + 1)
    }
}

/// Looks up the rule for `(effect_id, parameter_id)` in [`CLAMP_RULES`].
pub fn find_rule(effect_id: &str, parameter_id: &str) -> Option<&'static ClampRule> {
    CLAMP_RULES.iter().find(|r| r.matches(effect_id, parameter_id))
}

/// Clamps a raw numeric value against [`CLAMP_RULES`].
#[inline]
pub fn clamp_numeric(effect_id: &str, parameter_id: &str, value: f64) -> f64 {
    match find_rule(effect_id, parameter_id) {
        Some(rule) => rule.apply(value),
        None => value,
    }
}

/// Clamps a parameter value against [`CLAMP_RULES`].
///
/// Only numeric values are affected; booleans and text pass through.
pub fn clamp_value(effect_id: &str, parameter_id: &str, value: ParamValue) -> ParamValue {
    match value {
        ParamValue::Numeric(v) => {
            let clamped = clamp_numeric(effect_id, parameter_id, v);
            #[cfg(feature = "tracing")]
            if clamped != v {
                tracing::trace!("clamp: {effect_id}.{parameter_id} {v} -> {clamped}");
            }
            ParamValue::Numeric(clamped)
        }
        other => other,
    }
}

/// A malformed clamp table entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ClampRuleError {
    /// `hard` is not above `soft`.
    InvertedLimits {
        /// Effect id of the offending rule.
        effect_id: &'static str,
        /// Parameter id of the offending rule.
        parameter_id: &'static str,
        /// Soft limit.
        soft: f64,
        /// Hard limit.
        hard: f64,
    },
    /// A limit is NaN or infinite.
    NonFinite {
        /// Effect id of the offending rule.
        effect_id: &'static str,
        /// Parameter id of the offending rule.
        parameter_id: &'static str,
    },
    /// Two rules govern the same parameter.
    Duplicate {
        /// Effect id of the duplicated rule.
        effect_id: &'static str,
        /// Parameter id of the duplicated rule.
        parameter_id: &'static str,
    },
}

impl fmt::Display for ClampRuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedLimits {
                effect_id,
                parameter_id,
                soft,
                hard,
            } => write!(
                f,
                "clamp rule {effect_id}.{parameter_id}: hard limit {hard} must exceed soft limit {soft}"
            ),
            Self::NonFinite {
                effect_id,
                parameter_id,
            } => write!(f, "clamp rule {effect_id}.{parameter_id}: limits must be finite"),
            Self::Duplicate {
                effect_id,
                parameter_id,
            } => write!(f, "clamp rule {effect_id}.{parameter_id} is declared twice"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClampRuleError {}

/// Checks a rule table for configuration errors.
///
/// Run once at startup; [`CLAMP_RULES`] is checked by the test-suite.
pub fn validate_rules(rules: &[ClampRule]) -> Result<(), ClampRuleError> {
    for (i, rule) in rules.iter().enumerate() {
        if !rule.soft.is_finite() || !rule.hard.is_finite() {
            return Err(ClampRuleError::NonFinite {
                effect_id: rule.effect_id,
                parameter_id: rule.parameter_id,
            });
        }
        if rule.hard <= rule.soft {
            return Err(ClampRuleError::InvertedLimits {
                effect_id: rule.effect_id,
                parameter_id: rule.parameter_id,
                soft: rule.soft,
                hard: rule.hard,
            });
        }
        if rules[..i]
            .iter()
            .any(|r| r.matches(rule.effect_id, rule.parameter_id))
        {
            return Err(ClampRuleError::Duplicate {
                effect_id: rule.effect_id,
                parameter_id: rule.parameter_id,
            });
        }
    }
    Ok(())
}
