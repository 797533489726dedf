//! Foilcard Core - effect-state primitives for layered card effects
//!
//! This crate holds the pure building blocks of the foilcard effect engine.
//! Nothing in here owns state or schedules work; the stateful store lives in
//! `foilcard-engine`.
//!
//! # Core Abstractions
//!
//! ## Values
//!
//! - [`ParamValue`] - Tagged union for numeric, boolean and text parameters
//! - [`ParamMap`] / [`EffectValues`] - Insertion-ordered effect → parameter → value maps
//! - [`ParamDescriptor`] - Const-constructible parameter metadata (kind, range, default)
//!
//! ## Soft Clamping
//!
//! - [`clamp_value`] / [`soft_clamp`] - Decelerating damping between a soft and hard limit
//! - [`CLAMP_RULES`] - Shipped soft/hard limit table, checked by [`validate_rules`]
//!
//! ## Derived Rendering Decisions
//!
//! - [`select_dominant`] - Highest-intensity active effect, deterministic ties
//! - [`BackMaterial`] / [`EdgeGlow`] - Card-back material and edge tint from the dominant effect
//!
//! ## Geometry
//!
//! - [`FaceVisibility`] - Front/back face and edge/wall opacities for a two-axis rotation
//! - [`geometry`] - The individual per-axis functions
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc`). Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! foilcard-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use foilcard_core::{EffectValues, FaceVisibility, ParamValue, Rotation, clamp_value, select_dominant};
//!
//! let values = EffectValues::new()
//!     .with_param("gold", "intensity", clamp_value("gold", "intensity", ParamValue::from(80.0)))
//!     .with_param("chrome", "intensity", 35.0);
//!
//! let dominant = select_dominant(&values).unwrap();
//! assert_eq!(dominant.effect_id, "gold");
//!
//! let vis = FaceVisibility::from_rotation(Rotation::new(0.0, 75.0));
//! assert_eq!(vis.front, 0.5);
//! ```
//!
//! # Design Principles
//!
//! - **Pure**: every function here is deterministic and side-effect free
//! - **Frame-cheap**: geometry is O(1) and allocation-free
//! - **Typed values**: no untyped property bags; mismatched kinds are detectable

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod clamp;
pub mod dominant;
pub mod geometry;
pub mod param;
pub mod param_info;
pub mod values;

pub use clamp::{
    CLAMP_RULES, ClampRule, ClampRuleError, clamp_numeric, clamp_value, find_rule, soft_clamp,
    validate_rules,
};
pub use dominant::{
    ACTIVE_THRESHOLD, BackMaterial, DEFAULT_EFFECT_COLOR, DominantEffect, EdgeGlow, EffectColor,
    INTENSITY_PARAM, MaterialKind, active_effects, edge_glow, effect_color, select_back_material,
    select_dominant,
};
pub use geometry::{EdgeSide, Face, FaceVisibility, Rotation, WallSide};
pub use param::ParamValue;
pub use param_info::{ParamDefault, ParamDescriptor, ParamKind, is_hex_color};
pub use values::{EffectValues, ParamMap};
