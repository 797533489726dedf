//! CLI subcommands.

pub mod apply;
pub mod clamp;
pub mod common;
pub mod effects;
pub mod geometry;
pub mod presets;
