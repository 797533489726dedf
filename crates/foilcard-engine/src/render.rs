//! The boundary between the engine and whatever paints the card.
//!
//! A renderer never reads the store directly. It receives a [`RenderFrame`]
//! with the values and every decision derived from them, so paint code only
//! maps numbers to draw calls.

use foilcard_core::{
    BackMaterial, DominantEffect, EdgeGlow, EffectValues, FaceVisibility, edge_glow,
    select_back_material, select_dominant,
};
use serde::Serialize;

use crate::store::TransitionPhase;

/// Pointer position over the card, normalized to \[0, 1\] on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pointer {
    /// 0 at the left edge, 1 at the right.
    pub x: f64,
    /// 0 at the top edge, 1 at the bottom.
    pub y: f64,
}

impl Pointer {
    /// Card centre.
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    /// Pointer clamped onto the card. NaN maps to the centre line.
    pub fn new(x: f64, y: f64) -> Self {
        let fit = |v: f64| if v.is_nan() { 0.5 } else { v.clamp(0.0, 1.0) };
        Self { x: fit(x), y: fit(y) }
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct RenderFrame<'a> {
    /// Store revision the frame was built from.
    pub revision: u64,
    /// Transition phase at build time.
    pub phase: TransitionPhase,
    /// Full effect values.
    pub values: &'a EffectValues,
    /// Strongest active effect, if any.
    pub dominant: Option<DominantEffect>,
    /// Card-back material.
    pub back_material: BackMaterial,
    /// Edge tint.
    pub edge_glow: EdgeGlow,
    /// Face, edge and wall opacities for the current rotation.
    pub faces: FaceVisibility,
    /// Pointer position.
    pub pointer: Pointer,
}

impl<'a> RenderFrame<'a> {
    /// Derive a frame from values, geometry and pointer.
    pub fn build(
        revision: u64,
        phase: TransitionPhase,
        values: &'a EffectValues,
        faces: FaceVisibility,
        pointer: Pointer,
    ) -> Self {
        let dominant = select_dominant(values);
        Self {
            revision,
            phase,
            values,
            back_material: select_back_material(dominant.as_ref()),
            edge_glow: edge_glow(dominant.as_ref()),
            dominant,
            faces,
            pointer,
        }
    }

    /// Glow opacity on the right edge, the edge a right-hand tilt exposes.
    pub fn right_edge_glow(&self) -> f64 {
        self.edge_glow.opacity_at(self.faces.right)
    }
}

/// Consumer of render frames.
pub trait RenderAdapter {
    /// Paint one frame.
    fn render(&mut self, frame: &RenderFrame<'_>);
}

impl<F: FnMut(&RenderFrame<'_>)> RenderAdapter for F {
    fn render(&mut self, frame: &RenderFrame<'_>) {
        self(frame);
    }
}

/// Adapter that only logs each frame at `trace` level.
#[derive(Debug, Default)]
pub struct TracingAdapter {
    frames: u64,
}

impl TracingAdapter {
    /// New adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames seen so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderAdapter for TracingAdapter {
    fn render(&mut self, frame: &RenderFrame<'_>) {
        self.frames += 1;
        tracing::trace!(
            revision = frame.revision,
            phase = frame.phase.name(),
            dominant = frame.dominant.as_ref().map_or("none", |d| d.effect_id.as_str()),
            front = frame.faces.front,
            "render frame"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foilcard_core::{MaterialKind, Rotation};

    #[test]
    fn pointer_is_clamped() {
        assert_eq!(Pointer::new(-1.0, 2.0), Pointer { x: 0.0, y: 1.0 });
        assert_eq!(Pointer::new(f64::NAN, 0.25), Pointer { x: 0.5, y: 0.25 });
    }

    #[test]
    fn frame_derives_from_values() {
        let values = EffectValues::new()
            .with_param("gold", "intensity", 80.0)
            .with_param("chrome", "intensity", 30.0);
        let faces = FaceVisibility::from_rotation(Rotation::new(0.0, 90.0));
        let frame = RenderFrame::build(3, TransitionPhase::Idle, &values, faces, Pointer::CENTER);

        assert_eq!(frame.dominant.as_ref().unwrap().effect_id, "gold");
        assert_eq!(frame.back_material.kind, MaterialKind::for_effect("gold"));
        assert!(frame.right_edge_glow() > 0.0);
    }

    #[test]
    fn frame_without_active_effects_is_neutral() {
        let values = EffectValues::new().with_param("gold", "intensity", 10.0);
        let frame = RenderFrame::build(
            0,
            TransitionPhase::Idle,
            &values,
            FaceVisibility::default(),
            Pointer::default(),
        );
        assert!(frame.dominant.is_none());
        assert_eq!(frame.back_material, BackMaterial::neutral());
        assert_eq!(frame.edge_glow, EdgeGlow::off());
    }

    #[test]
    fn closures_are_adapters() {
        let values = EffectValues::new();
        let frame = RenderFrame::build(
            7,
            TransitionPhase::Idle,
            &values,
            FaceVisibility::default(),
            Pointer::default(),
        );
        let mut seen = Vec::new();
        let mut adapter = |f: &RenderFrame<'_>| seen.push(f.revision);
        adapter.render(&frame);
        assert_eq!(seen, vec![7]);

        let mut tracing_adapter = TracingAdapter::new();
        tracing_adapter.render(&frame);
        assert_eq!(tracing_adapter.frames(), 1);
    }
}
