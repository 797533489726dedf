//! Face and edge visibility for a rotated card.
//!
//! The preview rotates the card around two axes. These functions decide how
//! opaque the front face, back face, side edges and top/bottom walls should
//! be at a given orientation. They run on every pointer-move event, so all of
//! them are O(1), allocation-free and branch on a handful of constants.
//!
//! # Front Face
//!
//! ```text
//! opacity
//!  1.0 ┤━━━━━━━╮                               ╭━━━━━━━
//!      │        ╲                             ╱
//!  0.0 ┤         ╰━━━━━━━━━━━━━━━━━━━━━━━━━━━╯
//!      0°   60° 90°                     270° 300°   360°
//! ```
//!
//! # Edges
//!
//! A side edge peaks at 1.0 when it faces the viewer head-on and decays
//! linearly over ±45° to a floor of 0.1. The floor is never 0 so a glowing
//! edge fades rather than popping in.
//!
//! # Example
//!
//! ```rust
//! use foilcard_core::geometry::{EdgeSide, edge_opacity, front_opacity, normalize_angle};
//!
//! assert_eq!(normalize_angle(-90.0), 270.0);
//! assert_eq!(front_opacity(75.0), 0.5);
//! assert_eq!(edge_opacity(EdgeSide::Right, 90.0), 1.0);
//! assert_eq!(edge_opacity(EdgeSide::Right, 0.0), 0.1);
//! ```

use libm::fmod;

/// End of the fully-visible front band (and start of the fade-out).
pub const FRONT_FULL_END: f64 = 60.0;
/// Angle where the front face becomes fully hidden.
pub const FRONT_HIDDEN_START: f64 = 90.0;
/// Angle where the front face starts fading back in.
pub const FRONT_HIDDEN_END: f64 = 270.0;
/// Start of the fully-visible front band on the far side.
pub const FRONT_FULL_START: f64 = 300.0;

/// Half-width of an edge's visibility band, in degrees.
pub const EDGE_HALF_WIDTH: f64 = 45.0;
/// Minimum opacity of any edge or wall.
pub const EDGE_FLOOR: f64 = 0.1;

/// Rotation around the card's X (pitch) and Y (yaw) axes, in degrees.
///
/// Values are unbounded; every function normalizes internally.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rotation {
    /// Pitch in degrees.
    pub x: f64,
    /// Yaw in degrees.
    pub y: f64,
}

impl Rotation {
    /// Creates a rotation.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both axes wrapped into `[0, 360)`.
    pub fn normalized(self) -> Self {
        Self {
            x: normalize_angle(self.x),
            y: normalize_angle(self.y),
        }
    }
}

/// Left or right side edge, driven by the Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeSide {
    /// Left edge, faces the viewer at 270°.
    Left,
    /// Right edge, faces the viewer at 90°.
    Right,
}

impl EdgeSide {
    /// Angle at which this edge is fully visible.
    pub const fn peak(self) -> f64 {
        match self {
            Self::Left => 270.0,
            Self::Right => 90.0,
        }
    }
}

/// Top or bottom wall, driven by the X axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallSide {
    /// Top wall, faces the viewer at 0°.
    Top,
    /// Bottom wall, faces the viewer at 180°.
    Bottom,
}

impl WallSide {
    /// Angle at which this wall is fully visible.
    pub const fn peak(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Bottom => 180.0,
        }
    }
}

/// Which face the renderer should treat as the visible one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Face {
    /// Card art side.
    Front,
    /// Card back.
    Back,
}

/// Wraps any angle into `[0, 360)`.
///
/// Non-finite input maps to 0.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let r = fmod(angle, 360.0);
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-20 + 360 rounds to exactly 360
    if r >= 360.0 { 0.0 } else { r }
}

/// Front-face opacity for one axis, in `[0, 1]`.
#[inline]
pub fn front_opacity(angle: f64) -> f64 {
    let a = normalize_angle(angle);
    if a <= FRONT_FULL_END || a >= FRONT_FULL_START {
        1.0
    } else if a <= FRONT_HIDDEN_START {
        (FRONT_HIDDEN_START - a) / (FRONT_HIDDEN_START - FRONT_FULL_END)
    } else if a >= FRONT_HIDDEN_END {
        (a - FRONT_HIDDEN_END) / (FRONT_FULL_START - FRONT_HIDDEN_END)
    } else {
        0.0
    }
}

/// Two-axis front opacity: the product of both per-axis opacities.
///
/// The front only counts as visible when both axes agree, and a diagonal flip
/// fades faster than a single-axis one.
#[inline]
pub fn combined_front_opacity(rotation: Rotation) -> f64 {
    front_opacity(rotation.y) * front_opacity(rotation.x)
}

/// Back-face opacity, the complement of [`combined_front_opacity`].
#[inline]
pub fn back_opacity(rotation: Rotation) -> f64 {
    1.0 - combined_front_opacity(rotation)
}

/// Shortest angular distance between two normalized angles, in `[0, 180]`.
#[inline]
fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs();
    if d > 180.0 { 360.0 - d } else { d }
}

/// Shared peak/decay shape for edges and walls.
#[inline]
fn band_opacity(angle: f64, peak: f64) -> f64 {
    let d = angular_distance(normalize_angle(angle), peak);
    if d >= EDGE_HALF_WIDTH {
        EDGE_FLOOR
    } else {
        EDGE_FLOOR + (1.0 - EDGE_FLOOR) * (1.0 - d / EDGE_HALF_WIDTH)
    }
}

/// Side edge opacity from the Y rotation, in `[0.1, 1]`.
#[inline]
pub fn edge_opacity(side: EdgeSide, rotation_y: f64) -> f64 {
    band_opacity(rotation_y, side.peak())
}

/// Top/bottom wall opacity from the X rotation, in `[0.1, 1]`.
#[inline]
pub fn wall_opacity(side: WallSide, rotation_x: f64) -> f64 {
    band_opacity(rotation_x, side.peak())
}

/// Every visibility output for one orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaceVisibility {
    /// Input rotation, normalized.
    pub rotation: Rotation,
    /// Combined front opacity.
    pub front: f64,
    /// Back opacity.
    pub back: f64,
    /// Left edge opacity.
    pub left: f64,
    /// Right edge opacity.
    pub right: f64,
    /// Top wall opacity.
    pub top: f64,
    /// Bottom wall opacity.
    pub bottom: f64,
    /// Face to treat as visible. Ties (front = 0.5) go to the front.
    pub visible_face: Face,
}

impl FaceVisibility {
    /// Computes all outputs for a rotation.
    pub fn from_rotation(rotation: Rotation) -> Self {
        let front = combined_front_opacity(rotation);
        Self {
            rotation: rotation.normalized(),
            front,
            back: 1.0 - front,
            left: edge_opacity(EdgeSide::Left, rotation.y),
            right: edge_opacity(EdgeSide::Right, rotation.y),
            top: wall_opacity(WallSide::Top, rotation.x),
            bottom: wall_opacity(WallSide::Bottom, rotation.x),
            visible_face: if front >= 0.5 { Face::Front } else { Face::Back },
        }
    }

    /// Opacity of one side edge.
    pub fn edge(&self, side: EdgeSide) -> f64 {
        match side {
            EdgeSide::Left => self.left,
            EdgeSide::Right => self.right,
        }
    }

    /// Opacity of one wall.
    pub fn wall(&self, side: WallSide) -> f64 {
        match side {
            WallSide::Top => self.top,
            WallSide::Bottom => self.bottom,
        }
    }
}

impl Default for FaceVisibility {
    fn default() -> Self {
        Self::from_rotation(Rotation::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn normalize_wraps_both_directions() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(725.0), 5.0);
        assert_eq!(normalize_angle(-30.0), 330.0);
        assert_eq!(normalize_angle(-720.0), 0.0);
        assert_eq!(normalize_angle(f64::NAN), 0.0);
        assert_eq!(normalize_angle(f64::INFINITY), 0.0);
    }

    #[test]
    fn normalize_tiny_negative_stays_in_range() {
        let n = normalize_angle(-1e-20);
        assert!((0.0..360.0).contains(&n));
    }

    #[test]
    fn front_band_boundaries() {
        assert_eq!(front_opacity(0.0), 1.0);
        assert_eq!(front_opacity(60.0), 1.0);
        assert_eq!(front_opacity(75.0), 0.5);
        assert_eq!(front_opacity(90.0), 0.0);
        assert_eq!(front_opacity(180.0), 0.0);
        assert_eq!(front_opacity(270.0), 0.0);
        assert_eq!(front_opacity(285.0), 0.5);
        assert_eq!(front_opacity(300.0), 1.0);
        assert_eq!(front_opacity(359.9), 1.0);
    }

    #[test]
    fn front_fade_is_linear() {
        assert!(approx(front_opacity(66.0), 0.8));
        assert!(approx(front_opacity(84.0), 0.2));
        assert!(approx(front_opacity(276.0), 0.2));
        assert!(approx(front_opacity(294.0), 0.8));
    }

    #[test]
    fn front_handles_unbounded_angles() {
        assert_eq!(front_opacity(-60.0), 1.0);
        assert_eq!(front_opacity(435.0), 0.5);
        assert_eq!(front_opacity(-180.0), 0.0);
    }

    #[test]
    fn combined_is_product_not_min() {
        let r = Rotation::new(75.0, 75.0);
        assert!(approx(combined_front_opacity(r), 0.25));
        assert!(approx(back_opacity(r), 0.75));
        assert_eq!(combined_front_opacity(Rotation::new(0.0, 180.0)), 0.0);
    }

    #[test]
    fn right_edge_peak_and_floor() {
        assert_eq!(edge_opacity(EdgeSide::Right, 90.0), 1.0);
        assert_eq!(edge_opacity(EdgeSide::Right, 0.0), 0.1);
        assert_eq!(edge_opacity(EdgeSide::Right, 45.0), 0.1);
        assert_eq!(edge_opacity(EdgeSide::Right, 135.0), 0.1);
        assert_eq!(edge_opacity(EdgeSide::Right, 270.0), 0.1);
        assert!(approx(edge_opacity(EdgeSide::Right, 67.5), 0.55));
        assert!(approx(edge_opacity(EdgeSide::Right, 112.5), 0.55));
    }

    #[test]
    fn left_edge_mirrors_right() {
        for a in [0.0, 30.0, 60.0, 89.0, 90.0, 120.0, 170.0] {
            assert!(approx(
                edge_opacity(EdgeSide::Left, 360.0 - a),
                edge_opacity(EdgeSide::Right, a)
            ));
        }
        assert_eq!(edge_opacity(EdgeSide::Left, 270.0), 1.0);
        assert_eq!(edge_opacity(EdgeSide::Left, -90.0), 1.0);
    }

    #[test]
    fn walls_peak_on_x_axis() {
        assert_eq!(wall_opacity(WallSide::Top, 0.0), 1.0);
        assert_eq!(wall_opacity(WallSide::Top, 360.0), 1.0);
        assert!(approx(wall_opacity(WallSide::Top, 337.5), 0.55));
        assert_eq!(wall_opacity(WallSide::Top, 90.0), 0.1);
        assert_eq!(wall_opacity(WallSide::Bottom, 180.0), 1.0);
        assert_eq!(wall_opacity(WallSide::Bottom, 0.0), 0.1);
    }

    #[test]
    fn visibility_bundle() {
        let v = FaceVisibility::from_rotation(Rotation::new(-360.0, 450.0));
        assert_eq!(v.rotation, Rotation::new(0.0, 90.0));
        assert_eq!(v.front, 0.0);
        assert_eq!(v.back, 1.0);
        assert_eq!(v.right, 1.0);
        assert_eq!(v.left, 0.1);
        assert_eq!(v.top, 1.0);
        assert_eq!(v.visible_face, Face::Back);
    }

    #[test]
    fn visible_face_tie_goes_front() {
        let v = FaceVisibility::from_rotation(Rotation::new(0.0, 75.0));
        assert_eq!(v.front, 0.5);
        assert_eq!(v.visible_face, Face::Front);
    }

    #[test]
    fn default_faces_front() {
        let v = FaceVisibility::default();
        assert_eq!(v.visible_face, Face::Front);
        assert_eq!(v.edge(EdgeSide::Right), 0.1);
        assert_eq!(v.wall(WallSide::Top), 1.0);
    }
}
