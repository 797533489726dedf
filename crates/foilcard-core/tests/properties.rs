//! Property-based tests for foilcard-core.
//!
//! Tests clamp monotonicity and bounds, and the output ranges of the face
//! visibility geometry, using proptest for randomized input generation.

use foilcard_core::geometry::{
    EdgeSide, WallSide, back_opacity, combined_front_opacity, edge_opacity, front_opacity,
    normalize_angle, wall_opacity,
};
use foilcard_core::{CLAMP_RULES, Rotation, soft_clamp};
use proptest::prelude::*;

/// A (soft, hard) pair with hard strictly above soft.
fn limits() -> impl Strategy<Value = (f64, f64)> {
    (-100.0f64..100.0, 0.5f64..50.0).prop_map(|(soft, width)| (soft, soft + width))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Values at or below the soft limit pass through untouched.
    #[test]
    fn clamp_identity_below_soft((soft, hard) in limits(), below in 0.0f64..1000.0) {
        let v = soft - below;
        prop_assert_eq!(soft_clamp(v, soft, hard), v);
    }

    /// Above the soft limit the output never decreases and never exceeds hard.
    #[test]
    fn clamp_monotone_and_bounded(
        (soft, hard) in limits(),
        a in 0.0f64..500.0,
        b in 0.0f64..500.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let out_lo = soft_clamp(soft + lo, soft, hard);
        let out_hi = soft_clamp(soft + hi, soft, hard);
        prop_assert!(out_lo <= out_hi + 1e-9, "clamp({}) = {} > clamp({}) = {}", soft + lo, out_lo, soft + hi, out_hi);
        prop_assert!(out_hi <= hard);
        prop_assert!(out_lo >= soft);
    }

    /// No finite input reaches hard, however far past the limit it is.
    #[test]
    fn clamp_stays_below_hard_for_unbounded_overage(
        (soft, hard) in limits(),
        overage in 0.0f64..1.0e300,
    ) {
        let out = soft_clamp(soft + overage, soft, hard);
        prop_assert!(out < hard, "clamp({}) = {} reached {}", soft + overage, out, hard);
        prop_assert!(out >= soft);
    }

    /// Clearly separated inputs map to strictly increasing outputs.
    #[test]
    fn clamp_strictly_increasing_for_separated_inputs(
        rule_idx in 0usize..CLAMP_RULES.len(),
        overage in 0.0f64..40.0,
    ) {
        let rule = &CLAMP_RULES[rule_idx];
        let v1 = rule.soft + overage;
        let v2 = v1 + 1.0;
        prop_assert!(rule.apply(v1) < rule.apply(v2));
        prop_assert!(rule.apply(v2) < rule.hard);
    }

    /// Normalized angles always land in [0, 360).
    #[test]
    fn normalize_in_range(angle in -1.0e6f64..1.0e6) {
        let n = normalize_angle(angle);
        prop_assert!((0.0..360.0).contains(&n), "normalize({}) = {}", angle, n);
    }

    /// Angles a full turn apart produce the same front opacity.
    #[test]
    fn front_opacity_periodic(angle in -720.0f64..720.0, turns in -3i32..3) {
        let shifted = angle + 360.0 * f64::from(turns);
        prop_assert!((front_opacity(angle) - front_opacity(shifted)).abs() < 1e-9);
    }

    /// Face opacities stay in [0, 1] and front + back == 1.
    #[test]
    fn face_opacities_in_unit_range(x in -1000.0f64..1000.0, y in -1000.0f64..1000.0) {
        let r = Rotation::new(x, y);
        let front = combined_front_opacity(r);
        let back = back_opacity(r);
        prop_assert!((0.0..=1.0).contains(&front));
        prop_assert!((0.0..=1.0).contains(&back));
        prop_assert!((front + back - 1.0).abs() < 1e-12);
        prop_assert!(front <= front_opacity(x).min(front_opacity(y)) + 1e-12);
    }

    /// Edges and walls never drop below the 0.1 floor or exceed 1.
    #[test]
    fn edges_respect_floor(angle in -1000.0f64..1000.0) {
        for side in [EdgeSide::Left, EdgeSide::Right] {
            let o = edge_opacity(side, angle);
            prop_assert!((0.1..=1.0).contains(&o));
        }
        for side in [WallSide::Top, WallSide::Bottom] {
            let o = wall_opacity(side, angle);
            prop_assert!((0.1..=1.0).contains(&o));
        }
    }
}
