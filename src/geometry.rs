//! Toroidal field math and small geometric helpers.

use bevy::prelude::*;

/// Wrap a single coordinate into `[0, extent)`.
///
/// `rem_euclid` can return `extent` itself when `value` is a tiny negative
/// number (the sum rounds up), so that case is folded back to zero.
#[inline]
pub fn wrap_coord(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

/// Wrap a position onto the `width × height` torus.
#[inline]
pub fn wrap_position(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_coord(pos.x, width), wrap_coord(pos.y, height))
}

/// Unit vector for a heading in radians.
#[inline]
pub fn heading_vec(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Distance from `point` to the segment `a → b`.
///
/// Projects onto the segment and clamps the parameter to `[0, 1]`; a
/// degenerate segment falls back to point distance.
pub fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_handles_large_and_negative_inputs() {
        let cases = [
            (0.0, 0.0),
            (799.9, 799.9),
            (800.0, 0.0),
            (805.0, 5.0),
            (-5.0, 795.0),
            (-1600.5, 799.5),
            (12_345.0, 345.0),
        ];
        for (input, expected) in cases {
            let got = wrap_coord(input, 800.0);
            assert!(
                (got - expected).abs() < 1e-3,
                "wrap({input}) = {got}, expected {expected}"
            );
        }
    }

    #[test]
    fn wrap_result_is_always_in_half_open_range() {
        for i in -2000..2000 {
            let v = i as f32 * 0.731 - 1e-7;
            let w = wrap_coord(v, 600.0);
            assert!((0.0..600.0).contains(&w), "wrap({v}) = {w}");
        }
        let w = wrap_coord(-f32::EPSILON, 600.0);
        assert!((0.0..600.0).contains(&w));
    }

    #[test]
    fn segment_distance_projects_and_clamps() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 0.0);
        assert!((distance_to_segment(Vec2::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-5);
        // Behind the origin: distance to `a`.
        assert!((distance_to_segment(Vec2::new(-3.0, 4.0), a, b) - 5.0).abs() < 1e-5);
        // Past the end: distance to `b`.
        assert!((distance_to_segment(Vec2::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_segment_is_point_distance() {
        let p = Vec2::new(3.0, 4.0);
        assert!((distance_to_segment(p, Vec2::ZERO, Vec2::ZERO) - 5.0).abs() < 1e-5);
    }
}
