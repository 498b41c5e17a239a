use crate::Vec2;
use nalgebra::{Isometry2, Point2, UnitComplex};

// Frame with its x-axis along `direction`, placed at `origin`.
// A zero direction gives atan2(0, 0) == 0, i.e. no rotation.
#[inline(always)]
fn local_frame(direction: Vec2, origin: Vec2) -> Isometry2<f32> {
    let heading = UnitComplex::new(direction.y.atan2(direction.x));
    Isometry2::from_parts(origin.into(), heading)
}

/// Expresses a world-space `point` in the frame whose x-axis points along
/// `direction` and whose origin is `origin`.
///
/// After the transform, `x` is the distance along `direction` and `y` the
/// signed lateral offset (positive to the left of the heading).
pub fn point_to_local_space(point: Vec2, direction: Vec2, origin: Vec2) -> Vec2 {
    local_frame(direction, origin)
        .inverse_transform_point(&Point2::from(point))
        .coords
}

/// Inverse of [`point_to_local_space`].
pub fn point_to_world_space(point: Vec2, direction: Vec2, origin: Vec2) -> Vec2 {
    local_frame(direction, origin)
        .transform_point(&Point2::from(point))
        .coords
}

/// Rotates a local-space vector back into world space (no translation).
pub fn vector_to_world_space(vector: Vec2, direction: Vec2) -> Vec2 {
    UnitComplex::new(direction.y.atan2(direction.x)) * vector
}

#[inline(always)]
fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Intersects segment `a-b` with segment `c-d`.
///
/// Returns the parameter along `a-b` (0 at `a`, 1 at `b`) and the point of
/// intersection. Parallel or colinear segments never intersect.
pub fn line_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<(f32, Vec2)> {
    let ab = b - a;
    let cd = d - c;
    let denominator = cross(ab, cd);
    let scale = ab.norm() * cd.norm();
    if denominator.abs() <= f32::EPSILON * scale {
        return None;
    }

    let ac = c - a;
    let r = cross(ac, cd) / denominator;
    let s = cross(ac, ab) / denominator;
    if (0.0..=1.0).contains(&r) && (0.0..=1.0).contains(&s) {
        Some((r, a + ab * r))
    } else {
        None
    }
}

/// Shortest distance from `point` to the finite segment `start-end`.
pub fn point_to_line_distance(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let segment = end - start;
    let length_sq = segment.norm_squared();
    if length_sq <= f32::EPSILON {
        return (point - start).norm();
    }
    let t = ((point - start).dot(&segment) / length_sq).clamp(0.0, 1.0);
    (point - (start + segment * t)).norm()
}
