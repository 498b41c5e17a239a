use crate::entity::Spatial;
use common::geometry::{line_intersection, point_to_local_space, point_to_world_space};
use common::shapes::{Segment, Shape};
use common::Vec2;

/// Nearest entity struck by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<K> {
    pub key: K,
    pub point: Vec2,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
}

/// First contact between a ray and a circle, as (distance, point).
///
/// The circle centre is moved into the ray's local frame, where the ray is
/// the positive x-axis; the nearest positive root of the circle equation is
/// the hit. Rays starting inside the circle report the exit point.
pub fn ray_circle(from: Vec2, direction: Vec2, center: Vec2, radius: f32) -> Option<(f32, Vec2)> {
    let local = point_to_local_space(center, direction, from);
    if local.y.abs() >= radius {
        return None;
    }
    let half_chord = (radius * radius - local.y * local.y).sqrt();
    let distance = if local.x - half_chord > 0.0 {
        local.x - half_chord
    } else if local.x + half_chord > 0.0 {
        local.x + half_chord
    } else {
        return None;
    };
    Some((
        distance,
        point_to_world_space(Vec2::new(distance, 0.0), direction, from),
    ))
}

/// Nearest crossing of a ray, cut at `ray_length`, with any of `edges`.
/// `direction` must be unit length.
pub fn ray_edges(
    from: Vec2,
    direction: Vec2,
    ray_length: f32,
    edges: &[Segment],
) -> Option<(f32, Vec2)> {
    let to = from + direction * ray_length;
    edges
        .iter()
        .filter_map(|edge| line_intersection(from, to, edge.from, edge.to))
        .map(|(t, point)| (t * ray_length, point))
        .min_by(|a, b| a.0.total_cmp(&b.0))
}

/// Exact ray test against a shape placed at `position`.
/// `direction` must be unit length.
pub fn ray_shape(
    from: Vec2,
    direction: Vec2,
    ray_length: f32,
    position: Vec2,
    shape: &Shape,
) -> Option<(f32, Vec2)> {
    match shape {
        Shape::None => None,
        Shape::Circle { radius } => ray_circle(from, direction, position, *radius),
        Shape::Rectangle { .. } | Shape::Quad { .. } => {
            ray_edges(from, direction, ray_length, &shape.edges(position)?)
        }
    }
}

/// Nearest hit among `candidates`, testing every one of them.
///
/// This is the unrestricted narrow phase; the world's raycasts feed it only
/// the entities near the cells a ray crosses. Ties keep the earlier
/// candidate.
pub fn closest_hit<'a, K, T, I>(
    from: Vec2,
    direction: Vec2,
    ray_length: f32,
    candidates: I,
    ignore: Option<K>,
) -> Option<RayHit<K>>
where
    K: Copy + PartialEq,
    T: Spatial + 'a,
    I: IntoIterator<Item = (K, &'a T)>,
{
    let direction = direction.try_normalize(f32::MIN_POSITIVE)?;
    let mut best: Option<RayHit<K>> = None;
    for (key, entity) in candidates {
        if ignore == Some(key) {
            continue;
        }
        consider(&mut best, key, from, direction, ray_length, entity);
    }
    best
}

#[inline(always)]
pub(crate) fn consider<K, T>(
    best: &mut Option<RayHit<K>>,
    key: K,
    from: Vec2,
    direction: Vec2,
    ray_length: f32,
    entity: &T,
) where
    K: Copy,
    T: Spatial + ?Sized,
{
    let Some((distance, point)) =
        ray_shape(from, direction, ray_length, entity.position(), entity.shape())
    else {
        return;
    };
    if best.map_or(true, |hit| distance < hit.distance) {
        *best = Some(RayHit {
            key,
            point,
            distance,
        });
    }
}
