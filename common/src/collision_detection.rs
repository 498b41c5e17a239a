use crate::shapes::Shape;
use crate::Vec2;

pub fn circle_circle(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let distance_sq = (a - b).norm_squared();
    let collision_distance = a_radius + b_radius;
    distance_sq < collision_distance * collision_distance
}

// Rectangle is axis aligned and centred on `rect_center`. Overlap when the
// gap between the circle centre and the nearest point of the box is within
// the radius.
pub fn circle_rectangle(
    center: Vec2,
    radius: f32,
    rect_center: Vec2,
    width: f32,
    height: f32,
) -> bool {
    let half_extent = Vec2::new(width, height) * 0.5;
    let gap = ((center - rect_center).abs() - half_extent).sup(&Vec2::zeros());
    gap.norm_squared() <= radius * radius
}

/// Point-in-polygon by crossing count; works for concave quads too.
pub fn point_in_quad(point: Vec2, corners: &[Vec2; 4]) -> bool {
    let mut inside = false;
    let mut j = corners.len() - 1;
    for i in 0..corners.len() {
        let (a, b) = (corners[i], corners[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

pub fn circle_quad(center: Vec2, radius: f32, corners: &[Vec2; 4]) -> bool {
    if point_in_quad(center, corners) {
        return true;
    }
    (0..4).any(|i| {
        crate::geometry::point_to_line_distance(center, corners[i], corners[(i + 1) % 4]) < radius
    })
}

/// Exact overlap between a `shape` placed at `position` and a query circle.
pub fn shape_circle(shape: &Shape, position: Vec2, center: Vec2, radius: f32) -> bool {
    match shape {
        Shape::None => circle_circle(position, 0.0, center, radius),
        Shape::Circle { radius: shape_radius } => {
            circle_circle(position, *shape_radius, center, radius)
        }
        Shape::Rectangle { width, height } => {
            circle_rectangle(center, radius, position, *width, *height)
        }
        Shape::Quad { .. } => match shape.corners(position) {
            Some(corners) => circle_quad(center, radius, &corners),
            None => false,
        },
    }
}
