use crate::geometry::point_to_line_distance;
use crate::Vec2;

/// A straight boundary piece between two world-space points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
}

impl Segment {
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f32 {
        (self.to - self.from).norm()
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.from + self.to) * 0.5
    }

    /// Unit normal pointing to the left of `from -> to`.
    pub fn normal(&self) -> Vec2 {
        let direction = self.to - self.from;
        let normal = Vec2::new(-direction.y, direction.x);
        normal.try_normalize(f32::EPSILON).unwrap_or_else(Vec2::zeros)
    }

    pub fn distance_to_point(&self, point: Vec2) -> f32 {
        point_to_line_distance(point, self.from, self.to)
    }
}

/// Collision footprint of an entity, relative to the entity position.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Shape {
    /// A bare point; rays never hit it.
    #[default]
    None,
    Circle { radius: f32 },
    /// Axis-aligned, centred on the entity position.
    Rectangle { width: f32, height: f32 },
    /// Corner offsets from the entity position, in winding order.
    Quad { corners: [Vec2; 4] },
}

impl Shape {
    pub fn circle(radius: f32) -> Self {
        Shape::Circle { radius }
    }

    pub fn rectangle(width: f32, height: f32) -> Self {
        Shape::Rectangle { width, height }
    }

    pub fn quad(corners: [Vec2; 4]) -> Self {
        Shape::Quad { corners }
    }

    /// Radius of the smallest circle around the entity position that
    /// contains the whole shape.
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Shape::None => 0.0,
            Shape::Circle { radius } => (*radius).max(0.0),
            Shape::Rectangle { width, height } => (width * width + height * height).sqrt() * 0.5,
            Shape::Quad { corners } => corners
                .iter()
                .map(|corner| corner.norm())
                .fold(0.0, f32::max),
        }
    }

    /// World-space corners for polygonal shapes placed at `position`.
    pub fn corners(&self, position: Vec2) -> Option<[Vec2; 4]> {
        match self {
            Shape::None | Shape::Circle { .. } => None,
            Shape::Rectangle { width, height } => {
                let half_w = width * 0.5;
                let half_h = height * 0.5;
                Some([
                    position + Vec2::new(-half_w, -half_h),
                    position + Vec2::new(half_w, -half_h),
                    position + Vec2::new(half_w, half_h),
                    position + Vec2::new(-half_w, half_h),
                ])
            }
            Shape::Quad { corners } => Some(corners.map(|corner| position + corner)),
        }
    }

    /// Boundary edges of polygonal shapes placed at `position`.
    pub fn edges(&self, position: Vec2) -> Option<[Segment; 4]> {
        let corners = self.corners(position)?;
        Some(std::array::from_fn(|i| {
            Segment::new(corners[i], corners[(i + 1) % 4])
        }))
    }
}
