use common::shapes::Shape;
use common::Vec2;

slotmap::new_key_type! {
    /// Handle of a moving agent.
    pub struct MoverKey;
    /// Handle of a static obstacle (also owns walls).
    pub struct ObstacleKey;
    pub struct RocketKey;
    pub struct ItemKey;
}

/// What the world needs to know about an entity it indexes.
pub trait Spatial {
    fn position(&self) -> Vec2;
    fn shape(&self) -> &Shape;
}

impl<T: Spatial + ?Sized> Spatial for &T {
    fn position(&self) -> Vec2 {
        (**self).position()
    }

    fn shape(&self) -> &Shape {
        (**self).shape()
    }
}

/// A shape at a position; the simplest [`Spatial`] entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub shape: Shape,
}

impl Body {
    pub fn new(position: Vec2, shape: Shape) -> Self {
        Self { position, shape }
    }

    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        Self::new(Vec2::new(x, y), Shape::circle(radius))
    }

    pub fn rectangle(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(x, y), Shape::rectangle(width, height))
    }
}

impl Spatial for Body {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn shape(&self) -> &Shape {
        &self.shape
    }
}
