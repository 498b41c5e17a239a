pub mod collision_detection;
pub mod geometry;
pub mod shapes;

/// World-space vector type shared by every crate in the workspace.
pub type Vec2 = nalgebra::Vector2<f32>;
