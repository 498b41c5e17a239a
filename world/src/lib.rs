pub mod config;
pub mod entity;
pub mod raycast;
pub mod wall;
pub mod world;

pub use config::WorldConfig;
pub use entity::{Body, ItemKey, MoverKey, ObstacleKey, RocketKey, Spatial};
pub use raycast::{closest_hit, RayHit};
pub use wall::{Wall, WallSide};
pub use world::World;
