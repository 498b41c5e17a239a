use crate::entity::ObstacleKey;
use common::shapes::Segment;
use common::Vec2;

/// Which side of its owner a wall segment bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallSide {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub owner: ObstacleKey,
    pub segment: Segment,
    pub side: WallSide,
}

impl Wall {
    pub fn new(owner: ObstacleKey, segment: Segment, side: WallSide) -> Self {
        Self {
            owner,
            segment,
            side,
        }
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.segment.distance_to_point(point)
    }
}
