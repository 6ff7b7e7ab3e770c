use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A discrete movement command produced by a held or pressed key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Forward,
    Backward,
    Up,
    Down,
}

impl Direction {
    /// Every direction, in declaration order.
    pub const ALL: [Direction; 6] = [
        Direction::Left,
        Direction::Right,
        Direction::Forward,
        Direction::Backward,
        Direction::Up,
        Direction::Down,
    ];

    /// The direction that undoes this one.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Unit step for this direction given the camera's current basis.
    ///
    /// `front` and `right` must already be normalized.
    pub fn step(self, front: Vec3, right: Vec3, up: Vec3) -> Vec3 {
        match self {
            Direction::Forward => front,
            Direction::Backward => -front,
            Direction::Right => right,
            Direction::Left => -right,
            Direction::Up => up,
            Direction::Down => -up,
        }
    }
}
