//! Small value types shared by the layout phases.

use serde::{Deserialize, Serialize};

/// One edge of a panel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Top,
    Right,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Top, Side::Right, Side::Bottom];

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
        }
    }

    /// True for the sides whose coordinate shrinks when moving outward.
    pub fn is_leading(self) -> bool {
        matches!(self, Side::Left | Side::Top)
    }
}

/// Blank margins between adjacent panels, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Gutters {
    pub x: i32,
    pub y: i32,
}

impl Default for Gutters {
    fn default() -> Self {
        Self { x: 1, y: 1 }
    }
}

impl Gutters {
    pub fn along(&self, side: Side) -> i32 {
        match side {
            Side::Left | Side::Right => self.x,
            Side::Top | Side::Bottom => self.y,
        }
    }
}

impl From<[i32; 2]> for Gutters {
    fn from(v: [i32; 2]) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

impl From<Gutters> for [i32; 2] {
    fn from(g: Gutters) -> Self {
        [g.x, g.y]
    }
}
