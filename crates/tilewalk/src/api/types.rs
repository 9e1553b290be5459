use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Sample map ids shipped with the demo world.
pub const TOP_WORLD: &str = "TOP_WORLD";
pub const TOWN: &str = "TOWN";
pub const CASTLE_OF_DOOM: &str = "CASTLE_OF_DOOM";

/// Identifier of a map. Any string key is valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapId(String);

impl MapId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MapId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for MapId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Axis-aligned rectangle in pixel space. `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle with its corner at `pos`.
    pub fn at(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Bottom-left corner.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Whether the two rectangles share interior area.
    /// Rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Inclusive of the bottom-left edges, exclusive of the top-right ones.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

/// Facing / walking direction of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Right,
    #[default]
    Down,
    Left,
}

impl Direction {
    /// Unit step in tile space. Up is +y.
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::Y,
            Direction::Right => Vec2::X,
            Direction::Down => Vec2::NEG_Y,
            Direction::Left => Vec2::NEG_X,
        }
    }
}

/// Result of a portal check for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// No portal under the player (or the map has no portal layer).
    NoTransition,
    /// The player entered a portal and is now on the destination map.
    Transition(MapId),
    /// The player stands on a portal that names no destination.
    InvalidPortal,
}
