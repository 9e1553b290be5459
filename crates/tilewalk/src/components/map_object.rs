//! Objects placed on a map's object layers.
//!
//! Map editors let designers drop several shapes on an object layer. The
//! world only reasons about rectangles, so the shape is decided here, once,
//! at the loading boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::Rect;

/// A single object on an object layer, tagged by shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapObject {
    Rectangle {
        #[serde(default)]
        name: String,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Ellipse {
        #[serde(default)]
        name: String,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Point {
        #[serde(default)]
        name: String,
        x: f32,
        y: f32,
    },
    Polyline {
        #[serde(default)]
        name: String,
        points: Vec<Vec2>,
    },
}

impl MapObject {
    pub fn name(&self) -> &str {
        match self {
            MapObject::Rectangle { name, .. }
            | MapObject::Ellipse { name, .. }
            | MapObject::Point { name, .. }
            | MapObject::Polyline { name, .. } => name,
        }
    }

    /// The rectangle, if this object is one.
    pub fn as_rect(&self) -> Option<Rect> {
        match *self {
            MapObject::Rectangle { x, y, width, height, .. } => {
                Some(Rect::new(x, y, width, height))
            }
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MapObject::Rectangle { .. } => "rectangle",
            MapObject::Ellipse { .. } => "ellipse",
            MapObject::Point { .. } => "point",
            MapObject::Polyline { .. } => "polyline",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_objects() {
        let json = r#"[
            { "type": "rectangle", "name": "PLAYER_START",
              "x": 5, "y": 5, "width": 16, "height": 16 },
            { "type": "point", "x": 1, "y": 2 },
            { "type": "polyline", "name": "river", "points": [[0, 0], [10, 4]] }
        ]"#;
        let objects: Vec<MapObject> = serde_json::from_str(json).unwrap();
        assert_eq!(objects.len(), 3);
        assert_eq!(objects[0].name(), "PLAYER_START");
        assert_eq!(objects[0].as_rect(), Some(Rect::new(5.0, 5.0, 16.0, 16.0)));
        assert_eq!(objects[1].name(), "");
        assert!(objects[1].as_rect().is_none());
        assert_eq!(objects[2].kind(), "polyline");
    }

    #[test]
    fn ellipse_is_not_a_rectangle() {
        let obj = MapObject::Ellipse {
            name: String::new(),
            x: 0.0,
            y: 0.0,
            width: 4.0,
            height: 4.0,
        };
        assert!(obj.as_rect().is_none());
    }
}
