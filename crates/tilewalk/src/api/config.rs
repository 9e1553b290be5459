use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::WorldError;
use crate::api::types::{MapId, TOWN};

/// Names of the object layers the world reads from each map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerNames {
    pub collision: String,
    pub spawns: String,
    pub portals: String,
}

impl Default for LayerNames {
    fn default() -> Self {
        Self {
            collision: "MAP_COLLISION_LAYER".to_owned(),
            spawns: "MAP_SPAWNS_LAYER".to_owned(),
            portals: "MAP_PORTAL_LAYER".to_owned(),
        }
    }
}

/// World configuration. Every field has a default, so a manifest only
/// needs to spell out what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Tiles per pixel (default: 1/16). Pixels = tiles / unit_scale.
    pub unit_scale: f32,
    /// Map loaded when the world opens (default: TOWN).
    pub initial_map: MapId,
    /// Object name marking a player spawn on the spawn layer.
    /// Matched case-insensitively.
    pub spawn_marker_name: String,
    pub layers: LayerNames,
    /// Sprite frame width in pixels (default: 16).
    pub frame_width: f32,
    /// Sprite frame height in pixels (default: 16).
    pub frame_height: f32,
    /// Walking speed in tiles per second, per axis.
    pub velocity: Vec2,
    /// Fraction of the frame trimmed from the hitbox, (width, height).
    /// Default keeps the full width and the lower half of the sprite.
    pub hitbox_reduction: Vec2,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            unit_scale: 1.0 / 16.0,
            initial_map: MapId::from(TOWN),
            spawn_marker_name: "PLAYER_START".to_owned(),
            layers: LayerNames::default(),
            frame_width: 16.0,
            frame_height: 16.0,
            velocity: Vec2::new(2.0, 2.0),
            hitbox_reduction: Vec2::new(0.0, 0.5),
        }
    }
}

impl WorldConfig {
    /// Reject settings the world cannot run with.
    pub fn validate(&self) -> Result<(), WorldError> {
        if !(self.unit_scale.is_finite() && self.unit_scale > 0.0) {
            return Err(WorldError::InvalidScale(self.unit_scale));
        }
        Ok(())
    }

    /// Convert a pixel-space position to tiles.
    pub fn pixels_to_tiles(&self, pixels: Vec2) -> Vec2 {
        pixels * self.unit_scale
    }
}
