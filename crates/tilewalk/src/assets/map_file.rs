use serde::{Deserialize, Serialize};

use crate::api::config::LayerNames;
use crate::api::types::{MapId, Rect};
use crate::components::map::{MapData, PortalRegion, SpawnPoint};
use crate::components::map_object::MapObject;

/// On-disk map: tile dimensions plus named object layers.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapFile {
    /// Width in tiles.
    #[serde(default)]
    pub width: u32,
    /// Height in tiles.
    #[serde(default)]
    pub height: u32,
    /// Tile edge in pixels (default: 16).
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    /// Object layers in file order.
    #[serde(default)]
    pub layers: Vec<LayerFile>,
}

/// A named object layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerFile {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<MapObject>,
}

fn default_tile_size() -> f32 {
    16.0
}

impl MapFile {
    /// Parse a map from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// First layer called `name`.
    pub fn layer(&self, name: &str) -> Option<&LayerFile> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Pick out the collision, spawn and portal layers. Objects that are not
    /// rectangles are dropped.
    pub fn to_map_data(&self, id: MapId, names: &LayerNames) -> MapData {
        let collision = self
            .layer(&names.collision)
            .map(|layer| rectangles(layer).map(|(_, rect)| rect).collect());
        let spawns = self.layer(&names.spawns).map(|layer| {
            rectangles(layer)
                .map(|(name, rect)| SpawnPoint::new(name, rect))
                .collect()
        });
        let portals = self.layer(&names.portals).map(|layer| {
            rectangles(layer)
                .map(|(name, rect)| PortalRegion::new(rect, name))
                .collect()
        });

        MapData {
            id,
            width: self.width,
            height: self.height,
            tile_size: self.tile_size,
            collision,
            spawns,
            portals,
        }
    }
}

fn rectangles(layer: &LayerFile) -> impl Iterator<Item = (&str, Rect)> + '_ {
    layer.objects.iter().filter_map(move |obj| match obj.as_rect() {
        Some(rect) => Some((obj.name(), rect)),
        None => {
            log::debug!("Skipping {} object '{}' on layer {}", obj.kind(), obj.name(), layer.name);
            None
        }
    })
}
