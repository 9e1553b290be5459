use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::config::WorldConfig;
use crate::api::types::MapId;

/// World manifest: which maps exist, where their files live, and how the
/// world is configured. Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldManifest {
    /// Map id → map file path, relative to the manifest.
    pub maps: HashMap<MapId, String>,
    /// World settings. Omitted fields keep their defaults.
    #[serde(default)]
    pub config: WorldConfig,
}

impl WorldManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Relative path of a registered map.
    pub fn path_for(&self, map: &MapId) -> Option<&str> {
        self.maps.get(map).map(String::as_str)
    }

    /// Registered map ids, sorted.
    pub fn map_ids(&self) -> Vec<MapId> {
        let mut ids: Vec<MapId> = self.maps.keys().cloned().collect();
        ids.sort();
        ids
    }
}
