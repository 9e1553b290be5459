//! Where map data comes from.
//!
//! The world asks a [`MapSource`] for a map by id whenever it switches maps.
//! Asset caching and lifetimes are the source's business.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::config::WorldConfig;
use crate::api::error::WorldError;
use crate::api::types::MapId;
use crate::assets::manifest::WorldManifest;
use crate::assets::map_file::MapFile;
use crate::components::map::MapData;

/// Loads map data by id.
pub trait MapSource {
    /// Load `map`. Unregistered ids fail with [`WorldError::UnknownMap`].
    fn load(&mut self, map: &MapId) -> Result<MapData, WorldError>;

    /// Every id this source can load.
    fn map_ids(&self) -> Vec<MapId>;
}

/// Maps held in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMapSource {
    maps: HashMap<MapId, MapData>,
}

impl InMemoryMapSource {
    pub fn new() -> Self {
        Self { maps: HashMap::new() }
    }

    /// Register a map under its own id, replacing any previous one.
    pub fn insert(&mut self, map: MapData) {
        self.maps.insert(map.id.clone(), map);
    }

    pub fn with_map(mut self, map: MapData) -> Self {
        self.insert(map);
        self
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

impl MapSource for InMemoryMapSource {
    fn load(&mut self, map: &MapId) -> Result<MapData, WorldError> {
        self.maps
            .get(map)
            .cloned()
            .ok_or_else(|| WorldError::UnknownMap(map.clone()))
    }

    fn map_ids(&self) -> Vec<MapId> {
        let mut ids: Vec<MapId> = self.maps.keys().cloned().collect();
        ids.sort();
        ids
    }
}

/// Maps listed in a [`WorldManifest`], read from JSON files next to it.
#[derive(Debug, Clone)]
pub struct ManifestMapSource {
    root: PathBuf,
    manifest: WorldManifest,
}

impl ManifestMapSource {
    /// Read and parse the manifest at `path`. Map paths resolve against the
    /// manifest's directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WorldError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| WorldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = WorldManifest::from_json(&json).map_err(WorldError::Manifest)?;
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        log::info!("Loaded world manifest {} ({} maps)", path.display(), manifest.maps.len());
        Ok(Self::from_manifest(root, manifest))
    }

    pub fn from_manifest(root: impl Into<PathBuf>, manifest: WorldManifest) -> Self {
        Self { root: root.into(), manifest }
    }

    /// World settings carried by the manifest.
    pub fn config(&self) -> &WorldConfig {
        &self.manifest.config
    }

    pub fn manifest(&self) -> &WorldManifest {
        &self.manifest
    }
}

impl MapSource for ManifestMapSource {
    fn load(&mut self, map: &MapId) -> Result<MapData, WorldError> {
        let rel = self
            .manifest
            .path_for(map)
            .ok_or_else(|| WorldError::UnknownMap(map.clone()))?;
        let full = self.root.join(rel);
        let json = fs::read_to_string(&full).map_err(|e| WorldError::MapLoad {
            map: map.clone(),
            reason: format!("{}: {e}", full.display()),
        })?;
        let file = MapFile::from_json(&json).map_err(|e| WorldError::MapLoad {
            map: map.clone(),
            reason: format!("{}: {e}", full.display()),
        })?;
        log::debug!("Read map {} from {}", map, full.display());
        Ok(file.to_map_data(map.clone(), &self.manifest.config.layers))
    }

    fn map_ids(&self) -> Vec<MapId> {
        self.manifest.map_ids()
    }
}
