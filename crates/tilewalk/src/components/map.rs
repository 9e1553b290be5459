//! Loaded map data: the three object layers the world cares about.
//!
//! A layer that the map file does not contain is `None`, which is different
//! from a layer that exists but holds no objects.

use glam::Vec2;

use crate::api::types::{MapId, Rect};

/// A named rectangle on the spawn layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPoint {
    pub name: String,
    pub rect: Rect,
}

impl SpawnPoint {
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self { name: name.into(), rect }
    }

    /// Spawn position in pixels (the rectangle's corner).
    pub fn position(&self) -> Vec2 {
        self.rect.position()
    }
}

/// A rectangle on the portal layer that leads to another map.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalRegion {
    pub rect: Rect,
    /// Destination map. `None` when the object carries no name.
    pub destination: Option<MapId>,
}

impl PortalRegion {
    /// Build from the object name; an empty name means no destination.
    pub fn new(rect: Rect, name: &str) -> Self {
        let destination = if name.is_empty() { None } else { Some(MapId::from(name)) };
        Self { rect, destination }
    }
}

/// Object layers of one map, in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct MapData {
    pub id: MapId,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    /// Tile edge in pixels.
    pub tile_size: f32,
    pub collision: Option<Vec<Rect>>,
    pub spawns: Option<Vec<SpawnPoint>>,
    pub portals: Option<Vec<PortalRegion>>,
}

impl MapData {
    /// Create a map with no layers.
    pub fn new(id: impl Into<MapId>) -> Self {
        Self {
            id: id.into(),
            width: 0,
            height: 0,
            tile_size: 16.0,
            collision: None,
            spawns: None,
            portals: None,
        }
    }

    // -- Builder pattern --

    pub fn with_size(mut self, width: u32, height: u32, tile_size: f32) -> Self {
        self.width = width;
        self.height = height;
        self.tile_size = tile_size;
        self
    }

    pub fn with_collision(mut self, rects: Vec<Rect>) -> Self {
        self.collision = Some(rects);
        self
    }

    pub fn with_spawns(mut self, spawns: Vec<SpawnPoint>) -> Self {
        self.spawns = Some(spawns);
        self
    }

    pub fn with_portals(mut self, portals: Vec<PortalRegion>) -> Self {
        self.portals = Some(portals);
        self
    }

    /// Spawn markers whose name matches `marker_name`, ignoring ASCII case.
    /// Source order is preserved.
    pub fn player_starts<'a>(
        &'a self,
        marker_name: &'a str,
    ) -> impl Iterator<Item = &'a SpawnPoint> + 'a {
        self.spawns
            .iter()
            .flatten()
            .filter(move |s| s.name.eq_ignore_ascii_case(marker_name))
    }

    /// First collision rectangle overlapping `rect`.
    pub fn first_collision(&self, rect: &Rect) -> Option<&Rect> {
        self.collision.as_ref()?.iter().find(|r| r.overlaps(rect))
    }

    /// First portal overlapping `rect`, in layer order.
    pub fn first_portal(&self, rect: &Rect) -> Option<&PortalRegion> {
        self.portals.as_ref()?.iter().find(|p| p.rect.overlaps(rect))
    }

    /// Size in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.tile_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MapData {
        MapData::new("TOWN")
            .with_size(20, 10, 16.0)
            .with_spawns(vec![
                SpawnPoint::new("PLAYER_START", Rect::new(5.0, 5.0, 16.0, 16.0)),
                SpawnPoint::new("NPC_GUARD", Rect::new(50.0, 50.0, 16.0, 16.0)),
                SpawnPoint::new("player_start", Rect::new(80.0, 0.0, 16.0, 16.0)),
            ])
            .with_portals(vec![
                PortalRegion::new(Rect::new(32.0, 32.0, 16.0, 16.0), "CASTLE_OF_DOOM"),
                PortalRegion::new(Rect::new(36.0, 36.0, 16.0, 16.0), "TOP_WORLD"),
            ])
    }

    #[test]
    fn player_starts_filters_by_name_ignoring_case() {
        let map = sample();
        let starts: Vec<Vec2> = map.player_starts("PLAYER_START").map(|s| s.position()).collect();
        assert_eq!(starts, vec![Vec2::new(5.0, 5.0), Vec2::new(80.0, 0.0)]);
    }

    #[test]
    fn missing_layers_yield_nothing() {
        let map = MapData::new("EMPTY");
        assert_eq!(map.player_starts("PLAYER_START").count(), 0);
        assert!(map.first_collision(&Rect::new(0.0, 0.0, 100.0, 100.0)).is_none());
        assert!(map.first_portal(&Rect::new(0.0, 0.0, 100.0, 100.0)).is_none());
    }

    #[test]
    fn first_portal_follows_layer_order() {
        let map = sample();
        let portal = map.first_portal(&Rect::new(38.0, 38.0, 4.0, 4.0)).unwrap();
        assert_eq!(portal.destination, Some(MapId::from("CASTLE_OF_DOOM")));
    }

    #[test]
    fn empty_portal_name_has_no_destination() {
        let portal = PortalRegion::new(Rect::default(), "");
        assert!(portal.destination.is_none());
    }

    #[test]
    fn pixel_size() {
        assert_eq!(sample().pixel_size(), Vec2::new(320.0, 160.0));
    }
}
