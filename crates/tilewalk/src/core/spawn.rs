//! Nearest-spawn selection and the per-map start-position cache.
//!
//! Each map remembers the spawn marker the player should appear at when the
//! map is entered. The entry is written whenever a nearest marker is
//! resolved and read when the map is loaded again.

use std::collections::HashMap;

use glam::Vec2;

use crate::api::error::WorldError;
use crate::api::types::MapId;
use crate::components::map::SpawnPoint;

/// Cached start position for one map.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StartEntry {
    /// No spawn marker has been resolved for this map yet.
    #[default]
    Unresolved,
    /// Position (pixels) of the most recently resolved marker.
    Resolved(Vec2),
}

impl StartEntry {
    pub fn position(self) -> Option<Vec2> {
        match self {
            StartEntry::Unresolved => None,
            StartEntry::Resolved(pos) => Some(pos),
        }
    }
}

/// Marker with the smallest squared distance to `reference`, with its index.
/// Ties go to the earliest marker.
pub fn nearest_marker<'a, I>(markers: I, reference: Vec2) -> Option<(usize, &'a SpawnPoint)>
where
    I: IntoIterator<Item = &'a SpawnPoint>,
{
    let mut best: Option<(usize, &'a SpawnPoint, f32)> = None;
    for (idx, marker) in markers.into_iter().enumerate() {
        let dist = reference.distance_squared(marker.position());
        match best {
            Some((_, _, shortest)) if dist >= shortest => {}
            _ => best = Some((idx, marker, dist)),
        }
    }
    best.map(|(idx, marker, _)| (idx, marker))
}

/// Per-map table of resolved start positions.
#[derive(Debug, Clone, Default)]
pub struct SpawnResolver {
    starts: HashMap<MapId, StartEntry>,
}

impl SpawnResolver {
    pub fn new() -> Self {
        Self { starts: HashMap::new() }
    }

    /// Create a resolver that already knows `maps`, all unresolved.
    pub fn with_maps<I>(maps: I) -> Self
    where
        I: IntoIterator<Item = MapId>,
    {
        Self {
            starts: maps.into_iter().map(|id| (id, StartEntry::Unresolved)).collect(),
        }
    }

    /// Find the marker nearest to `reference` (pixels) and cache its
    /// position for `map`. An empty marker list leaves the cache untouched.
    pub fn resolve_nearest<'a, I>(
        &mut self,
        map: &MapId,
        markers: I,
        reference: Vec2,
    ) -> Option<&'a SpawnPoint>
    where
        I: IntoIterator<Item = &'a SpawnPoint>,
    {
        log::debug!("Resolving nearest start on {} to ({}, {})", map, reference.x, reference.y);
        let Some((_, marker)) = nearest_marker(markers, reference) else {
            log::debug!("No spawn markers on {}", map);
            return None;
        };
        let pos = marker.position();
        log::debug!("Closest start on {} is ({}, {})", map, pos.x, pos.y);
        self.starts.insert(map.clone(), StartEntry::Resolved(pos));
        Some(marker)
    }

    /// Like [`resolve_nearest`](Self::resolve_nearest) with `reference` in
    /// tile units; it is converted to pixels by dividing by `unit_scale`.
    pub fn resolve_nearest_scaled<'a, I>(
        &mut self,
        map: &MapId,
        markers: I,
        reference_tiles: Vec2,
        unit_scale: f32,
    ) -> Result<Option<&'a SpawnPoint>, WorldError>
    where
        I: IntoIterator<Item = &'a SpawnPoint>,
    {
        if !(unit_scale.is_finite() && unit_scale > 0.0) {
            return Err(WorldError::InvalidScale(unit_scale));
        }
        Ok(self.resolve_nearest(map, markers, reference_tiles / unit_scale))
    }

    /// Cached start for `map` in pixels, (0, 0) when unresolved.
    pub fn cached_start(&self, map: &MapId) -> Vec2 {
        self.entry(map).position().unwrap_or(Vec2::ZERO)
    }

    pub fn entry(&self, map: &MapId) -> StartEntry {
        self.starts.get(map).copied().unwrap_or_default()
    }

    pub fn is_resolved(&self, map: &MapId) -> bool {
        matches!(self.entry(map), StartEntry::Resolved(_))
    }

    /// Maps the resolver has an entry for, resolved or not.
    pub fn known_maps(&self) -> impl Iterator<Item = &MapId> {
        self.starts.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Rect;

    fn marker(x: f32, y: f32) -> SpawnPoint {
        SpawnPoint::new("PLAYER_START", Rect::new(x, y, 16.0, 16.0))
    }

    fn town() -> MapId {
        MapId::from("TOWN")
    }

    #[test]
    fn picks_strictly_nearest() {
        let markers = vec![marker(100.0, 100.0), marker(10.0, 12.0), marker(-40.0, 0.0)];
        let mut resolver = SpawnResolver::new();
        let found = resolver.resolve_nearest(&town(), &markers, Vec2::new(8.0, 8.0)).unwrap();
        assert_eq!(found.position(), Vec2::new(10.0, 12.0));
        assert_eq!(resolver.cached_start(&town()), Vec2::new(10.0, 12.0));
    }

    #[test]
    fn ties_go_to_first_marker() {
        let markers = vec![marker(10.0, 0.0), marker(-10.0, 0.0), marker(0.0, 10.0)];
        let (idx, found) = nearest_marker(&markers, Vec2::ZERO).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(found.position(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn zero_distance_marker_is_kept() {
        let markers = vec![marker(0.0, 0.0), marker(1.0, 0.0)];
        let mut resolver = SpawnResolver::new();
        let found = resolver.resolve_nearest(&town(), &markers, Vec2::ZERO).unwrap();
        assert_eq!(found.position(), Vec2::ZERO);
        assert_eq!(resolver.entry(&town()), StartEntry::Resolved(Vec2::ZERO));
        assert!(resolver.is_resolved(&town()));
    }

    #[test]
    fn result_is_always_an_input_position() {
        let markers = vec![marker(3.5, 7.25), marker(-2.0, 9.0), marker(40.0, -1.0)];
        let mut resolver = SpawnResolver::new();
        for reference in [Vec2::ZERO, Vec2::new(20.0, 3.0), Vec2::new(-100.0, 50.0)] {
            let found = resolver.resolve_nearest(&town(), &markers, reference).unwrap();
            assert!(markers.iter().any(|m| m.position() == found.position()));
        }
    }

    #[test]
    fn empty_markers_leave_cache_alone() {
        let mut resolver = SpawnResolver::new();
        assert!(resolver.resolve_nearest(&town(), std::iter::empty(), Vec2::ZERO).is_none());
        assert_eq!(resolver.entry(&town()), StartEntry::Unresolved);

        resolver.resolve_nearest(&town(), &[marker(5.0, 5.0)], Vec2::ZERO);
        assert!(resolver.resolve_nearest(&town(), std::iter::empty(), Vec2::ZERO).is_none());
        assert_eq!(resolver.cached_start(&town()), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn later_resolution_overwrites_cache() {
        let markers = vec![marker(0.0, 0.0), marker(100.0, 0.0)];
        let mut resolver = SpawnResolver::new();
        resolver.resolve_nearest(&town(), &markers, Vec2::new(10.0, 0.0));
        assert_eq!(resolver.cached_start(&town()), Vec2::new(0.0, 0.0));
        resolver.resolve_nearest(&town(), &markers, Vec2::new(90.0, 0.0));
        assert_eq!(resolver.cached_start(&town()), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn cached_start_is_stable_between_resolutions() {
        let mut resolver = SpawnResolver::new();
        resolver.resolve_nearest(&town(), &[marker(5.0, 5.0)], Vec2::ZERO);
        let first = resolver.cached_start(&town());
        let second = resolver.cached_start(&town());
        assert_eq!(first, second);
    }

    #[test]
    fn caches_are_per_map() {
        let mut resolver = SpawnResolver::with_maps([town(), MapId::from("CASTLE_OF_DOOM")]);
        resolver.resolve_nearest(&town(), &[marker(5.0, 5.0)], Vec2::ZERO);
        assert_eq!(resolver.cached_start(&MapId::from("CASTLE_OF_DOOM")), Vec2::ZERO);
        assert!(!resolver.is_resolved(&MapId::from("CASTLE_OF_DOOM")));
        assert_eq!(resolver.known_maps().count(), 2);
    }

    #[test]
    fn scaled_matches_pixel_reference() {
        let markers = vec![marker(0.0, 0.0), marker(32.0, 32.0), marker(64.0, 0.0)];
        let mut scaled = SpawnResolver::new();
        let mut direct = SpawnResolver::new();

        let a = scaled
            .resolve_nearest_scaled(&town(), &markers, Vec2::new(1.5, 1.75), 1.0 / 16.0)
            .unwrap()
            .unwrap();
        let b = direct.resolve_nearest(&town(), &markers, Vec2::new(24.0, 28.0)).unwrap();
        assert_eq!(a.position(), b.position());
        assert_eq!(scaled.cached_start(&town()), Vec2::new(32.0, 32.0));
    }

    #[test]
    fn scaled_rejects_invalid_scale() {
        let mut resolver = SpawnResolver::new();
        let markers = vec![marker(1.0, 1.0)];
        for scale in [0.0, -0.5, f32::NAN] {
            let result = resolver.resolve_nearest_scaled(&town(), &markers, Vec2::ONE, scale);
            assert!(matches!(result, Err(WorldError::InvalidScale(_))));
        }
        assert!(!resolver.is_resolved(&town()));
    }
}
