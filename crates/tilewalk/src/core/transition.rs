//! The active map and the portals that lead away from it.
//!
//! [`MapTransitionController`] owns the current map's collision, spawn and
//! portal layers. When the player's hitbox enters a portal it remembers
//! where the player left from, loads the destination, works out where the
//! player arrives and moves them there.

use glam::Vec2;

use crate::api::config::WorldConfig;
use crate::api::error::{Diagnostic, LayerKind, WorldError};
use crate::api::types::{MapId, Rect, TransitionOutcome};
use crate::assets::source::MapSource;
use crate::components::map::MapData;
use crate::core::spawn::{SpawnResolver, StartEntry};
use crate::renderer::traits::MapRenderSink;

/// Read/write access to the player's position, in tile units.
pub trait PlayerPosition {
    fn current_position(&self) -> Vec2;

    /// Move the player to `start`, dropping any pending look-ahead.
    fn reposition(&mut self, start: Vec2);
}

pub struct MapTransitionController<S> {
    source: S,
    config: WorldConfig,
    resolver: SpawnResolver,
    current: MapData,
    /// Start position on the current map, in pixels.
    player_start: Vec2,
    diagnostics: Vec<Diagnostic>,
}

impl<S: MapSource> MapTransitionController<S> {
    /// Validate `config` and load its initial map.
    pub fn open(mut source: S, config: WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;
        let resolver = SpawnResolver::with_maps(source.map_ids());
        let initial = source.load(&config.initial_map)?;
        let mut controller = Self {
            source,
            config,
            resolver,
            current: MapData::new(initial.id.clone()),
            player_start: Vec2::ZERO,
            diagnostics: Vec::new(),
        };
        controller.activate(initial);
        Ok(controller)
    }

    /// Switch to `map` and return the player's start there, in pixels.
    ///
    /// If the map cannot be loaded the error is returned and the current map
    /// stays active.
    pub fn load_map(&mut self, map: &MapId) -> Result<Vec2, WorldError> {
        let data = match self.source.load(map) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("Map not loaded: {}", err);
                return Err(err);
            }
        };
        self.activate(data);
        Ok(self.player_start)
    }

    fn activate(&mut self, data: MapData) {
        let id = data.id.clone();
        for (layer, present) in [
            (LayerKind::Collision, data.collision.is_some()),
            (LayerKind::Spawns, data.spawns.is_some()),
            (LayerKind::Portals, data.portals.is_some()),
        ] {
            if !present {
                log::debug!("No {} layer on {}", layer, id);
                self.diagnostics.push(Diagnostic::LayerMissing {
                    map: id.clone(),
                    layer,
                });
            }
        }
        self.current = data;

        if self.resolver.entry(&id) == StartEntry::Unresolved {
            let starts = self.current.player_starts(&self.config.spawn_marker_name);
            self.resolver.resolve_nearest(&id, starts, Vec2::ZERO);
        }
        if !self.resolver.is_resolved(&id) {
            log::warn!("No player start on {}, placing player at origin", id);
            self.diagnostics.push(Diagnostic::SpawnNotFound { map: id.clone() });
        }
        self.player_start = self.resolver.cached_start(&id);
        log::debug!(
            "Player start on {}: ({}, {})",
            id,
            self.player_start.x,
            self.player_start.y
        );
    }

    /// Whether `player_box` overlaps any rectangle on the collision layer.
    /// A map without a collision layer never blocks.
    pub fn is_blocked_by_collision(&self, player_box: &Rect) -> bool {
        self.current.first_collision(player_box).is_some()
    }

    /// Check `player_box` against the portal layer and, on a hit, move the
    /// player to the destination map.
    ///
    /// A transition caches the departure start nearest to the player,
    /// switches maps, resolves the arrival start, repositions the player and
    /// hands the new map to `sink`, in that order. Only the first
    /// overlapping portal is honoured. If the destination cannot be loaded
    /// the error is returned, a [`Diagnostic::TransitionFailed`] is
    /// recorded and the player is left where they were.
    pub fn check_portal_activation<P, R>(
        &mut self,
        player_box: &Rect,
        player: &mut P,
        sink: &mut R,
    ) -> Result<TransitionOutcome, WorldError>
    where
        P: PlayerPosition + ?Sized,
        R: MapRenderSink + ?Sized,
    {
        let Some(portal) = self.current.first_portal(player_box) else {
            return Ok(TransitionOutcome::NoTransition);
        };
        let Some(destination) = portal.destination.clone() else {
            log::debug!("Portal map name missing on {}", self.current.id);
            self.diagnostics.push(Diagnostic::InvalidPortalDestination {
                map: self.current.id.clone(),
            });
            return Ok(TransitionOutcome::InvalidPortal);
        };

        let departure = self.current.id.clone();
        let starts = self.current.player_starts(&self.config.spawn_marker_name);
        self.resolver.resolve_nearest_scaled(
            &departure,
            starts,
            player.current_position(),
            self.config.unit_scale,
        )?;

        if let Err(err) = self.load_map(&destination) {
            self.diagnostics.push(Diagnostic::TransitionFailed {
                map: departure,
                destination,
            });
            return Err(err);
        }
        player.reposition(self.player_start_unit_scaled());
        sink.swap_map(&self.current);
        log::info!("Portal activated: {} -> {}", departure, destination);
        Ok(TransitionOutcome::Transition(destination))
    }

    pub fn current_map(&self) -> &MapData {
        &self.current
    }

    pub fn current_map_id(&self) -> &MapId {
        &self.current.id
    }

    /// Start position on the current map, in pixels.
    pub fn player_start(&self) -> Vec2 {
        self.player_start
    }

    /// Start position on the current map, in tile units.
    pub fn player_start_unit_scaled(&self) -> Vec2 {
        self.config.pixels_to_tiles(self.player_start)
    }

    /// Cached start for any map, in pixels.
    pub fn cached_start(&self, map: &MapId) -> Vec2 {
        self.resolver.cached_start(map)
    }

    pub fn resolver(&self) -> &SpawnResolver {
        &self.resolver
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Take the diagnostics recorded since the last drain.
    pub fn drain_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
