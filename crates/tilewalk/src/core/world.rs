//! One owned game session: the map controller, the player and their input.

use crate::api::error::WorldError;
use crate::api::types::{Direction, MapId, TransitionOutcome};
use crate::assets::source::MapSource;
use crate::components::player::{EntityState, PlayerEntity};
use crate::core::transition::MapTransitionController;
use crate::input::controller::PlayerController;
use crate::input::queue::InputQueue;
use crate::renderer::traits::MapRenderSink;

/// What happened to the player during one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No direction held; the player stayed put.
    Idle,
    /// The look-ahead position was committed.
    Moved,
    /// The player's hitbox overlaps collision geometry; nothing was committed.
    Blocked,
    /// A portal moved the player onto another map.
    Transitioned(MapId),
    /// The quit key is held.
    Quit,
}

pub struct World<S> {
    transitions: MapTransitionController<S>,
    player: PlayerEntity,
    controller: PlayerController,
}

impl<S: MapSource> World<S> {
    /// Place a fresh player at the start of the controller's current map.
    pub fn new(transitions: MapTransitionController<S>) -> Self {
        let mut player = PlayerEntity::new(transitions.config());
        player.init(transitions.player_start_unit_scaled());
        Self {
            transitions,
            player,
            controller: PlayerController::new(),
        }
    }

    /// Run one frame: apply pending input, then step the player.
    pub fn update<R>(
        &mut self,
        dt: f32,
        input: &mut InputQueue,
        sink: &mut R,
    ) -> Result<FrameOutcome, WorldError>
    where
        R: MapRenderSink + ?Sized,
    {
        for event in input.drain() {
            self.controller.apply(&event);
        }
        if self.controller.quit_requested() {
            return Ok(FrameOutcome::Quit);
        }
        self.step(self.controller.direction(), dt, sink)
    }

    /// Step the player one frame in `direction` (or stand still).
    ///
    /// The look-ahead is computed first and the hitbox is placed there.
    /// Portals are checked against that hitbox and a transition ends the
    /// frame. Otherwise the look-ahead is committed unless the hitbox
    /// touches collision. A portal whose map fails to load is logged and
    /// recorded as a diagnostic, and the frame carries on as if no portal
    /// had been entered.
    pub fn step<R>(
        &mut self,
        direction: Option<Direction>,
        dt: f32,
        sink: &mut R,
    ) -> Result<FrameOutcome, WorldError>
    where
        R: MapRenderSink + ?Sized,
    {
        match direction {
            Some(dir) => {
                self.player.set_direction(dir);
                self.player.state = EntityState::Walking;
                self.player.calculate_next_position(dir, dt);
            }
            None => {
                self.player.state = EntityState::Idle;
                self.player.hold();
            }
        }

        let player_box = self.player.bounding_box();
        match self
            .transitions
            .check_portal_activation(&player_box, &mut self.player, sink)
        {
            Ok(TransitionOutcome::Transition(map)) => return Ok(FrameOutcome::Transitioned(map)),
            Ok(TransitionOutcome::InvalidPortal | TransitionOutcome::NoTransition) => {}
            Err(err @ (WorldError::UnknownMap(_) | WorldError::MapLoad { .. })) => {
                log::warn!(
                    "Portal transition failed, staying on {}: {}",
                    self.transitions.current_map_id(),
                    err
                );
            }
            Err(err) => return Err(err),
        }

        if self.transitions.is_blocked_by_collision(&player_box) {
            return Ok(FrameOutcome::Blocked);
        }
        self.player.set_next_position_to_current();
        Ok(if direction.is_some() {
            FrameOutcome::Moved
        } else {
            FrameOutcome::Idle
        })
    }

    pub fn player(&self) -> &PlayerEntity {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerEntity {
        &mut self.player
    }

    pub fn transitions(&self) -> &MapTransitionController<S> {
        &self.transitions
    }

    pub fn transitions_mut(&mut self) -> &mut MapTransitionController<S> {
        &mut self.transitions
    }

    pub fn current_map_id(&self) -> &MapId {
        self.transitions.current_map_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::WorldConfig;
    use crate::api::error::Diagnostic;
    use crate::api::types::{Rect, CASTLE_OF_DOOM, TOWN};
    use crate::assets::source::InMemoryMapSource;
    use crate::components::map::{MapData, PortalRegion, SpawnPoint};
    use crate::input::controller::KeyCode;
    use crate::input::queue::InputEvent;
    use crate::renderer::traits::NullRenderSink;
    use glam::Vec2;

    // Velocity 2 tiles/s at dt 0.5 walks exactly one tile (16 px) per frame.
    const DT: f32 = 0.5;

    fn start(x: f32, y: f32) -> SpawnPoint {
        SpawnPoint::new("PLAYER_START", Rect::new(x, y, 16.0, 16.0))
    }

    fn world() -> World<InMemoryMapSource> {
        let town = MapData::new(TOWN)
            .with_collision(vec![Rect::new(64.0, 0.0, 16.0, 16.0)])
            .with_spawns(vec![start(16.0, 0.0), start(0.0, 32.0)])
            .with_portals(vec![
                PortalRegion::new(Rect::new(0.0, 64.0, 16.0, 16.0), CASTLE_OF_DOOM),
                PortalRegion::new(Rect::new(96.0, 64.0, 16.0, 48.0), "ATLANTIS"),
            ]);
        let castle = MapData::new(CASTLE_OF_DOOM).with_spawns(vec![start(48.0, 48.0)]);
        let source = InMemoryMapSource::new().with_map(town).with_map(castle);
        let controller = MapTransitionController::open(source, WorldConfig::default()).unwrap();
        World::new(controller)
    }

    fn walk(
        world: &mut World<InMemoryMapSource>,
        dir: Direction,
        frames: usize,
    ) -> Vec<FrameOutcome> {
        (0..frames)
            .map(|_| world.step(Some(dir), DT, &mut NullRenderSink).unwrap())
            .collect()
    }

    #[test]
    fn player_starts_at_map_start() {
        let world = world();
        assert_eq!(world.player().current_position(), Vec2::new(1.0, 0.0));
        assert_eq!(world.current_map_id().as_str(), TOWN);
    }

    #[test]
    fn stops_short_of_wall() {
        let mut world = world();
        assert_eq!(
            walk(&mut world, Direction::Right, 4),
            vec![
                FrameOutcome::Moved,
                FrameOutcome::Moved,
                FrameOutcome::Blocked,
                FrameOutcome::Blocked,
            ]
        );
        // The look-ahead into the wall tile is never committed.
        assert_eq!(world.player().current_position(), Vec2::new(3.0, 0.0));
        assert_eq!(world.player().direction, Direction::Right);
    }

    #[test]
    fn walks_back_out_after_hitting_wall() {
        let mut world = world();
        walk(&mut world, Direction::Right, 4);

        assert_eq!(walk(&mut world, Direction::Left, 2), vec![FrameOutcome::Moved; 2]);
        assert_eq!(world.player().current_position(), Vec2::new(1.0, 0.0));

        // Facing the wall again is still blocked, but other directions are not.
        assert_eq!(walk(&mut world, Direction::Right, 3).last(), Some(&FrameOutcome::Blocked));
        assert_eq!(walk(&mut world, Direction::Up, 1), vec![FrameOutcome::Moved]);
        assert_eq!(world.player().current_position(), Vec2::new(3.0, 1.0));
    }

    #[test]
    fn idle_frame_keeps_position() {
        let mut world = world();
        let outcome = world.step(None, DT, &mut NullRenderSink).unwrap();
        assert_eq!(outcome, FrameOutcome::Idle);
        assert_eq!(world.player().current_position(), Vec2::new(1.0, 0.0));
        assert_eq!(world.player().state, EntityState::Idle);
    }

    #[test]
    fn walking_into_portal_switches_map() {
        let mut world = world();
        world.player_mut().init(Vec2::new(0.0, 2.0));

        assert_eq!(
            walk(&mut world, Direction::Up, 2),
            vec![
                FrameOutcome::Moved,
                FrameOutcome::Transitioned(MapId::from(CASTLE_OF_DOOM)),
            ]
        );

        assert_eq!(world.current_map_id().as_str(), CASTLE_OF_DOOM);
        assert_eq!(world.player().current_position(), Vec2::new(3.0, 3.0));
        // Departure start is the TOWN marker nearest to where the player stood.
        assert_eq!(world.transitions().cached_start(&MapId::from(TOWN)), Vec2::new(0.0, 32.0));
    }

    #[test]
    fn walks_off_portal_to_unknown_map() {
        let mut world = world();
        world.player_mut().init(Vec2::new(6.0, 6.0));
        world.transitions_mut().drain_diagnostics();

        assert_eq!(walk(&mut world, Direction::Down, 3), vec![FrameOutcome::Moved; 3]);
        assert_eq!(world.player().current_position(), Vec2::new(6.0, 3.0));
        assert_eq!(world.current_map_id().as_str(), TOWN);

        // The first two frames still overlapped the broken portal.
        let failed = Diagnostic::TransitionFailed {
            map: MapId::from(TOWN),
            destination: MapId::from("ATLANTIS"),
        };
        assert_eq!(world.transitions_mut().drain_diagnostics(), vec![failed.clone(), failed]);
    }

    #[test]
    fn update_reads_input_queue() {
        let mut world = world();
        let mut input = InputQueue::new();
        let mut sink = NullRenderSink;
        input.push(InputEvent::KeyDown { key_code: KeyCode::W });
        assert_eq!(world.update(DT, &mut input, &mut sink).unwrap(), FrameOutcome::Moved);
        assert_eq!(world.player().current_position(), Vec2::new(1.0, 1.0));

        // Key stays held across frames until released.
        assert_eq!(world.update(DT, &mut input, &mut sink).unwrap(), FrameOutcome::Moved);
        input.push(InputEvent::KeyUp { key_code: KeyCode::W });
        assert_eq!(world.update(DT, &mut input, &mut sink).unwrap(), FrameOutcome::Idle);
        assert_eq!(world.player().current_position(), Vec2::new(1.0, 2.0));

        input.push(InputEvent::KeyDown { key_code: KeyCode::Q });
        assert_eq!(world.update(DT, &mut input, &mut sink).unwrap(), FrameOutcome::Quit);
    }
}
