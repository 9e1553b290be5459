use glam::Vec2;

use crate::api::config::WorldConfig;
use crate::api::types::{Direction, Rect};
use crate::core::transition::PlayerPosition;

/// Whether the player is walking this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityState {
    #[default]
    Idle,
    Walking,
}

/// The player character.
///
/// Positions are kept in tile units. `next` is a look-ahead: it is computed
/// from input every frame, the hitbox is placed there, and it only becomes
/// `current` once that hitbox clears the collision layer.
#[derive(Debug, Clone)]
pub struct PlayerEntity {
    current: Vec2,
    next: Vec2,
    /// Tiles per second, per axis.
    pub velocity: Vec2,
    pub direction: Direction,
    pub state: EntityState,
    /// Hitbox size in pixels.
    hitbox: Vec2,
    unit_scale: f32,
}

impl PlayerEntity {
    /// Create a player at the origin using the configured frame and hitbox.
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            current: Vec2::ZERO,
            next: Vec2::ZERO,
            velocity: config.velocity,
            direction: Direction::default(),
            state: EntityState::Idle,
            hitbox: hitbox_size(
                Vec2::new(config.frame_width, config.frame_height),
                config.hitbox_reduction,
            ),
            unit_scale: config.unit_scale,
        }
    }

    /// Place the player at `start` (tiles), discarding any pending move.
    pub fn init(&mut self, start: Vec2) {
        self.current = start;
        self.next = start;
    }

    pub fn current_position(&self) -> Vec2 {
        self.current
    }

    pub fn next_position(&self) -> Vec2 {
        self.next
    }

    /// Predict where one frame of walking in `direction` would take the player.
    /// Nothing is tested here; the caller decides whether to commit.
    pub fn calculate_next_position(&mut self, direction: Direction, dt: f32) {
        self.next = self.current + direction.unit() * self.velocity * dt;
    }

    /// Cancel the look-ahead so the next commit is a no-op.
    pub fn hold(&mut self) {
        self.next = self.current;
    }

    pub fn set_next_position_to_current(&mut self) {
        self.current = self.next;
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Hitbox at the look-ahead position, in pixels.
    pub fn bounding_box(&self) -> Rect {
        let origin = if self.unit_scale > 0.0 {
            self.next / self.unit_scale
        } else {
            self.next
        };
        Rect::at(origin, self.hitbox)
    }

    pub fn hitbox_size(&self) -> Vec2 {
        self.hitbox
    }
}

impl PlayerPosition for PlayerEntity {
    fn current_position(&self) -> Vec2 {
        self.current
    }

    fn reposition(&mut self, start: Vec2) {
        self.init(start);
    }
}

/// Shrink each frame axis by its reduction fraction. A fraction outside
/// (0, 1) leaves that axis at full size.
fn hitbox_size(frame: Vec2, reduction: Vec2) -> Vec2 {
    let axis = |full: f32, cut: f32| {
        let keep = 1.0 - cut;
        if keep > 0.0 && keep < 1.0 { full * keep } else { full }
    };
    let size = Vec2::new(axis(frame.x, reduction.x), axis(frame.y, reduction.y));
    if size.x == 0.0 || size.y == 0.0 {
        log::debug!("Player hitbox has zero extent: {}x{}", size.x, size.y);
    }
    size
}
