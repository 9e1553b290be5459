use crate::api::types::Direction;
use crate::input::queue::InputEvent;

/// Key codes the player controller listens to.
pub struct KeyCode;

impl KeyCode {
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const Q: u32 = 81;
    pub const S: u32 = 83;
    pub const W: u32 = 87;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Left,
    Right,
    Up,
    Down,
    Quit,
}

impl Key {
    fn from_code(code: u32) -> Option<Self> {
        match code {
            KeyCode::LEFT | KeyCode::A => Some(Key::Left),
            KeyCode::RIGHT | KeyCode::D => Some(Key::Right),
            KeyCode::UP | KeyCode::W => Some(Key::Up),
            KeyCode::DOWN | KeyCode::S => Some(Key::Down),
            KeyCode::Q => Some(Key::Quit),
            _ => None,
        }
    }
}

/// Tracks which movement keys are held.
///
/// Arrow keys and WASD both steer; Q asks to quit. When several
/// directions are held the first of Left, Right, Up, Down wins.
#[derive(Debug, Clone, Default)]
pub struct PlayerController {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    quit: bool,
}

impl PlayerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &InputEvent) {
        let (code, held) = match *event {
            InputEvent::KeyDown { key_code } => (key_code, true),
            InputEvent::KeyUp { key_code } => (key_code, false),
        };
        let Some(key) = Key::from_code(code) else {
            return;
        };
        match key {
            Key::Left => self.left = held,
            Key::Right => self.right = held,
            Key::Up => self.up = held,
            Key::Down => self.down = held,
            Key::Quit => self.quit = held,
        }
    }

    /// Direction to walk this frame, if any.
    pub fn direction(&self) -> Option<Direction> {
        if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else {
            None
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Release every key.
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}
