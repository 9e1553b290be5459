/// A key event from whatever drives the world.
/// Codes use the browser `KeyboardEvent.keyCode` numbering, see [`KeyCode`].
///
/// [`KeyCode`]: crate::input::controller::KeyCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
}

/// Key presses and releases waiting for the next [`World::update`].
///
/// Whatever owns the window (or a scripted walk, as in the demo) pushes
/// events between frames. Order is kept, so a press and release of the same
/// key within one frame leaves that key up.
///
/// [`World::update`]: crate::core::world::World::update
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Everything pushed since the last frame, oldest first.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
