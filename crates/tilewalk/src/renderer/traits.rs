//! Render-side hook for map swaps.
//!
//! Drawing tiles is left to the host. The world only tells the host which
//! map to draw once a portal has moved the player somewhere else.

use crate::components::map::MapData;

/// Receives the active map after every transition.
pub trait MapRenderSink {
    fn swap_map(&mut self, map: &MapData);
}

/// Sink that ignores map swaps. Useful headless and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderSink;

impl MapRenderSink for NullRenderSink {
    fn swap_map(&mut self, _map: &MapData) {}
}

impl<T: MapRenderSink + ?Sized> MapRenderSink for &mut T {
    fn swap_map(&mut self, map: &MapData) {
        (**self).swap_map(map);
    }
}
