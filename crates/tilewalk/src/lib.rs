pub mod api;
pub mod core;
pub mod components;
pub mod renderer;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::{WorldConfig, LayerNames};
pub use api::error::{WorldError, Diagnostic, LayerKind};
pub use api::types::{MapId, Rect, Direction, TransitionOutcome, TOP_WORLD, TOWN, CASTLE_OF_DOOM};
pub use components::map::{MapData, SpawnPoint, PortalRegion};
pub use components::map_object::MapObject;
pub use components::player::{PlayerEntity, EntityState};
pub use crate::core::spawn::{SpawnResolver, StartEntry, nearest_marker};
pub use crate::core::transition::{MapTransitionController, PlayerPosition};
pub use crate::core::world::{World, FrameOutcome};
pub use assets::map_file::{MapFile, LayerFile};
pub use assets::manifest::WorldManifest;
pub use assets::source::{MapSource, InMemoryMapSource, ManifestMapSource};
pub use input::queue::{InputEvent, InputQueue};
pub use input::controller::{PlayerController, KeyCode};
pub use renderer::traits::{MapRenderSink, NullRenderSink};
