pub mod map;
pub mod map_object;
pub mod player;
