pub mod spawn;
pub mod transition;
pub mod world;
