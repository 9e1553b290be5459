pub mod manifest;
pub mod map_file;
pub mod source;
