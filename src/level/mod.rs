//! On-disk assets: JSON level files and texture directories.
//!
//! The core never sees file formats; it only receives a validated
//! [`GridMap`](crate::world::GridMap) and a filled
//! [`TextureBank`](crate::world::TextureBank).

mod loader;
mod textures;

pub use loader::{Level, LevelError, load_level, parse_level};
pub use textures::load_texture_dir;
