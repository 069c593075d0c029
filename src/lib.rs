//! Grid ray-casting renderer.
//!
//! One ray per screen column is marched across an axis-aligned tile map;
//! the nearest wall hit becomes a vertical strip in a CPU pixel buffer.
//!
//! * [`world`]    – tile grid and texture bank (read-only after load)
//! * [`sim`]      – the avatar and its movement / collision
//! * [`engine`]   – ray casting, projection and the per-frame context
//! * [`renderer`] – pixel buffer and the software strip renderer
//! * [`level`]    – file loaders (JSON levels, PNG textures)

pub mod config;
pub mod engine;
pub mod level;
pub mod renderer;
pub mod sim;
pub mod world;
