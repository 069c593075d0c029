mod grid;
mod texture;

pub use grid::{BOUNDARY, Content, EMPTY, GridMap};

pub use texture::{CHECKER, CHECKER_ID, Texture, TextureBank, TextureError, TextureId};

#[cfg(test)]
pub(crate) use grid::bordered;
