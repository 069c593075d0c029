// Format-agnostic repository of decoded wall textures.
// The renderer and engine interact through `TextureId` only.

use std::collections::HashMap;

use crate::renderer::Rgba;

/// Runtime handle for a texture in this bank.
///
/// *Guaranteed* to remain stable for the lifetime of the bank.
pub type TextureId = u16;

/// Name under which the built-in checkerboard is registered.
pub const CHECKER: &str = "checker";

/// `TextureId` of the checkerboard; always 0 because `TextureBank::new()`
/// inserts it first.
pub const CHECKER_ID: TextureId = 0;

/// CPU-side storage: **RGBA** (`0xRRGGBBAA`) texels in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<Rgba>,
}

impl Texture {
    /// Texel at integer `(x, y)`; both must be in range.
    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> Rgba {
        debug_assert!(x < self.w && y < self.h, "texel ({x}, {y}) outside {}x{}", self.w, self.h);
        self.pixels[y * self.w + x]
    }
}

/// Convenience checkerboard 64×64 (8-px squares, blue/red).
impl Default for Texture {
    fn default() -> Self {
        const SIZE: usize = 64;
        let mut pixels = vec![0; SIZE * SIZE];
        for y in 0..SIZE {
            for x in 0..SIZE {
                pixels[y * SIZE + x] = if (x / 8 + y / 8) & 1 == 0 {
                    0x7F7FFFFF
                } else {
                    0xFF7F7FFF
                };
            }
        }
        Texture {
            w: SIZE,
            h: SIZE,
            pixels,
        }
    }
}

/// Things that can go wrong when filling or querying the bank.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    /// A texture the renderer is configured to use was never loaded.
    #[error("texture `{0}` not found in bank")]
    Missing(String),

    #[error("reading texture directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("decoding `{path}`: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Name-addressed cache of textures.
///
/// * Does **not** know about PNG or directories – that's the loader's job.
/// * Stores exactly one copy of every name.
/// * ID **0** is always the checkerboard.
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl Default for TextureBank {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureBank {
    pub fn new() -> Self {
        let mut by_name = HashMap::new();
        by_name.insert(CHECKER.into(), CHECKER_ID);
        Self {
            by_name,
            data: vec![Texture::default()],
        }
    }

    /// Number of textures stored (including the checkerboard).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.len() == 1
    } // only checker

    /// Obtain the id for a *loaded* texture by name.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Like [`id`](Self::id) but a missing name is an error: the caller
    /// treats it as fatal configuration.
    pub fn require(&self, name: &str) -> Result<TextureId, TextureError> {
        self.id(name)
            .ok_or_else(|| TextureError::Missing(name.to_string()))
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// The built-in checkerboard; never fails.
    #[inline]
    pub fn checker(&self) -> &Texture {
        &self.data[CHECKER_ID as usize]
    }

    /// Insert a texture under `name` and return its new id.
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        let id = self.data.len() as TextureId;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn solid(color: Rgba) -> Texture {
        Texture {
            w: 2,
            h: 2,
            pixels: vec![color; 4],
        }
    }

    #[test]
    fn insert_and_lookup() {
        let mut bank = TextureBank::new();
        assert!(bank.is_empty());
        let red = bank.insert("redbrick", solid(0xFF0000FF)).unwrap();
        let blue = bank.insert("bluestone", solid(0x0000FFFF)).unwrap();

        assert_ne!(red, CHECKER_ID);
        assert_ne!(blue, red);
        assert_eq!(bank.id("redbrick"), Some(red));
        assert_eq!(bank.id(CHECKER), Some(CHECKER_ID));
        assert_eq!(bank.id("nope"), None);
        assert_eq!(bank.texture(blue).unwrap().texel(1, 1), 0x0000FFFF);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut bank = TextureBank::new();
        bank.insert("wood", solid(1)).unwrap();
        let err = bank.insert("wood", solid(2)).unwrap_err();
        assert!(matches!(err, TextureError::Duplicate(ref n) if n == "wood"));
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn missing_key_is_an_error() {
        let bank = TextureBank::new();
        let err = bank.require("redbrick").unwrap_err();
        assert!(matches!(err, TextureError::Missing(ref n) if n == "redbrick"));
        assert_eq!(bank.require(CHECKER).unwrap(), CHECKER_ID);
    }

    #[test]
    fn bad_id_guard() {
        let bank = TextureBank::new();
        assert!(matches!(
            bank.texture(TextureId::MAX),
            Err(TextureError::BadId(TextureId::MAX))
        ));
    }

    #[test]
    fn checker_alternates_every_eight_texels() {
        let tex = Texture::default();
        assert_eq!(tex.texel(0, 0), tex.texel(7, 7));
        assert_ne!(tex.texel(0, 0), tex.texel(8, 0));
        assert_eq!(tex.texel(8, 8), tex.texel(0, 0));
    }
}
