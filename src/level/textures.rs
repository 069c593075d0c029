use std::{fs, path::Path};

use image::ImageReader;
use tracing::{debug, info, warn};

use crate::world::{Texture, TextureBank, TextureError};

/// Decode every PNG in `dir` into a new bank, keyed by file stem
/// (`images/redbrick.png` → `"redbrick"`).
///
/// Non-PNG entries are skipped with a warning; a PNG that fails to decode
/// aborts the load.
pub fn load_texture_dir<P: AsRef<Path>>(dir: P) -> Result<TextureBank, TextureError> {
    let dir = dir.as_ref();
    let mut bank = TextureBank::new();

    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    paths.sort();

    for path in paths {
        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()).filter(|_| is_png) else {
            warn!("skipping non-texture entry {}", path.display());
            continue;
        };

        let tex = decode_png(&path)?;
        debug!(name = stem, w = tex.w, h = tex.h, "texture decoded");
        bank.insert(stem, tex)?;
    }

    info!(count = bank.len() - 1, "textures loaded from {}", dir.display());
    Ok(bank)
}

fn decode_png(path: &Path) -> Result<Texture, TextureError> {
    let decode_err = |source| TextureError::Decode {
        path: path.display().to_string(),
        source,
    };
    let image = ImageReader::open(path)?
        .decode()
        .map_err(decode_err)?
        .to_rgba8();

    let (w, h) = image.dimensions();
    let pixels = image
        .pixels()
        .map(|p| u32::from_be_bytes(p.0))
        .collect();

    Ok(Texture {
        w: w as usize,
        h: h as usize,
        pixels,
    })
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn loads_pngs_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        let mut img = RgbaImage::from_pixel(4, 2, Rgba([10, 20, 30, 255]));
        img.put_pixel(3, 1, Rgba([1, 2, 3, 4]));
        img.save(dir.path().join("redbrick.png")).unwrap();
        fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

        let bank = load_texture_dir(dir.path()).unwrap();
        assert_eq!(bank.len(), 2); // checker + redbrick

        let tex = bank.texture(bank.require("redbrick").unwrap()).unwrap();
        assert_eq!((tex.w, tex.h), (4, 2));
        assert_eq!(tex.texel(0, 0), 0x0A141EFF);
        assert_eq!(tex.texel(3, 1), 0x01020304);
    }

    #[test]
    fn corrupt_png_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.png"), b"\x89PNG garbage").unwrap();
        assert!(matches!(
            load_texture_dir(dir.path()),
            Err(TextureError::Decode { .. })
        ));
    }

    #[test]
    fn missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_texture_dir(dir.path().join("nope")),
            Err(TextureError::Io(_))
        ));
    }
}
