//! Rendering abstraction layer.
//!
//! *The rest of the engine never touches a pixel buffer directly.*
//! It produces one [`Strip`] per screen column (left-to-right) and hands
//! them to a type that implements [`Renderer`].
//!
//! * A helper blanket-impl [`RendererExt`] adds `draw_frame` so call-sites
//!   stay short.

use crate::{engine::Strip, world::TextureBank, world::TextureId};

mod pixel_buffer;
mod software;

pub use pixel_buffer::{CLEAR, PixelBuffer};
pub use software::Software;

/// Pixel colour word, `0xRRGGBBAA`.
pub type Rgba = u32;

/// How the wall part of a strip is coloured.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WallShading {
    /// Sample one texture; columns follow the hit coordinate.
    Textured(TextureId),
    /// Solid colours; vertical- and horizontal-line hits differ so
    /// corners stay readable.
    Flat { vertical: Rgba, horizontal: Rgba },
}

/// Per-session colours for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameStyle {
    pub ceiling: Rgba,
    pub floor: Rgba,
    pub wall: WallShading,
}

/// A renderer that owns an internal pixel buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Rasterise one full-height column: ceiling, wall, floor.
    fn draw_strip(&mut self, strip: &Strip, style: &FrameStyle, bank: &TextureBank);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&PixelBuffer)` is run exactly once per frame.
    /// * The window side reads `raw_bytes()` / `stride_bytes()`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&PixelBuffer);
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<I, F>(
        &mut self,
        width: usize,
        height: usize,
        strips: I,
        style: &FrameStyle,
        bank: &TextureBank,
        submit: F,
    ) where
        I: IntoIterator<Item = Strip>,
        F: FnOnce(&PixelBuffer),
    {
        self.begin_frame(width, height);
        for s in strips {
            self.draw_strip(&s, style, bank);
        }
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}
