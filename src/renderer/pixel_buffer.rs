//! CPU frame-buffer shared between the rasteriser and the window.
//!
//! Layout is row-major, 4 bytes per pixel in **R, G, B, A** order; colours
//! travel as [`Rgba`] words `0xRRGGBBAA`, i.e. big-endian byte order.

use byteorder::{BigEndian, ByteOrder};

use super::Rgba;

/// Transparent black.
pub const CLEAR: Rgba = 0x0000_0000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    /// Transparent-black buffer of `width × height` pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row (`width * 4`).
    #[inline]
    pub fn stride_bytes(&self) -> usize {
        self.width * 4
    }

    /// Whole buffer, ready to be blitted.
    #[inline]
    pub fn raw_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Byte offset of pixel `(x, y)`.
    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width,
            self.height
        );
        self.stride_bytes() * y + x * 4
    }

    /// Write one pixel. Out-of-range coordinates are a caller bug and panic.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, c: Rgba) {
        let i = self.offset(x, y);
        BigEndian::write_u32(&mut self.pixels[i..i + 4], c);
    }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> Rgba {
        let i = self.offset(x, y);
        BigEndian::read_u32(&self.pixels[i..i + 4])
    }

    /// Paint `y0..y1` of column `x` with one colour.
    #[inline]
    pub fn fill_column(&mut self, x: usize, y0: usize, y1: usize, c: Rgba) {
        for y in y0..y1 {
            self.set(x, y, c);
        }
    }

    /// Overwrite every pixel with `c`.
    pub fn clear(&mut self, c: Rgba) {
        let bytes = c.to_be_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    /// [`clear`](Self::clear) to transparent black.
    #[inline]
    pub fn clear_default(&mut self) {
        self.pixels.fill(0);
    }

    /// Reallocate if the resolution changed; contents are stale until the
    /// next full repaint.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels.resize(width * height * 4, 0);
        }
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        PixelBuffer::new(0, 0)
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_default_resets_to_transparent() {
        let mut pb = PixelBuffer::new(3, 2);
        pb.clear(0x336699FF);
        assert_eq!(pb.at(2, 1), 0x336699FF);
        pb.clear_default();
        assert!(pb.raw_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn starts_transparent_black() {
        let pb = PixelBuffer::new(8, 6);
        assert_eq!(pb.raw_bytes().len(), 8 * 6 * 4);
        assert!(pb.raw_bytes().iter().all(|&b| b == 0));
        assert_eq!(pb.stride_bytes(), 32);
    }

    #[test]
    fn set_writes_rgba_bytes_at_stride_offset() {
        let mut pb = PixelBuffer::new(16, 16);
        pb.set(10, 3, 0x11223344);
        let i = 16 * 4 * 3 + 10 * 4;
        assert_eq!(&pb.raw_bytes()[i..i + 4], &[0x11, 0x22, 0x33, 0x44]);
        // neighbours untouched
        assert_eq!(pb.at(9, 3), CLEAR);
        assert_eq!(pb.at(11, 3), CLEAR);
    }

    #[test]
    fn at_inverts_set_everywhere() {
        let (w, h) = (7, 5);
        let mut pb = PixelBuffer::new(w, h);
        let colour = |x: usize, y: usize| ((x as u32) << 24) | ((y as u32) << 8) | 0xA0;
        for y in 0..h {
            for x in 0..w {
                pb.set(x, y, colour(x, y));
            }
        }
        for y in 0..h {
            for x in 0..w {
                assert_eq!(pb.at(x, y), colour(x, y));
            }
        }
    }

    #[test]
    fn clear_overwrites_everything() {
        let mut pb = PixelBuffer::new(4, 4);
        pb.set(1, 1, 0xDEADBEEF);
        pb.clear(0x333333FF);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(pb.at(x, y), 0x333333FF);
            }
        }
        pb.clear(CLEAR);
        assert!(pb.raw_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn fill_column_is_half_open() {
        let mut pb = PixelBuffer::new(3, 5);
        pb.fill_column(1, 1, 4, 0xFF0000FF);
        assert_eq!(pb.at(1, 0), CLEAR);
        assert_eq!(pb.at(1, 1), 0xFF0000FF);
        assert_eq!(pb.at(1, 3), 0xFF0000FF);
        assert_eq!(pb.at(1, 4), CLEAR);
        assert_eq!(pb.at(0, 2), CLEAR);
    }

    #[test]
    #[should_panic]
    fn out_of_range_set_panics() {
        let mut pb = PixelBuffer::new(4, 4);
        pb.set(0, 4, 0xFFFFFFFF);
    }

    #[test]
    fn resize_reallocates() {
        let mut pb = PixelBuffer::new(2, 2);
        pb.resize(3, 4);
        assert_eq!((pb.width(), pb.height()), (3, 4));
        assert_eq!(pb.raw_bytes().len(), 48);
    }
}
