//! ---------------------------------------------------------------------------
//! Classic software (CPU) column renderer
//!
//! * Fills a [`PixelBuffer`] in **R,G,B,A** byte order.
//! * Every strip covers its whole column, so a frame is a full repaint and
//!   the buffer is never cleared in between.
//! ---------------------------------------------------------------------------

use crate::{
    engine::Strip,
    renderer::{FrameStyle, PixelBuffer, Renderer, WallShading},
    world::{Texture, TextureBank},
};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// Column renderer writing straight into its own pixel buffer.
#[derive(Default)]
pub struct Software {
    frame: PixelBuffer,
}

impl Software {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            frame: PixelBuffer::new(width, height),
        }
    }

    /// The last finished (or in-progress) frame.
    #[inline]
    pub fn frame(&self) -> &PixelBuffer {
        &self.frame
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        self.frame.resize(w, h);
    }

    fn draw_strip(&mut self, strip: &Strip, style: &FrameStyle, bank: &TextureBank) {
        let h = self.frame.height();
        debug_assert!(strip.top <= strip.bottom && strip.bottom <= h);

        self.frame.fill_column(strip.x, 0, strip.top, style.ceiling);

        match style.wall {
            WallShading::Flat {
                vertical,
                horizontal,
            } => {
                let c = if strip.hit_vertical { vertical } else { horizontal };
                self.frame.fill_column(strip.x, strip.top, strip.bottom, c);
            }
            WallShading::Textured(id) => {
                let tex = bank.texture(id).unwrap_or_else(|_| bank.checker());
                self.draw_textured_wall(strip, tex);
            }
        }

        self.frame.fill_column(strip.x, strip.bottom, h, style.floor);
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&PixelBuffer),
    {
        submit(&self.frame);
    }
}

/*──────────────────────── column rendering ───────────────────────────*/

impl Software {
    /// Wall rows of one column, texel by texel.
    fn draw_textured_wall(&mut self, strip: &Strip, tex: &Texture) {
        let h = self.frame.height();
        let u = strip.tex_x(tex.w);
        for y in strip.top..strip.bottom {
            let v = strip.tex_y(y, h, tex.h);
            self.frame.set(strip.x, y, tex.texel(u, v));
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RendererExt;

    const CEIL: u32 = 0x333333FF;
    const FLOOR: u32 = 0x777777FF;

    fn flat() -> FrameStyle {
        FrameStyle {
            ceiling: CEIL,
            floor: FLOOR,
            wall: WallShading::Flat {
                vertical: 0xFFFFFFFF,
                horizontal: 0xCCCCCCFF,
            },
        }
    }

    fn strip(x: usize, top: usize, bottom: usize, vertical: bool) -> Strip {
        Strip {
            x,
            top,
            bottom,
            height: (bottom - top) as i64,
            wall_u: 0.0,
            hit_vertical: vertical,
        }
    }

    #[test]
    fn flat_strip_paints_three_bands() {
        let bank = TextureBank::new();
        let mut sw = Software::default();
        let mut seen = None;

        sw.draw_frame(
            2,
            8,
            [strip(0, 2, 6, true), strip(1, 3, 5, false)],
            &flat(),
            &bank,
            |fb| seen = Some(fb.clone()),
        );

        let fb = seen.expect("submit not called");
        let col0: Vec<u32> = (0..8).map(|y| fb.at(0, y)).collect();
        assert_eq!(
            col0,
            [CEIL, CEIL, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, FLOOR, FLOOR]
        );
        assert_eq!(fb.at(1, 3), 0xCCCCCCFF);
        assert_eq!(fb.at(1, 2), CEIL);
        assert_eq!(fb.at(1, 5), FLOOR);
    }

    #[test]
    fn every_pixel_is_repainted() {
        let bank = TextureBank::new();
        let mut sw = Software::new(4, 4);
        sw.begin_frame(4, 4);
        for x in 0..4 {
            sw.draw_strip(&strip(x, 1, 3, x % 2 == 0), &flat(), &bank);
        }
        let fb = sw.frame();
        for y in 0..4 {
            for x in 0..4 {
                assert_ne!(fb.at(x, y), crate::renderer::CLEAR, "({x}, {y}) untouched");
            }
        }
    }

    #[test]
    fn textured_strip_samples_the_texture() {
        let mut bank = TextureBank::new();
        // 2×2: top row red, bottom row blue
        let id = bank
            .insert(
                "rb",
                Texture {
                    w: 2,
                    h: 2,
                    pixels: vec![0xFF0000FF, 0xFF0000FF, 0x0000FFFF, 0x0000FFFF],
                },
            )
            .unwrap();
        let style = FrameStyle {
            wall: WallShading::Textured(id),
            ..flat()
        };

        let mut sw = Software::new(1, 8);
        sw.begin_frame(1, 8);
        // wall fills rows 2..6 of an 8-row screen (height 4)
        sw.draw_strip(&strip(0, 2, 6, true), &style, &bank);

        let fb = sw.frame();
        assert_eq!(fb.at(0, 2), 0xFF0000FF);
        assert_eq!(fb.at(0, 3), 0xFF0000FF);
        assert_eq!(fb.at(0, 4), 0x0000FFFF);
        assert_eq!(fb.at(0, 5), 0x0000FFFF);
    }

    #[test]
    fn unknown_texture_falls_back_to_checker() {
        let bank = TextureBank::new();
        let style = FrameStyle {
            wall: WallShading::Textured(42),
            ..flat()
        };
        let mut sw = Software::new(1, 4);
        sw.draw_strip(&strip(0, 0, 4, true), &style, &bank);
        assert_eq!(sw.frame().at(0, 0), bank.checker().texel(0, 0));
    }
}
