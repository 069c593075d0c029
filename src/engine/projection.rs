use super::ray::Ray;
use crate::config::Settings;

/// Constants that depend on the viewport, derived once per session.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    pub w: usize,
    pub h: usize,
    pub tile: f64,
    /// `(w / 2) / tan(fov / 2)`
    pub plane_dist: f64,
}

/// One screen column ready for the rasteriser.
///
/// Rows `0..top` are ceiling, `top..bottom` wall, `bottom..h` floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strip {
    pub x: usize,
    pub top: usize,
    pub bottom: usize,
    /// Unclipped projected wall height in pixels (may exceed the screen).
    pub height: i64,
    /// World coordinate along the wall face (hit.y for vertical hits,
    /// hit.x for horizontal ones); selects the texture column.
    pub wall_u: f64,
    pub hit_vertical: bool,
}

impl Projection {
    pub fn new(w: usize, h: usize, fov: f64, tile: f64) -> Self {
        Self {
            w,
            h,
            tile,
            plane_dist: (w as f64 * 0.5) / (fov * 0.5).tan(),
        }
    }

    pub fn from_settings(s: &Settings) -> Self {
        Self::new(s.width, s.height, s.fov, s.tile_size)
    }

    /// Wall height in whole pixels for a perpendicular distance.
    ///
    /// The float → int cast saturates, so a zero distance gives a very tall
    /// (fully clipped) strip and an infinite one gives 0.
    #[inline]
    pub fn strip_height(&self, perp_dist: f64) -> i64 {
        ((self.tile / perp_dist) * self.plane_dist) as i64
    }

    /// Project `ray` for screen column `x` as seen by a viewer facing
    /// `view_angle`.
    pub fn project(&self, x: usize, ray: &Ray, view_angle: f64) -> Strip {
        debug_assert!(x < self.w, "column {x} outside {}-px viewport", self.w);

        // distance to the projection plane, not to the eye: no fisheye
        let perp = ray.distance * (ray.angle - view_angle).cos();
        let height = self.strip_height(perp).max(0);

        let h = self.h as i64;
        let half_h = h / 2;
        let top = (half_h - height / 2).clamp(0, h);
        let bottom = (half_h + height / 2).clamp(0, h);

        Strip {
            x,
            top: top as usize,
            bottom: bottom as usize,
            height,
            wall_u: if ray.hit_vertical { ray.hit.y } else { ray.hit.x },
            hit_vertical: ray.hit_vertical,
        }
    }

    /// Project a whole left-to-right sweep, one strip per column.
    pub fn project_all<'a>(
        &'a self,
        rays: &'a [Ray],
        view_angle: f64,
    ) -> impl Iterator<Item = Strip> + 'a {
        rays.iter()
            .enumerate()
            .map(move |(x, ray)| self.project(x, ray, view_angle))
    }
}

impl Strip {
    /// Texture column for a texture `tex_w` texels wide; tiles continuously
    /// across neighbouring wall cells.
    #[inline]
    pub fn tex_x(&self, tex_w: usize) -> usize {
        (self.wall_u as i64).rem_euclid(tex_w as i64) as usize
    }

    /// Texture row for screen row `y` (`top <= y < bottom`) of a texture
    /// `tex_h` texels tall, in a viewport `screen_h` pixels tall.
    #[inline]
    pub fn tex_y(&self, y: usize, screen_h: usize, tex_h: usize) -> usize {
        let from_top = y as i64 + self.height / 2 - (screen_h as i64) / 2;
        let v = from_top as f64 * tex_h as f64 / self.height as f64;
        (v as usize).min(tex_h - 1)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
