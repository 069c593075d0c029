//! Grid-DDA ray caster.
//!
//! A ray is marched twice: once over the horizontal grid lines it crosses
//! (y = k·tile) and once over the vertical ones (x = k·tile). Each march
//! visits the crossings nearest-first and stops at the first wall, so no
//! cell is skipped or probed twice; the nearer of the two hits wins.

use glam::DVec2;

use super::ray::{Facing, Ray};
use crate::world::{Content, GridMap};

/// A ray whose direction component across the swept lines is below this
/// never crosses them (tan would be 0 or ∞).
const PARALLEL_EPS: f64 = 1e-12;

/// Wall found by one sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Hit {
    point: DVec2,
    content: Content,
}

/*──────────────────────── candidate crossings ────────────────────────*/

/// Lazy, nearest-first sequence of grid-line crossings.
///
/// One step component is always ±tile, so the sequence leaves
/// `[0, W] × [0, H]` after at most `max(cols, rows) + 1` items.
struct Crossings {
    next: DVec2,
    step: DVec2,
    bounds: DVec2,
}

impl Crossings {
    fn new(first: DVec2, step: DVec2, bounds: DVec2) -> Self {
        debug_assert!(step.is_finite(), "non-finite DDA step {step}");
        Self {
            next: first,
            step,
            bounds,
        }
    }
}

impl Iterator for Crossings {
    type Item = DVec2;

    fn next(&mut self) -> Option<DVec2> {
        let p = self.next;
        let inside = (0.0..=self.bounds.x).contains(&p.x) && (0.0..=self.bounds.y).contains(&p.y);
        if !inside {
            return None;
        }
        self.next += self.step;
        Some(p)
    }
}

/// First crossing whose probe point (`crossing + nudge`) is solid.
///
/// The crossing itself lies exactly on a grid line; `nudge` pushes it into
/// the cell being entered.
fn first_wall(grid: &GridMap, mut crossings: Crossings, nudge: DVec2) -> Option<Hit> {
    crossings.find_map(|point| {
        let probe = point + nudge;
        grid.has_wall_at(probe.x, probe.y).then(|| Hit {
            point,
            content: grid.wall_content_at(probe.x, probe.y),
        })
    })
}

/*──────────────────────────── sweeps ─────────────────────────────────*/

/// Crossings of horizontal grid lines (`y = k·tile`).
fn horizontal_sweep(grid: &GridMap, origin: DVec2, angle: f64, facing: Facing) -> Option<Hit> {
    if angle.sin().abs() < PARALLEL_EPS {
        return None;
    }
    let tile = grid.tile_size();
    let tan = angle.tan();

    let mut y0 = (origin.y / tile).floor() * tile;
    if facing.down() {
        y0 += tile;
    }
    let x0 = origin.x + (y0 - origin.y) / tan;

    let mut step = DVec2::new(tile / tan, tile);
    if facing.up() {
        step.y = -step.y;
    }
    if (facing.left() && step.x > 0.0) || (facing.right() && step.x < 0.0) {
        step.x = -step.x;
    }

    let nudge = if facing.up() { DVec2::NEG_Y } else { DVec2::ZERO };
    first_wall(
        grid,
        Crossings::new(DVec2::new(x0, y0), step, grid.world_size()),
        nudge,
    )
}

/// Crossings of vertical grid lines (`x = k·tile`).
fn vertical_sweep(grid: &GridMap, origin: DVec2, angle: f64, facing: Facing) -> Option<Hit> {
    if angle.cos().abs() < PARALLEL_EPS {
        return None;
    }
    let tile = grid.tile_size();
    let tan = angle.tan();

    let mut x0 = (origin.x / tile).floor() * tile;
    if facing.right() {
        x0 += tile;
    }
    let y0 = origin.y + (x0 - origin.x) * tan;

    let mut step = DVec2::new(tile, tile * tan);
    if facing.left() {
        step.x = -step.x;
    }
    if (facing.up() && step.y > 0.0) || (facing.down() && step.y < 0.0) {
        step.y = -step.y;
    }

    let nudge = if facing.left() { DVec2::NEG_X } else { DVec2::ZERO };
    first_wall(
        grid,
        Crossings::new(DVec2::new(x0, y0), step, grid.world_size()),
        nudge,
    )
}

/// Pick the nearer sweep result: `(hit, distance, hit_vertical)`.
///
/// The horizontal hit must be *strictly* nearer; on an exact tie the
/// vertical hit wins.
fn nearest(origin: DVec2, horz: Option<Hit>, vert: Option<Hit>) -> Option<(Hit, f64, bool)> {
    let dist = |h: Option<Hit>| h.map_or(f64::INFINITY, |h| origin.distance(h.point));
    let (horz_dist, vert_dist) = (dist(horz), dist(vert));

    if horz_dist < vert_dist {
        horz.map(|h| (h, horz_dist, false))
    } else {
        vert.map(|h| (h, vert_dist, true))
    }
}

/*====================================================================*/
/*                       Public API                                   */
/*====================================================================*/

/// Cast one ray from `origin` along `angle` (any real value).
pub fn cast_ray(grid: &GridMap, origin: DVec2, angle: f64) -> Ray {
    let mut ray = Ray::new(angle);

    let horz = horizontal_sweep(grid, origin, ray.angle, ray.facing);
    let vert = vertical_sweep(grid, origin, ray.angle, ray.facing);

    if let Some((hit, distance, vertical)) = nearest(origin, horz, vert) {
        ray.hit = hit.point;
        ray.distance = distance;
        ray.hit_vertical = vertical;
        ray.content = hit.content;
    }
    ray
}

/// Cast `num_rays` rays spread evenly over `fov`, left to right, centred
/// on `view_angle`. `out` is cleared and refilled (one ray per column).
pub fn cast_fan(
    grid: &GridMap,
    origin: DVec2,
    view_angle: f64,
    fov: f64,
    num_rays: usize,
    out: &mut Vec<Ray>,
) {
    out.clear();
    let first = view_angle - fov * 0.5;
    let step = fov / num_rays as f64;
    out.extend((0..num_rays).map(|column| cast_ray(grid, origin, first + column as f64 * step)));
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
