use std::f64::consts::{FRAC_PI_2, PI, TAU};

use bitflags::bitflags;
use glam::DVec2;

use crate::world::Content;

/// Wrap any finite angle into `[0, 2π)`.
///
/// `%` is the truncated (sign-of-dividend) remainder, so large and negative
/// inputs reduce in one step; a negative remainder is lifted by one turn.
/// Values already in range pass through untouched, which makes the
/// function idempotent.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut r = angle % TAU;
    if r < 0.0 {
        r += TAU;
    }
    // -ε + 2π can round up to exactly 2π
    if r >= TAU { 0.0 } else { r }
}

bitflags! {
    /// Which way a ray points in screen space (y grows downwards).
    /// Up / left are the absence of DOWN / RIGHT.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Facing: u8 {
        const DOWN  = 0b01;
        const RIGHT = 0b10;
    }
}

impl Facing {
    /// Classify a **normalized** angle.
    ///
    /// Strict inequalities: 0 and π count as up, π/2 and 3π/2 as left.
    #[inline]
    pub fn of(angle: f64) -> Self {
        let mut f = Facing::empty();
        if angle > 0.0 && angle < PI {
            f |= Facing::DOWN;
        }
        if angle < FRAC_PI_2 || angle > 3.0 * FRAC_PI_2 {
            f |= Facing::RIGHT;
        }
        f
    }

    #[inline]
    pub fn down(self) -> bool {
        self.contains(Facing::DOWN)
    }

    #[inline]
    pub fn up(self) -> bool {
        !self.down()
    }

    #[inline]
    pub fn right(self) -> bool {
        self.contains(Facing::RIGHT)
    }

    #[inline]
    pub fn left(self) -> bool {
        !self.right()
    }
}

/// Result of casting one ray. Rebuilt from scratch every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub angle: f64, // normalized
    pub facing: Facing,
    pub hit: DVec2,
    /// Euclidean distance origin → hit; `INFINITY` if nothing was hit.
    pub distance: f64,
    /// Hit a vertical grid line (x = const) rather than a horizontal one.
    pub hit_vertical: bool,
    pub content: Content,
}

impl Ray {
    /// Un-hit ray pointing along `angle` (any real value).
    pub fn new(angle: f64) -> Self {
        let angle = normalize_angle(angle);
        Self {
            angle,
            facing: Facing::of(angle),
            hit: DVec2::ZERO,
            distance: f64::INFINITY,
            hit_vertical: false,
            content: 0,
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.distance.is_finite()
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
