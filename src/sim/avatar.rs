use glam::DVec2;

use crate::{config::Settings, engine::normalize_angle, world::GridMap};

/// Signed input axis: one of −1, 0, +1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Intent {
    Negative,
    #[default]
    Idle,
    Positive,
}

impl Intent {
    /// Combine two opposing buttons.
    pub fn from_keys(negative: bool, positive: bool) -> Self {
        match (negative, positive) {
            (true, false) => Intent::Negative,
            (false, true) => Intent::Positive,
            _ => Intent::Idle,
        }
    }

    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Intent::Negative => -1.0,
            Intent::Idle => 0.0,
            Intent::Positive => 1.0,
        }
    }
}

/// The viewer. Position is continuous in world units, angle in radians
/// (0 = east, growing clockwise on screen because y points down).
#[derive(Clone, Debug)]
pub struct Avatar {
    pub pos: DVec2,
    /// Half-extents; collision currently treats the avatar as a point.
    pub size: DVec2,
    angle: f64,

    /// +1 turns clockwise (right), −1 counter-clockwise.
    pub turn: Intent,
    /// +1 walks forward, −1 backward.
    pub walk: Intent,

    pub walk_speed: f64, // world units / s
    pub turn_speed: f64, // rad / s
}

impl Avatar {
    pub fn new(pos: DVec2, angle: f64, walk_speed: f64, turn_speed: f64) -> Self {
        Self {
            pos,
            size: DVec2::ONE,
            angle: normalize_angle(angle),
            turn: Intent::Idle,
            walk: Intent::Idle,
            walk_speed,
            turn_speed,
        }
    }

    pub fn from_settings(s: &Settings) -> Self {
        Self::new(s.spawn, s.spawn_angle, s.walk_speed, s.turn_speed)
    }

    /// Facing angle, always in `[0, 2π)`.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Unit vector the avatar is looking along.
    #[inline]
    pub fn forward(&self) -> DVec2 {
        DVec2::from_angle(self.angle)
    }

    /// Advance `dt` seconds.
    ///
    /// The turn always applies. The step is taken whole or not at all:
    /// if the destination point is inside a wall the avatar stays put (no
    /// sliding along walls).
    pub fn update(&mut self, dt: f64, grid: &GridMap) {
        self.angle = normalize_angle(self.angle + self.turn.sign() * self.turn_speed * dt);

        let step = self.walk.sign() * self.walk_speed * dt;
        if step == 0.0 {
            return;
        }
        let target = self.pos + self.forward() * step;
        if !grid.has_wall_at(target.x, target.y) {
            self.pos = target;
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
