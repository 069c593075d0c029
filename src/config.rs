//! Session-wide constants.
//!
//! Everything here is fixed once the level is loaded; the binary fills the
//! struct from defaults plus command-line overrides.

use std::f64::consts::PI;

use glam::DVec2;

use crate::{renderer::Rgba, world::GridMap};

pub const TILE_SIZE: f64 = 64.0;
pub const TARGET_FPS: usize = 30;

pub const COLOR_CEILING: Rgba = 0x333333FF;
pub const COLOR_FLOOR: Rgba = 0x777777FF;

/// Flat shades used when walls are not textured.
pub const COLOR_WALL_VERTICAL: Rgba = 0xFFFFFFFF;
pub const COLOR_WALL_HORIZONTAL: Rgba = 0xCCCCCCFF;

pub const DEFAULT_WALL_TEXTURE: &str = "redbrick";

#[derive(Clone, Debug)]
pub struct Settings {
    pub tile_size: f64,
    pub fov: f64, // horizontal, radians

    /* viewport; one ray per column */
    pub width: usize,
    pub height: usize,

    /* avatar spawn & speeds */
    pub spawn: DVec2,
    pub spawn_angle: f64,
    pub walk_speed: f64, // world units / s
    pub turn_speed: f64, // rad / s

    pub ceiling: Rgba,
    pub floor: Rgba,
    pub wall_vertical: Rgba,
    pub wall_horizontal: Rgba,

    /// `None` = flat shading.
    pub wall_texture: Option<String>,
    pub target_fps: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            fov: 60_f64.to_radians(),
            width: 20 * TILE_SIZE as usize,
            height: 13 * TILE_SIZE as usize,
            spawn: DVec2::new(10.0 * TILE_SIZE, 6.5 * TILE_SIZE),
            spawn_angle: PI,
            walk_speed: 100.0,
            turn_speed: 70_f64.to_radians(),
            ceiling: COLOR_CEILING,
            floor: COLOR_FLOOR,
            wall_vertical: COLOR_WALL_VERTICAL,
            wall_horizontal: COLOR_WALL_HORIZONTAL,
            wall_texture: Some(DEFAULT_WALL_TEXTURE.to_string()),
            target_fps: TARGET_FPS,
        }
    }
}

impl Settings {
    /// Defaults sized to `grid`: the viewport matches the map's world
    /// extent and the avatar spawns in its middle.
    pub fn for_grid(grid: &GridMap) -> Self {
        let world = grid.world_size();
        Self {
            tile_size: grid.tile_size(),
            width: world.x as usize,
            height: world.y as usize,
            spawn: world * 0.5,
            ..Self::default()
        }
    }

    /// One ray per screen column.
    #[inline]
    pub fn num_rays(&self) -> usize {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    #[test]
    fn grid_sized_settings() {
        let level = Level {
            id: "t".into(),
            map: vec![vec![1; 4]; 3],
        };
        let grid = GridMap::new(level, 32.0).unwrap();
        let s = Settings::for_grid(&grid);
        assert_eq!((s.width, s.height), (128, 96));
        assert_eq!(s.num_rays(), 128);
        assert_eq!(s.spawn, DVec2::new(64.0, 48.0));
        assert_eq!(s.tile_size, 32.0);
    }
}
