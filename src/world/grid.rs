use glam::DVec2;

use crate::level::{Level, LevelError};

/// Content code stored in one grid cell: 0 = open floor, anything else is
/// a wall variant.
pub type Content = u32;

pub const EMPTY: Content = 0;

/// Content reported for a wall probe that lands outside the grid (the
/// implicit solid border around every map).
pub const BOUNDARY: Content = Content::MAX;

/// Immutable tile grid.
///
/// Cell `(row, col)` covers the world rectangle
/// `[col·tile, (col+1)·tile) × [row·tile, (row+1)·tile)`.
#[derive(Clone, Debug)]
pub struct GridMap {
    id: String,
    rows: usize,
    cols: usize,
    tile: f64,
    cells: Vec<Content>, // row-major
}

impl GridMap {
    /// Validate `level` (non-empty, rectangular) and flatten it.
    pub fn new(level: Level, tile_size: f64) -> Result<Self, LevelError> {
        let rows = level.map.len();
        let cols = level.map.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(LevelError::Empty);
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in level.map.into_iter().enumerate() {
            if line.len() != cols {
                return Err(LevelError::Ragged {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            cells.extend(line);
        }

        Ok(Self {
            id: level.id,
            rows,
            cols,
            tile: tile_size,
            cells,
        })
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn tile_size(&self) -> f64 {
        self.tile
    }

    /// World extent `(cols·tile, rows·tile)`.
    #[inline]
    pub fn world_size(&self) -> DVec2 {
        DVec2::new(self.cols as f64 * self.tile, self.rows as f64 * self.tile)
    }

    /// Raw content of `(row, col)`.
    ///
    /// Callers validate the coordinates; out-of-range panics.
    #[inline]
    pub fn content(&self, row: usize, col: usize) -> Content {
        debug_assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        self.cells[row * self.cols + col]
    }

    /// Cell containing world point `(x, y)`, or `None` outside the map.
    #[inline]
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let size = self.world_size();
        if !(0.0..size.x).contains(&x) || !(0.0..size.y).contains(&y) {
            return None;
        }
        let col = (x / self.tile).floor() as usize;
        let row = (y / self.tile).floor() as usize;
        Some((row.min(self.rows - 1), col.min(self.cols - 1)))
    }

    /// Solid test used by both the caster and collision.
    /// Anything outside the map counts as wall.
    #[inline]
    pub fn has_wall_at(&self, x: f64, y: f64) -> bool {
        match self.cell_at(x, y) {
            Some((row, col)) => self.content(row, col) != EMPTY,
            None => true,
        }
    }

    /// Content of the wall at `(x, y)`; [`BOUNDARY`] outside the map.
    #[inline]
    pub fn wall_content_at(&self, x: f64, y: f64) -> Content {
        self.cell_at(x, y)
            .map_or(BOUNDARY, |(row, col)| self.content(row, col))
    }
}

/// Open `inner × inner` room enclosed by a one-cell ring of `wall`
/// (64-unit tiles).
#[cfg(test)]
pub(crate) fn bordered(inner: usize, wall: Content) -> GridMap {
    let n = inner + 2;
    let map = (0..n)
        .map(|r| {
            (0..n)
                .map(|c| {
                    if r == 0 || c == 0 || r == n - 1 || c == n - 1 {
                        wall
                    } else {
                        EMPTY
                    }
                })
                .collect()
        })
        .collect();
    GridMap::new(Level { id: "box".into(), map }, 64.0).unwrap()
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_ragged() {
        let empty = Level {
            id: "e".into(),
            map: vec![],
        };
        assert!(matches!(GridMap::new(empty, 64.0), Err(LevelError::Empty)));

        let no_cols = Level {
            id: "e".into(),
            map: vec![vec![]],
        };
        assert!(matches!(GridMap::new(no_cols, 64.0), Err(LevelError::Empty)));

        let ragged = Level {
            id: "r".into(),
            map: vec![vec![1, 1, 1], vec![1, 0]],
        };
        match GridMap::new(ragged, 64.0) {
            Err(LevelError::Ragged {
                row,
                expected,
                found,
            }) => assert_eq!((row, expected, found), (1, 3, 2)),
            other => panic!("expected ragged error, got {other:?}"),
        }
    }

    #[test]
    fn content_is_row_major() {
        let level = Level {
            id: "rm".into(),
            map: vec![vec![1, 2, 3], vec![4, 5, 6]],
        };
        let grid = GridMap::new(level, 10.0).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        assert_eq!(grid.content(0, 2), 3);
        assert_eq!(grid.content(1, 0), 4);
        assert_eq!(grid.id(), "rm");
    }

    #[test]
    fn wall_lookup_uses_floor_division() {
        let grid = bordered(3, 7);
        // (1,1) is open, (0,1) is wall
        assert!(!grid.has_wall_at(64.0, 64.0));
        assert!(!grid.has_wall_at(127.9, 127.9));
        assert!(grid.has_wall_at(64.0, 63.9));
        assert_eq!(grid.wall_content_at(100.0, 10.0), 7);
    }

    #[test]
    fn outside_world_is_solid() {
        let grid = bordered(3, 0); // no visible walls at all
        let size = grid.world_size();
        assert!(!grid.has_wall_at(0.0, 0.0));
        for (x, y) in [
            (-0.001, 10.0),
            (10.0, -0.001),
            (size.x, 10.0),
            (10.0, size.y),
            (size.x + 500.0, size.y + 500.0),
            (-1e9, -1e9),
        ] {
            assert!(grid.has_wall_at(x, y), "({x}, {y}) should be solid");
            assert_eq!(grid.wall_content_at(x, y), BOUNDARY);
        }
    }
}
