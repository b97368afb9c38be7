//! Random board generation.
//!
//! Boards are filled cell by cell: each cell becomes an obstacle with
//! probability `obstacle_pct`. Coordinates passed as `keep_clear` (usually
//! the start and goal) are always left open.

use log::debug;
use rand::Rng;

use crate::cell::CellState;
use crate::geom::Coord;
use crate::grid::{Grid, GridError};

/// Board generator driven by a caller-supplied RNG.
pub struct BoardGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> BoardGen<R> {
    /// Create a new generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a `rows × cols` board.
    ///
    /// `obstacle_pct` is clamped to `[0, 1]`. Out-of-range `keep_clear`
    /// entries are ignored.
    pub fn generate(
        &mut self,
        rows: i32,
        cols: i32,
        obstacle_pct: f64,
        keep_clear: &[Coord],
    ) -> Result<Grid, GridError> {
        let mut grid = Grid::new(rows, cols)?;
        let pct = obstacle_pct.clamp(0.0, 1.0);
        let mut placed = 0usize;

        for p in grid.bounds().iter() {
            if keep_clear.contains(&p) {
                continue;
            }
            let r: f64 = self.rng.random();
            if r < pct {
                grid.set(p, CellState::Obstacle)?;
                placed += 1;
            }
        }

        debug!("generated {rows}x{cols} board with {placed} obstacles");
        Ok(grid)
    }
}
