//! The [`Grid`] type: a rectangular 2D grid of [`CellState`]s.
//!
//! A `Grid` exclusively owns its cells. A search borrows it mutably for its
//! whole lifetime and paints `Start`, `Goal`, `Visited` and `Path` marks in
//! place.

use std::fmt;

use crate::cell::CellState;
use crate::geom::{Coord, Range};

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Structural errors raised by [`Grid`] access and construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The grid has no rows or no columns.
    EmptyGrid,
    /// A coordinate outside `[0, rows) × [0, cols)` was accessed.
    OutOfBounds { coord: Coord, rows: i32, cols: i32 },
    /// A row's length differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// An obstacle cell may not be overwritten.
    ObstacleLocked(Coord),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid is empty"),
            Self::OutOfBounds { coord, rows, cols } => {
                write!(f, "coordinate {coord} is outside the {rows}x{cols} grid")
            }
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid is not rectangular: row {row} has {found} cells, expected {expected}"
            ),
            Self::ObstacleLocked(coord) => write!(f, "obstacle at {coord} cannot be overwritten"),
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A rectangular grid of [`CellState`]s stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    cells: Vec<CellState>,
    bounds: Range,
}

impl Grid {
    /// Create a new `rows × cols` grid filled with `Empty`.
    pub fn new(rows: i32, cols: i32) -> Result<Self, GridError> {
        let bounds = Range::with_size(rows, cols);
        if bounds.is_empty() {
            return Err(GridError::EmptyGrid);
        }
        Ok(Self {
            cells: vec![CellState::Empty; bounds.len()],
            bounds,
        })
    }

    /// Build a grid from rows of cells.
    ///
    /// Every row must have the length of the first one. Zero rows, or rows
    /// of zero length, give [`GridError::EmptyGrid`].
    pub fn from_rows(rows: Vec<Vec<CellState>>) -> Result<Self, GridError> {
        let Some(first) = rows.first() else {
            return Err(GridError::EmptyGrid);
        };
        let width = first.len();
        if width == 0 {
            return Err(GridError::EmptyGrid);
        }
        if let Some((i, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(GridError::Ragged {
                row: i,
                expected: width,
                found: r.len(),
            });
        }
        let bounds = Range::with_size(rows.len() as i32, width as i32);
        Ok(Self {
            cells: rows.into_iter().flatten().collect(),
            bounds,
        })
    }

    /// The bounding range `[(0, 0), (rows, cols))`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn dimensions(&self) -> (i32, i32) {
        (self.bounds.rows(), self.bounds.cols())
    }

    #[inline]
    pub fn in_bounds(&self, p: Coord) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Coord) -> Result<usize, GridError> {
        self.bounds.index_of(p).ok_or(GridError::OutOfBounds {
            coord: p,
            rows: self.bounds.rows(),
            cols: self.bounds.cols(),
        })
    }

    /// Read the cell at `p`.
    pub fn get(&self, p: Coord) -> Result<CellState, GridError> {
        let i = self.index(p)?;
        Ok(self.cells[i])
    }

    /// Write the cell at `p`. Obstacles only accept `Obstacle`.
    pub fn set(&mut self, p: Coord, state: CellState) -> Result<(), GridError> {
        let i = self.index(p)?;
        let cell = &mut self.cells[i];
        if *cell == CellState::Obstacle && state != CellState::Obstacle {
            return Err(GridError::ObstacleLocked(p));
        }
        *cell = state;
        Ok(())
    }

    /// Whether a search may step onto `p`: in bounds and `Empty` or `Goal`.
    #[inline]
    pub fn is_traversable(&self, p: Coord) -> bool {
        self.get(p).is_ok_and(CellState::is_traversable)
    }

    /// Count how many cells hold `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Reset every search mark back to `Empty`, leaving obstacles alone.
    pub fn clear_search_marks(&mut self) {
        for c in self.cells.iter_mut() {
            if c.is_search_mark() {
                *c = CellState::Empty;
            }
        }
    }

    /// Iterate over the rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.bounds.cols() as usize)
    }

    /// Iterate over `(Coord, CellState)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellState)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::cell::CellState::{Empty as E, Obstacle as X};

    #[test]
    fn new_and_dimensions() {
        let g = Grid::new(3, 4).unwrap();
        assert_eq!(g.dimensions(), (3, 4));
        assert_eq!(g.count(E), 12);
        assert_eq!(Grid::new(0, 4), Err(GridError::EmptyGrid));
        assert_eq!(Grid::new(4, 0), Err(GridError::EmptyGrid));
    }

    #[test]
    fn set_and_get() {
        let mut g = Grid::new(3, 4).unwrap();
        let p = Coord::new(2, 1);
        g.set(p, CellState::Visited).unwrap();
        assert_eq!(g.get(p), Ok(CellState::Visited));
        assert_eq!(g.get(Coord::new(0, 0)), Ok(E));
    }

    #[test]
    fn out_of_bounds_is_reported() {
        let mut g = Grid::new(2, 2).unwrap();
        let oob = Coord::new(2, 0);
        assert_eq!(
            g.get(oob),
            Err(GridError::OutOfBounds {
                coord: oob,
                rows: 2,
                cols: 2
            })
        );
        assert!(g.set(Coord::new(0, -1), X).is_err());
        assert!(!g.in_bounds(Coord::new(-1, 0)));
        assert!(!g.is_traversable(oob));
    }

    #[test]
    fn from_rows_checks_shape() {
        let g = Grid::from_rows(vec![vec![E, X], vec![X, E]]).unwrap();
        assert_eq!(g.dimensions(), (2, 2));
        assert_eq!(g.get(Coord::new(0, 1)), Ok(X));
        assert_eq!(g.get(Coord::new(1, 0)), Ok(X));

        assert_eq!(Grid::from_rows(vec![]), Err(GridError::EmptyGrid));
        assert_eq!(Grid::from_rows(vec![vec![]]), Err(GridError::EmptyGrid));
        assert_eq!(
            Grid::from_rows(vec![vec![E, E], vec![E]]),
            Err(GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn obstacles_are_locked() {
        let mut g = Grid::from_rows(vec![vec![X, E]]).unwrap();
        let p = Coord::new(0, 0);
        assert_eq!(g.set(p, CellState::Visited), Err(GridError::ObstacleLocked(p)));
        assert_eq!(g.get(p), Ok(X));
        assert!(g.set(p, X).is_ok());
    }

    #[test]
    fn traversable_cells() {
        let mut g = Grid::from_rows(vec![vec![E, X, E, E]]).unwrap();
        g.set(Coord::new(0, 2), CellState::Goal).unwrap();
        g.set(Coord::new(0, 3), CellState::Visited).unwrap();
        assert!(g.is_traversable(Coord::new(0, 0)));
        assert!(!g.is_traversable(Coord::new(0, 1)));
        assert!(g.is_traversable(Coord::new(0, 2)));
        assert!(!g.is_traversable(Coord::new(0, 3)));
    }

    #[test]
    fn clear_search_marks_keeps_obstacles() {
        let mut g = Grid::from_rows(vec![vec![E, X, E]]).unwrap();
        g.set(Coord::new(0, 0), CellState::Start).unwrap();
        g.set(Coord::new(0, 2), CellState::Path).unwrap();
        g.clear_search_marks();
        assert_eq!(g.count(E), 2);
        assert_eq!(g.count(X), 1);
    }

    #[test]
    fn rows_and_iter() {
        let g = Grid::from_rows(vec![vec![E, X, E], vec![X, E, E]]).unwrap();
        let rows: Vec<_> = g.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], &[X, E, E]);
        let items: Vec<_> = g.iter().collect();
        assert_eq!(items.len(), 6);
        assert_eq!(items[3], (Coord::new(1, 0), X));
    }
}
