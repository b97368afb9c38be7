//! Geometry primitives: [`Coord`] and the grid extent [`Range`].
//!
//! Coordinates are addressed as `(row, col)`: rows grow downwards, columns
//! grow to the right. Both components are signed so that neighbour
//! arithmetic at the border simply lands out of bounds instead of wrapping.

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A grid coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a coordinate shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four orthogonal neighbours in search order: up, left, down, right.
    #[inline]
    pub const fn neighbors_4(self) -> [Coord; 4] {
        [
            self.shift(-1, 0),
            self.shift(0, -1),
            self.shift(1, 0),
            self.shift(0, 1),
        ]
    }

    /// Whether `other` is exactly one orthogonal unit step away.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

// --- trait impls for Coord ---

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Error returned when a `"row,col"` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCoordError(String);

impl fmt::Display for ParseCoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected \u{201c}row,col\u{201d}, got \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for ParseCoordError {}

impl FromStr for Coord {
    type Err = ParseCoordError;

    /// Parse `"row,col"`. Surrounding whitespace and parentheses are
    /// accepted, so the [`Display`](fmt::Display) form parses back.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordError(s.to_string());
        let inner = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');
        let (row, col) = inner.split_once(',').ok_or_else(err)?;
        let row = row.trim().parse().map_err(|_| err())?;
        let col = col.trim().parse().map_err(|_| err())?;
        Ok(Self::new(row, col))
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// The rectangle `[(0, 0), (rows, cols))` covered by a grid.
///
/// Sizes are clamped to zero, so every empty range is the default one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    rows: i32,
    cols: i32,
}

impl Range {
    #[inline]
    pub fn with_size(rows: i32, cols: i32) -> Self {
        if rows <= 0 || cols <= 0 {
            return Self::default();
        }
        Self { rows, cols }
    }

    #[inline]
    pub fn rows(self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(self, p: Coord) -> bool {
        (0..self.rows).contains(&p.row) && (0..self.cols).contains(&p.col)
    }

    /// Row-major index of `p`, if it is inside.
    #[inline]
    pub fn index_of(self, p: Coord) -> Option<usize> {
        self.contains(p)
            .then(|| p.row as usize * self.cols as usize + p.col as usize)
    }

    /// Row-major iterator over every coordinate in the range.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            cols: self.cols,
            next: 0,
            end: self.len(),
        }
    }
}

impl IntoIterator for Range {
    type Item = Coord;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// RangeIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the coordinates in a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    cols: i32,
    next: usize,
    end: usize,
}

impl Iterator for RangeIter {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        if self.next >= self.end {
            return None;
        }
        let i = self.next as i32;
        self.next += 1;
        Some(Coord::new(i / self.cols, i % self.cols))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_shift() {
        let a = Coord::new(1, 2);
        assert_eq!(a.shift(-1, 1), Coord::new(0, 3));
        assert_eq!(a.shift(-2, 0), Coord::new(-1, 2));
    }

    #[test]
    fn neighbors_are_up_left_down_right() {
        let n = Coord::new(2, 2).neighbors_4();
        assert_eq!(
            n,
            [
                Coord::new(1, 2),
                Coord::new(2, 1),
                Coord::new(3, 2),
                Coord::new(2, 3),
            ]
        );
        assert!(n.iter().all(|&p| p.is_adjacent(Coord::new(2, 2))));
        assert!(!Coord::new(0, 0).is_adjacent(Coord::new(1, 1)));
    }

    #[test]
    fn coord_ordering_is_row_major() {
        assert!(Coord::new(0, 5) < Coord::new(1, 0));
        assert!(Coord::new(1, 0) < Coord::new(1, 1));
    }

    #[test]
    fn coord_from_str() {
        assert_eq!("3,4".parse::<Coord>(), Ok(Coord::new(3, 4)));
        assert_eq!(" 0 , 7 ".parse::<Coord>(), Ok(Coord::new(0, 7)));
        assert_eq!("(2, 9)".parse::<Coord>(), Ok(Coord::new(2, 9)));
        assert!("3".parse::<Coord>().is_err());
        assert!("a,b".parse::<Coord>().is_err());
    }

    #[test]
    fn coord_display_parses_back() {
        let p = Coord::new(4, 5);
        assert_eq!(p.to_string().parse::<Coord>(), Ok(p));
    }

    #[test]
    fn range_basics() {
        let r = Range::with_size(3, 4);
        assert_eq!(r.rows(), 3);
        assert_eq!(r.cols(), 4);
        assert_eq!(r.len(), 12);
        assert!(r.contains(Coord::new(2, 3)));
        assert!(!r.contains(Coord::new(3, 0)));
        assert!(!r.contains(Coord::new(0, -1)));
    }

    #[test]
    fn range_index_of() {
        let r = Range::with_size(3, 4);
        assert_eq!(r.index_of(Coord::new(0, 0)), Some(0));
        assert_eq!(r.index_of(Coord::new(2, 1)), Some(9));
        assert_eq!(r.index_of(Coord::new(1, 4)), None);
        assert_eq!(r.index_of(Coord::new(-1, 0)), None);
    }

    #[test]
    fn range_iter_row_major() {
        let pts: Vec<_> = Range::with_size(2, 2).iter().collect();
        assert_eq!(
            pts,
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(1, 1),
            ]
        );
        let mut it = Range::with_size(3, 5).iter();
        assert_eq!(it.len(), 15);
        it.next();
        assert_eq!(it.len(), 14);
    }

    #[test]
    fn empty_range_iter() {
        assert_eq!(Range::with_size(0, 4).iter().count(), 0);
        assert_eq!(Range::with_size(-2, 4), Range::default());
    }
}
