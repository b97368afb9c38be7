use gridstar_core::Coord;

/// Manhattan (L1) distance between two coordinates.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

/// Estimate of the remaining cost between two cells.
///
/// Must never overestimate the true cost (admissible) and must satisfy
/// `estimate(a, goal) <= 1 + estimate(b, goal)` for adjacent `a`, `b`
/// (consistent).
pub trait Heuristic {
    fn estimate(&self, from: Coord, to: Coord) -> i32;
}

/// Manhattan distance, exact on an open 4-connected grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    #[inline]
    fn estimate(&self, from: Coord, to: Coord) -> i32 {
        manhattan(from, to)
    }
}

impl<F: Fn(Coord, Coord) -> i32> Heuristic for F {
    #[inline]
    fn estimate(&self, from: Coord, to: Coord) -> i32 {
        self(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstar_core::Range;

    #[test]
    fn manhattan_values() {
        assert_eq!(manhattan(Coord::new(0, 0), Coord::new(4, 5)), 9);
        assert_eq!(manhattan(Coord::new(4, 5), Coord::new(0, 0)), 9);
        assert_eq!(manhattan(Coord::new(2, 2), Coord::new(2, 2)), 0);
        assert_eq!(manhattan(Coord::new(-1, 3), Coord::new(1, 0)), 5);
    }

    #[test]
    fn manhattan_is_consistent() {
        let goal = Coord::new(3, 1);
        for p in Range::with_size(6, 6) {
            let h = Manhattan.estimate(p, goal);
            assert!(h >= 0);
            for n in p.neighbors_4() {
                assert!(h <= 1 + Manhattan.estimate(n, goal));
            }
        }
    }

    #[test]
    fn closures_are_heuristics() {
        let zero = |_: Coord, _: Coord| 0;
        assert_eq!(zero.estimate(Coord::new(0, 0), Coord::new(9, 9)), 0);
    }
}
