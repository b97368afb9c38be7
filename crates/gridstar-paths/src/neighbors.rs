use gridstar_core::Coord;

/// Cached neighbour computation helper.
///
/// Enumerates the four orthogonal neighbours of a cell, filtered by a
/// predicate, reusing one buffer across calls.
#[derive(Debug)]
pub struct Neighbors {
    buf: Vec<Coord>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the orthogonal neighbours of `p` in the order up, left, down,
    /// right, keeping only those for which `keep` returns `true`.
    ///
    /// The order is part of the search's tie-breaking and must not change.
    pub fn cardinal(&mut self, p: Coord, keep: impl Fn(Coord) -> bool) -> &[Coord] {
        self.buf.clear();
        for n in p.neighbors_4() {
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_order() {
        let mut nb = Neighbors::new();
        let got = nb.cardinal(Coord::new(1, 1), |_| true).to_vec();
        assert_eq!(
            got,
            vec![
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(2, 1),
                Coord::new(1, 2),
            ]
        );
    }

    #[test]
    fn cardinal_filters() {
        let mut nb = Neighbors::new();
        let got = nb.cardinal(Coord::new(0, 0), |p| p.row >= 0 && p.col >= 0);
        assert_eq!(got, &[Coord::new(1, 0), Coord::new(0, 1)]);
    }
}
