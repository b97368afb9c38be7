//! The [`CellState`] type: what a single grid cell currently holds.

use std::fmt;

/// State of one grid cell.
///
/// `Obstacle` comes from the board encoding and never changes during a
/// search. `Start` and `Goal` are placed when a search begins. Within one
/// search a cell only moves forward: `Empty → Visited → Path`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Obstacle,
    /// Closed by the search (enqueued or expanded).
    Visited,
    /// On the reported route.
    Path,
    Start,
    Goal,
}

impl CellState {
    /// Every variant, in declaration order.
    pub const ALL: [CellState; 6] = [
        CellState::Empty,
        CellState::Obstacle,
        CellState::Visited,
        CellState::Path,
        CellState::Start,
        CellState::Goal,
    ];

    /// Whether a search may step onto a cell in this state.
    #[inline]
    pub const fn is_traversable(self) -> bool {
        matches!(self, CellState::Empty | CellState::Goal)
    }

    /// Whether this state was written by a search (as opposed to the board).
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(
            self,
            CellState::Visited | CellState::Path | CellState::Start | CellState::Goal
        )
    }

    /// Decode a board value: `1` is an obstacle, anything else is open.
    #[inline]
    pub const fn from_board_value(v: i64) -> Self {
        if v == 1 {
            CellState::Obstacle
        } else {
            CellState::Empty
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellState::Empty => "empty",
            CellState::Obstacle => "obstacle",
            CellState::Visited => "visited",
            CellState::Path => "path",
            CellState::Start => "start",
            CellState::Goal => "goal",
        };
        f.write_str(name)
    }
}
