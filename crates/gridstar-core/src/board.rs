//! Text encoding of boards.
//!
//! A board file has one line per row. Every cell is a decimal integer
//! followed by a comma, e.g. `0,1,0,0,`. The value `1` is an obstacle, any
//! other integer is open ground.
//!
//! Reading a line stops at the first cell that is not an integer followed
//! by a comma, so a malformed line yields a short row. What happens to short
//! rows is decided by [`RaggedPolicy`].

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::cell::CellState;
use crate::grid::{Grid, GridError};

/// How rows of unequal length are handled when building a [`Grid`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RaggedPolicy {
    /// Fail with [`GridError::Ragged`].
    #[default]
    Reject,
    /// Cut every row down to the length of the shortest one.
    Truncate,
}

/// Errors that can occur when loading a board.
#[derive(Debug)]
pub enum BoardError {
    /// The board file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The decoded rows do not form a valid grid.
    Grid(GridError),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read board {}: {source}", path.display())
            }
            Self::Grid(e) => write!(f, "invalid board: {e}"),
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Grid(e) => Some(e),
        }
    }
}

impl From<GridError> for BoardError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Decode one line into cells.
///
/// Only comma-terminated integers count; decoding stops at the first
/// segment that is not an integer, and whatever follows the last comma is
/// ignored.
pub fn parse_line(line: &str) -> Vec<CellState> {
    let mut segments: Vec<&str> = line.split(',').collect();
    // The tail after the last comma is never comma-terminated.
    segments.pop();
    segments
        .into_iter()
        .map_while(|s| s.trim().parse::<i64>().ok())
        .map(CellState::from_board_value)
        .collect()
}

/// Decode a whole board.
pub fn parse_board(text: &str, policy: RaggedPolicy) -> Result<Grid, BoardError> {
    let mut rows: Vec<Vec<CellState>> = text.lines().map(parse_line).collect();
    debug!("decoded {} board rows", rows.len());

    if policy == RaggedPolicy::Truncate {
        let shortest = rows.iter().map(Vec::len).min().unwrap_or(0);
        let longest = rows.iter().map(Vec::len).max().unwrap_or(0);
        if shortest != longest {
            warn!("ragged board: truncating rows from up to {longest} to {shortest} cells");
            for r in rows.iter_mut() {
                r.truncate(shortest);
            }
        }
    }

    Ok(Grid::from_rows(rows)?)
}

/// Read and decode a board file.
pub fn load_board(path: impl AsRef<Path>, policy: RaggedPolicy) -> Result<Grid, BoardError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| BoardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_board(&text, policy)
}

/// Encode a grid back into board text. Obstacles become `1`, every other
/// state becomes `0`.
pub fn encode_board(grid: &Grid) -> String {
    let mut out = String::new();
    for row in grid.rows() {
        for &c in row {
            out.push(if c == CellState::Obstacle { '1' } else { '0' });
            out.push(',');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Coord;

    use crate::cell::CellState::{Empty as E, Obstacle as X};

    const BOARD: &str = "\
0,1,0,0,0,0,
0,1,0,0,0,0,
0,1,0,0,0,0,
0,1,0,0,0,0,
0,0,0,0,1,0,
";

    #[test]
    fn parses_reference_board() {
        let g = parse_board(BOARD, RaggedPolicy::Reject).unwrap();
        assert_eq!(g.dimensions(), (5, 6));
        assert_eq!(g.count(X), 5);
        assert_eq!(g.get(Coord::new(0, 1)), Ok(X));
        assert_eq!(g.get(Coord::new(4, 4)), Ok(X));
        assert_eq!(g.get(Coord::new(4, 1)), Ok(E));
    }

    #[test]
    fn line_requires_trailing_comma() {
        assert_eq!(parse_line("0,1,0,"), vec![E, X, E]);
        assert_eq!(parse_line("0,1,0"), vec![E, X]);
        assert_eq!(parse_line(""), vec![]);
    }

    #[test]
    fn line_stops_at_first_bad_token() {
        assert_eq!(parse_line("0,1,a,0,"), vec![E, X]);
        assert_eq!(parse_line("0,1 1,0,"), vec![E]);
        assert_eq!(parse_line(" 0 , 1 ,\r"), vec![E, X]);
        assert_eq!(parse_line("2,-1,"), vec![E, E]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = parse_board("0,0,0,\n0,x,0,\n", RaggedPolicy::Reject).unwrap_err();
        assert!(matches!(
            err,
            BoardError::Grid(GridError::Ragged {
                row: 1,
                expected: 3,
                found: 1
            })
        ));
    }

    #[test]
    fn ragged_rows_can_be_truncated() {
        let g = parse_board("0,1,0,\n1,0,\n0,0,1,\n", RaggedPolicy::Truncate).unwrap();
        assert_eq!(g.dimensions(), (3, 2));
        assert_eq!(g.get(Coord::new(1, 0)), Ok(X));
        assert_eq!(g.get(Coord::new(2, 1)), Ok(E));
    }

    #[test]
    fn empty_board_is_rejected() {
        assert!(matches!(
            parse_board("", RaggedPolicy::Reject),
            Err(BoardError::Grid(GridError::EmptyGrid))
        ));
        assert!(matches!(
            parse_board("0,0,\nbad\n", RaggedPolicy::Truncate),
            Err(BoardError::Grid(GridError::EmptyGrid))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_board("/nonexistent/gridstar/board.txt", RaggedPolicy::Reject).unwrap_err();
        assert!(matches!(err, BoardError::Io { .. }));
        assert!(err.to_string().contains("board.txt"));
    }

    #[test]
    fn encode_matches_input() {
        let mut g = parse_board(BOARD, RaggedPolicy::Reject).unwrap();
        g.set(Coord::new(0, 0), CellState::Path).unwrap();
        assert_eq!(encode_board(&g), BOARD);
    }
}
