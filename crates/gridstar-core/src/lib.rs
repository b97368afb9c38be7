//! **gridstar-core**: grid primitives for gridstar.
//!
//! This crate provides the types shared by the search and rendering
//! crates: row/column coordinates, rectangular bounds, the [`CellState`]
//! enumeration, the owned [`Grid`], the comma-separated board encoding and
//! a seeded random board generator.

pub mod board;
pub mod cell;
pub mod geom;
pub mod grid;
pub mod mapgen;

pub use board::{BoardError, RaggedPolicy, encode_board, load_board, parse_board};
pub use cell::CellState;
pub use geom::{Coord, ParseCoordError, Range};
pub use grid::{Grid, GridError};
pub use mapgen::BoardGen;
