//! A* search over gridstar grids.
//!
//! The pieces, leaves first:
//!
//! - [`Heuristic`] / [`Manhattan`]: remaining-cost estimate
//! - [`Frontier`]: open set ordered by `g + h`, latest insertion first
//!   among ties
//! - [`Neighbors`]: orthogonal neighbour enumeration in a fixed order
//! - [`AstarSearch`]: the search state machine, which paints its progress
//!   into the borrowed [`Grid`](gridstar_core::Grid)
//!
//! [`find_path`] runs a search with the default configuration.

mod frontier;
mod heuristic;
mod neighbors;
mod search;

pub use frontier::{EmptyFrontier, Frontier, SearchNode};
pub use heuristic::{Heuristic, Manhattan, manhattan};
pub use neighbors::Neighbors;
pub use search::{
    AstarSearch, Closing, PathMarking, Route, SearchConfig, SearchError, SearchOutcome,
    SearchReport, SearchState, find_path,
};
