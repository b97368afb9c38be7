//! The A* search engine.
//!
//! [`AstarSearch`] borrows a [`Grid`] mutably for its whole lifetime and
//! walks the state machine `Initialized → Running → {Succeeded, Exhausted}`.
//!
//! By default cells are closed as soon as they are inserted into the
//! frontier ([`Closing::OnInsert`]), so each coordinate is enqueued at most
//! once and keeps the cost of the first predecessor that reached it. With
//! [`Closing::OnExpand`] a queued cell can still be reached more cheaply
//! until it is expanded, which guarantees shortest routes.
//!
//! The grid keeps one `Start` and one `Goal` cell; every other discovered
//! cell is painted `Visited`, and on success the interior of the route is
//! painted `Path`.

use std::fmt;

use gridstar_core::{CellState, Coord, Grid, GridError};
use log::{debug, trace};

use crate::frontier::{EmptyFrontier, Frontier, SearchNode};
use crate::heuristic::{Heuristic, Manhattan};
use crate::neighbors::Neighbors;

const NO_PARENT: usize = usize::MAX;
const UNREACHED: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Configuration and results
// ---------------------------------------------------------------------------

/// Lifecycle of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    Initialized,
    Running,
    Succeeded,
    Exhausted,
}

impl SearchState {
    /// Whether the search has stopped.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchState::Succeeded | SearchState::Exhausted)
    }
}

/// Which cells are reported (and painted) as the route on success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathMarking {
    /// The parent chain from start to goal.
    #[default]
    ShortestRoute,
    /// Every cell popped from the frontier, in pop order, up to the goal.
    ExpansionTrail,
}

/// When a discovered cell stops accepting cheaper predecessors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Closing {
    /// Closed when first inserted; the first predecessor wins even if a
    /// cheaper one is found later.
    #[default]
    OnInsert,
    /// Closed when expanded; queued cells are re-queued whenever a cheaper
    /// predecessor turns up.
    OnExpand,
}

/// Tunables for one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchConfig {
    pub marking: PathMarking,
    pub closing: Closing,
    /// Upper bound on expanded nodes; `None` means unbounded.
    pub max_expansions: Option<usize>,
}

/// A found route.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Cells from start to goal, both included.
    pub path: Vec<Coord>,
    /// Number of unit steps from start to goal.
    pub cost: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    Found(Route),
    NotFound,
}

impl SearchOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            SearchOutcome::Found(r) => Some(r),
            SearchOutcome::NotFound => None,
        }
    }
}

/// Everything a finished search has to say.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchReport {
    pub start: Coord,
    pub goal: Coord,
    pub state: SearchState,
    pub outcome: SearchOutcome,
    /// Coordinates in the order they were popped from the frontier.
    pub expanded: Vec<Coord>,
    /// Number of nodes ever inserted into the frontier.
    pub discovered: usize,
}

/// Errors that stop a search before it reaches a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The start is off the grid or an obstacle.
    InvalidStart(Coord),
    /// The goal is off the grid or an obstacle.
    InvalidGoal(Coord),
    /// `max_expansions` was reached before a verdict.
    BudgetExceeded { expansions: usize },
    Grid(GridError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStart(p) => write!(f, "invalid start {p}: off the grid or blocked"),
            Self::InvalidGoal(p) => write!(f, "invalid goal {p}: off the grid or blocked"),
            Self::BudgetExceeded { expansions } => {
                write!(f, "search stopped after {expansions} expansions")
            }
            Self::Grid(e) => write!(f, "grid error during search: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ---------------------------------------------------------------------------
// AstarSearch
// ---------------------------------------------------------------------------

/// Per-cell bookkeeping, indexed row-major like the grid.
#[derive(Clone, Copy)]
struct Slot {
    parent: usize,
    g: i32,
    expanded: bool,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            parent: NO_PARENT,
            g: UNREACHED,
            expanded: false,
        }
    }
}

impl Slot {
    #[inline]
    fn discovered(&self) -> bool {
        self.g != UNREACHED
    }
}

/// One A* search over a borrowed grid.
pub struct AstarSearch<'g, H: Heuristic = Manhattan> {
    grid: &'g mut Grid,
    heuristic: H,
    config: SearchConfig,
    start: Coord,
    goal: Coord,
    cols: usize,
    frontier: Frontier,
    slots: Vec<Slot>,
    nbuf: Neighbors,
    expanded: Vec<Coord>,
    discovered: usize,
    state: SearchState,
    outcome: Option<SearchOutcome>,
}

impl<'g> AstarSearch<'g, Manhattan> {
    /// Prepare a search with the Manhattan heuristic and default config.
    pub fn new(grid: &'g mut Grid, start: Coord, goal: Coord) -> Result<Self, SearchError> {
        Self::with_config(grid, start, goal, Manhattan, SearchConfig::default())
    }
}

impl<'g, H: Heuristic> AstarSearch<'g, H> {
    /// Prepare a search.
    ///
    /// Fails with [`SearchError::InvalidStart`] / [`SearchError::InvalidGoal`]
    /// without touching the grid if either endpoint is off the grid or an
    /// obstacle. Otherwise marks `Start` and `Goal` (the goal wins when they
    /// coincide) and seeds the frontier with the start node.
    pub fn with_config(
        grid: &'g mut Grid,
        start: Coord,
        goal: Coord,
        heuristic: H,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        if !matches!(grid.get(start), Ok(s) if s != CellState::Obstacle) {
            return Err(SearchError::InvalidStart(start));
        }
        if !matches!(grid.get(goal), Ok(s) if s != CellState::Obstacle) {
            return Err(SearchError::InvalidGoal(goal));
        }

        grid.set(start, CellState::Start)?;
        grid.set(goal, CellState::Goal)?;

        let (_, cols) = grid.dimensions();
        let len = grid.bounds().len();
        let mut search = Self {
            grid,
            heuristic,
            config,
            start,
            goal,
            cols: cols as usize,
            frontier: Frontier::new(),
            slots: vec![Slot::default(); len],
            nbuf: Neighbors::new(),
            expanded: Vec::new(),
            discovered: 0,
            state: SearchState::Initialized,
            outcome: None,
        };

        let h = search.heuristic.estimate(start, goal);
        search.frontier.insert(SearchNode { coord: start, g: 0, h });
        search.discovered = 1;
        let si = search.idx(start);
        search.slots[si].g = 0;

        debug!("search {start} -> {goal} initialized, h = {h}");
        Ok(search)
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Coord {
        self.goal
    }

    /// Coordinates popped so far, in order.
    #[inline]
    pub fn expanded(&self) -> &[Coord] {
        &self.expanded
    }

    /// Number of nodes waiting in the frontier.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// The verdict, once the search is terminal.
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    /// Read-only view of the grid being searched.
    pub fn grid(&self) -> &Grid {
        self.grid
    }

    #[inline]
    fn idx(&self, p: Coord) -> usize {
        p.row as usize * self.cols + p.col as usize
    }

    #[inline]
    fn point(&self, i: usize) -> Coord {
        Coord::new((i / self.cols) as i32, (i % self.cols) as i32)
    }

    /// Whether `p` should be (re-)queued with cost `g`.
    fn admits(&self, p: Coord, g: i32) -> bool {
        if !self.grid.in_bounds(p) {
            return false;
        }
        let slot = &self.slots[self.idx(p)];
        match self.config.closing {
            Closing::OnInsert => !slot.discovered() && self.grid.is_traversable(p),
            Closing::OnExpand => {
                !slot.expanded
                    && g < slot.g
                    && (slot.discovered() || self.grid.is_traversable(p))
            }
        }
    }

    /// Paint `p` as closed unless it carries the start or goal marker.
    fn paint(&mut self, p: Coord, state: CellState) -> Result<(), GridError> {
        match self.grid.get(p)? {
            CellState::Start | CellState::Goal => Ok(()),
            _ => self.grid.set(p, state),
        }
    }

    /// Run one iteration of the main loop and return the resulting state.
    ///
    /// Calling `step` on a terminal search is a no-op.
    pub fn step(&mut self) -> Result<SearchState, SearchError> {
        if self.state.is_terminal() {
            return Ok(self.state);
        }
        if self.state == SearchState::Initialized {
            debug!("search {} -> {} running", self.start, self.goal);
            self.state = SearchState::Running;
        }
        // Drop entries superseded by a cheaper one that was expanded already.
        while let Some(top) = self.frontier.peek_best() {
            if !self.slots[self.idx(top.coord)].expanded {
                break;
            }
            let _ = self.frontier.extract_best();
        }

        if let Some(max) = self.config.max_expansions {
            if self.expanded.len() >= max && !self.frontier.is_empty() {
                return Err(SearchError::BudgetExceeded {
                    expansions: self.expanded.len(),
                });
            }
        }

        let current = match self.frontier.extract_best() {
            Ok(node) => node,
            Err(EmptyFrontier) => {
                debug!(
                    "search {} -> {} exhausted after {} expansions",
                    self.start,
                    self.goal,
                    self.expanded.len()
                );
                self.state = SearchState::Exhausted;
                self.outcome = Some(SearchOutcome::NotFound);
                return Ok(self.state);
            }
        };

        let cp = current.coord;
        let ci = self.idx(cp);
        self.slots[ci].expanded = true;
        trace!("expand {cp} g={} h={}", current.g, current.h);
        self.paint(cp, CellState::Visited)?;
        self.expanded.push(cp);

        if cp == self.goal {
            self.succeed(current.g)?;
            return Ok(self.state);
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let g = current.g + 1;
        for &np in nbuf.cardinal(cp, |p| self.admits(p, g)) {
            let ni = self.idx(np);
            let slot = &mut self.slots[ni];
            slot.parent = ci;
            slot.g = g;
            let h = self.heuristic.estimate(np, self.goal);
            self.frontier.insert(SearchNode { coord: np, g, h });
            self.discovered += 1;
            self.paint(np, CellState::Visited)?;
        }
        self.nbuf = nbuf;

        Ok(self.state)
    }

    fn succeed(&mut self, cost: i32) -> Result<(), GridError> {
        let path = match self.config.marking {
            PathMarking::ShortestRoute => {
                let mut path = Vec::new();
                let mut ci = self.idx(self.goal);
                while ci != NO_PARENT {
                    path.push(self.point(ci));
                    ci = self.slots[ci].parent;
                }
                path.reverse();
                path
            }
            PathMarking::ExpansionTrail => self.expanded.clone(),
        };

        for &p in &path {
            self.paint(p, CellState::Path)?;
        }

        debug!(
            "search {} -> {} succeeded: cost {cost}, {} cells on route, {} expansions",
            self.start,
            self.goal,
            path.len(),
            self.expanded.len()
        );
        self.state = SearchState::Succeeded;
        self.outcome = Some(SearchOutcome::Found(Route { path, cost }));
        Ok(())
    }

    /// Step until the search is terminal.
    pub fn run(&mut self) -> Result<&SearchOutcome, SearchError> {
        while !self.state.is_terminal() {
            self.step()?;
        }
        // A terminal state always carries an outcome.
        Ok(self.outcome.get_or_insert(SearchOutcome::NotFound))
    }

    /// Run to completion and summarize.
    pub fn into_report(mut self) -> Result<SearchReport, SearchError> {
        let outcome = self.run()?.clone();
        Ok(SearchReport {
            start: self.start,
            goal: self.goal,
            state: self.state,
            outcome,
            expanded: self.expanded,
            discovered: self.discovered,
        })
    }
}

/// Search `grid` from `start` to `goal` with the default configuration.
pub fn find_path(grid: &mut Grid, start: Coord, goal: Coord) -> Result<SearchReport, SearchError> {
    AstarSearch::new(grid, start, goal)?.into_report()
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn report_round_trip() {
        let mut g = Grid::new(2, 2).unwrap();
        let report = find_path(&mut g, Coord::new(0, 0), Coord::new(1, 1)).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let back: SearchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
