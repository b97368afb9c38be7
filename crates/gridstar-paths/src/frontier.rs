use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use gridstar_core::Coord;

/// A candidate cell with its cost so far and its remaining estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchNode {
    pub coord: Coord,
    /// Cost from the start.
    pub g: i32,
    /// Heuristic estimate to the goal.
    pub h: i32,
}

impl SearchNode {
    /// Total priority `g + h`, saturating at `i32::MAX`.
    #[inline]
    pub fn f(&self) -> i32 {
        self.g.saturating_add(self.h)
    }
}

/// Returned by [`Frontier::extract_best`] when there is nothing left.
///
/// During a search this is the ordinary "no path" signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyFrontier;

impl fmt::Display for EmptyFrontier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frontier is empty")
    }
}

impl std::error::Error for EmptyFrontier {}

// ---------------------------------------------------------------------------
// Heap entry
// ---------------------------------------------------------------------------

/// Node plus insertion sequence, ordered so that `BinaryHeap` (a max-heap)
/// pops the smallest `f` first and, among equal `f`, the latest insertion.
#[derive(Clone, Copy, Debug)]
struct Entry {
    node: SearchNode,
    seq: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .f()
            .cmp(&self.node.f())
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

// ---------------------------------------------------------------------------
// Frontier
// ---------------------------------------------------------------------------

/// The open set: discovered nodes awaiting expansion.
///
/// [`extract_best`](Frontier::extract_best) returns the node with the
/// lowest `f`; ties go to the most recently inserted node.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: SearchNode) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { node, seq });
    }

    /// Remove and return the best node.
    pub fn extract_best(&mut self) -> Result<SearchNode, EmptyFrontier> {
        self.heap.pop().map(|e| e.node).ok_or(EmptyFrontier)
    }

    /// Look at the best node without removing it.
    pub fn peek_best(&self) -> Option<&SearchNode> {
        self.heap.peek().map(|e| &e.node)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Drop every node. The insertion sequence keeps counting.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
