use std::{cmp::Ordering, rc::Rc};

mod trace;

pub use trace::shortest_trace_path;

use crate::maze::Position;

struct TrackedCell {
    /// Coordinates of the cell in the maze
    coord: Position,
    /// The parent cell from which this cell was reached
    parent: Option<Rc<TrackedCell>>,
    /// Cost to reach this cell from the start
    traveling_cost: usize,
}

impl TrackedCell {
    /// Walk the parent links back to the start and return the route start-first.
    fn route(self: Rc<Self>) -> Vec<Position> {
        let mut route = vec![self.coord];
        let mut child = self;
        while let Some(parent) = child.parent.clone() {
            route.push(parent.coord);
            child = parent;
        }
        route.reverse();
        route
    }
}

// Ordering on (cost, coord): equal costs fall back to coordinate order so that
// searches are reproducible.
impl Ord for TrackedCell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.traveling_cost
            .cmp(&other.traveling_cost)
            .then_with(|| self.coord.cmp(&other.coord))
    }
}

impl PartialOrd for TrackedCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TrackedCell {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TrackedCell {}

/// Result of a search over the visited trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceSearch {
    /// Route from the first to the last trace cell, both inclusive.
    Found(Vec<Position>),
    /// The last trace cell cannot be reached through trace cells.
    NotFound,
    /// Fewer than two trace cells, nothing to search.
    NoOp,
}

impl TraceSearch {
    pub fn is_found(&self) -> bool {
        matches!(self, TraceSearch::Found(_))
    }
}

impl std::fmt::Display for TraceSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceSearch::Found(route) => write!(f, "Shortest route found ({} cells)", route.len()),
            TraceSearch::NotFound => write!(f, "No route through visited cells"),
            TraceSearch::NoOp => write!(f, "Visit at least two cells first"),
        }
    }
}
