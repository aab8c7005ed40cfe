use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap, HashSet},
    rc::Rc,
};

use super::{TraceSearch, TrackedCell};
use crate::maze::{Position, get_neighbors};

/// Find the fewest-steps route from the first to the last cell of `trace`.
///
/// Only cells that appear in `trace` may be stepped on, and steps go between
/// axis-adjacent cells. Walls are not consulted: the trace is assumed to come from
/// legal agent moves.
pub fn shortest_trace_path(trace: &[Position]) -> TraceSearch {
    let (start, goal) = match trace {
        [first, .., last] => (*first, *last),
        _ => return TraceSearch::NoOp,
    };

    let members = trace.iter().copied().collect::<HashSet<_>>();

    // Priority queue for Dijkstra's algorithm
    // Using Reverse to turn the max-heap into a min-heap
    let mut pq: BinaryHeap<Reverse<TrackedCell>> = BinaryHeap::new();
    pq.push(Reverse(TrackedCell {
        coord: start,
        parent: None,
        traveling_cost: 0,
    }));

    // Hash map to track the minimum cost to reach each cell
    let mut costs = HashMap::from([(start, 0usize)]);

    while let Some(Reverse(current)) = pq.pop() {
        // Skip stale entries superseded by a cheaper push
        if costs
            .get(&current.coord)
            .is_some_and(|&best| best < current.traveling_cost)
        {
            continue;
        }

        if current.coord == goal {
            let route = Rc::new(current).route();
            tracing::debug!(
                "[trace search] {} trace cells, route of {} cells",
                trace.len(),
                route.len()
            );
            return TraceSearch::Found(route);
        }

        let rc_current = Rc::new(current);
        let new_cost = rc_current.traveling_cost + 1; // Uniform cost for each step

        get_neighbors(rc_current.coord)
            // Only trace cells are walkable
            .filter(|c| members.contains(c))
            // Only consider neighbors that we can reach with a lower cost
            .filter(|&c| {
                let is_cheaper = match costs.get(&c) {
                    Some(&existing_cost) => new_cost < existing_cost,
                    None => true,
                };
                if is_cheaper {
                    costs.insert(c, new_cost);
                }
                is_cheaper
            })
            .for_each(|c| {
                pq.push(Reverse(TrackedCell {
                    coord: c,
                    parent: Some(rc_current.clone()),
                    traveling_cost: new_cost,
                }))
            });
    }

    tracing::debug!(
        "[trace search] {:?} unreachable from {:?} within {} trace cells",
        goal,
        start,
        trace.len()
    );
    TraceSearch::NotFound
}
