use rand::{Rng, seq::SliceRandom};

use crate::maze::{DIRECTIONS, Grid, GridCell, Position, offset};

/// Get unvisited neighbors of a cell.
/// A neighbor is considered a cell that is two steps away in the cardinal directions (up, right,
/// down, left). It is unvisited if it is still a wall and within the grid bounds.
/// Each neighbor comes with the wall cell lying between it and `coord`.
fn get_unvisited_neighbors(coord: Position, grid: &Grid) -> Vec<(Position, Position)> {
    DIRECTIONS
        .into_iter()
        .filter_map(|direction| {
            let neighbor = offset(coord, direction, 2)?;
            let between = offset(coord, direction, 1)?;
            Some((neighbor, between))
        })
        .filter(|&(neighbor, _)| grid.is_in_bounds(neighbor) && grid[neighbor].is_wall())
        .collect()
}

/// Carve `grid` outward from `origin` with a stack-based depth-first walk that
/// moves two cells at a time.
///
/// The top of the stack is only peeked each round, so a cell stays on the stack
/// until it has no wall neighbors left. When more than one neighbor is available,
/// a second one is also carved with probability `branch_probability` and pushed on
/// top, so carving continues from the side branch first.
///
/// Panics if `branch_probability` is outside `[0, 1]` or `origin` is out of bounds.
pub fn growing_tree(
    grid: &mut Grid,
    origin: Position,
    branch_probability: f64,
    rng: &mut impl Rng,
) {
    let mut stack = vec![origin];
    let mut branches = 0usize;

    while let Some(&cell) = stack.last() {
        grid.set(cell, GridCell::Path);

        let mut neighbors = get_unvisited_neighbors(cell, grid);
        if neighbors.is_empty() {
            // Dead end, backtrack
            stack.pop();
            continue;
        }

        neighbors.shuffle(rng);

        let (next, between) = neighbors[0];
        grid.set(between, GridCell::Path);
        grid.set(next, GridCell::Path);
        stack.push(next);

        if neighbors.len() > 1 && rng.random_bool(branch_probability) {
            let (next, between) = neighbors[1];
            grid.set(between, GridCell::Path);
            grid.set(next, GridCell::Path);
            stack.push(next);
            branches += 1;
        }
    }

    tracing::trace!("[growing tree] carving finished with {} extra branches", branches);
}
