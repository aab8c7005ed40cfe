pub mod cell;
pub mod grid;

pub use cell::GridCell;
pub use grid::Grid;

/// A cell coordinate `(x, y)`, with `x` the column and `y` the row.
pub type Position = (u16, u16);

/// Axis directions in the order up, right, down, left.
pub const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Offset `coord` by `(dx, dy)` scaled by `step`.
/// Returns `None` when the result would leave the `u16` range; bounds against a
/// particular grid are the caller's job.
pub fn offset(coord: Position, (dx, dy): (i32, i32), step: i32) -> Option<Position> {
    let x = u16::try_from(coord.0 as i32 + dx * step).ok()?;
    let y = u16::try_from(coord.1 as i32 + dy * step).ok()?;
    Some((x, y))
}

/// Get neighbors of a cell.
/// A neighbor is considered a cell that is one step away in the cardinal directions (up, right,
/// down, left), regardless of any grid.
pub fn get_neighbors(coord: Position) -> impl Iterator<Item = Position> {
    DIRECTIONS
        .into_iter()
        .filter_map(move |direction| offset(coord, direction, 1))
}

/// True if `a` and `b` differ by exactly one step along one axis.
pub fn is_adjacent(a: Position, b: Position) -> bool {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_neighbors() {
        let neighbors = get_neighbors((3, 3)).collect::<Vec<_>>();
        assert_eq!(neighbors, vec![(3, 2), (4, 3), (3, 4), (2, 3)]);
    }

    #[test]
    fn test_get_neighbors_at_origin_skips_underflow() {
        let neighbors = get_neighbors((0, 0)).collect::<Vec<_>>();
        assert_eq!(neighbors, vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn test_offset_overflow() {
        assert_eq!(offset((u16::MAX, 0), (1, 0), 1), None);
        assert_eq!(offset((1, 5), (-1, 0), 2), None);
        assert_eq!(offset((4, 5), (0, -1), 2), Some((4, 3)));
    }

    #[test]
    fn test_is_adjacent() {
        assert!(is_adjacent((1, 1), (1, 2)));
        assert!(is_adjacent((2, 1), (1, 1)));
        assert!(!is_adjacent((1, 1), (2, 2)));
        assert!(!is_adjacent((1, 1), (1, 1)));
        assert!(!is_adjacent((0, 0), (2, 0)));
    }
}
