use std::collections::HashSet;

use rand::Rng;

use crate::{
    config::MazeConfig,
    error::{MazeError, MazeResult},
    generators::{GeneratedMaze, generate_maze, get_rng},
    maze::{Grid, Position},
    solvers::{TraceSearch, shortest_trace_path},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Order in which held directions are applied within one frame.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn step(self, (x, y): Position) -> Option<Position> {
        match self {
            Direction::Up => Some((x, y.checked_sub(1)?)),
            Direction::Down => Some((x, y.checked_add(1)?)),
            Direction::Left => Some((x.checked_sub(1)?, y)),
            Direction::Right => Some((x.checked_add(1)?, y)),
        }
    }
}

/// Movement intents sampled by the presentation layer for a single frame.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Intents {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Intents {
    pub fn is_idle(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }

    pub fn set(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.up = true,
            Direction::Down => self.down = true,
            Direction::Left => self.left = true,
            Direction::Right => self.right = true,
        }
    }

    pub fn contains(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Drop both directions of any opposite pair that is held together.
    pub fn net(self) -> Intents {
        let vertical = self.up && self.down;
        let horizontal = self.left && self.right;
        Intents {
            up: self.up && !vertical,
            down: self.down && !vertical,
            left: self.left && !horizontal,
            right: self.right && !horizontal,
        }
    }
}

impl From<Direction> for Intents {
    fn from(direction: Direction) -> Self {
        let mut intents = Intents::default();
        intents.set(direction);
        intents
    }
}

/// State of one exploration run: the maze, where the agent is, where it has been,
/// and the last route found through the visited cells.
pub struct MazeSession {
    grid: Grid,
    /// Tracks where the agent currently is
    agent: Position,
    /// Visited cells in order of first visit
    trace: Vec<Position>,
    /// Same cells as `trace`, for membership checks
    visited: HashSet<Position>,
    /// Last route found. Kept when a later search finds nothing.
    shortest_path: Vec<Position>,
}

impl MazeSession {
    /// Generate a maze from `config` and place the agent on its start cell.
    pub fn new(config: &MazeConfig) -> MazeResult<Self> {
        let mut rng = get_rng(config.seed);
        MazeSession::with_rng(config, &mut rng)
    }

    pub fn with_rng(config: &MazeConfig, rng: &mut impl Rng) -> MazeResult<Self> {
        let GeneratedMaze { grid, start, .. } = generate_maze(config, rng)?;
        tracing::info!(
            "[session] New {}x{} maze, agent starts at {:?}",
            grid.width(),
            grid.height(),
            start
        );
        MazeSession::from_parts(grid, start)
    }

    /// Start a session on an existing grid. `start` must be a path cell of `grid`.
    pub fn from_parts(grid: Grid, start: Position) -> MazeResult<Self> {
        if !grid.is_open(start) {
            return Err(MazeError::InvalidConfiguration(format!(
                "start {:?} is not a path cell",
                start
            )));
        }
        Ok(MazeSession {
            grid,
            agent: start,
            trace: vec![start],
            visited: HashSet::from([start]),
            shortest_path: Vec::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn agent(&self) -> Position {
        self.agent
    }

    pub fn trace(&self) -> &[Position] {
        &self.trace
    }

    pub fn is_visited(&self, coord: Position) -> bool {
        self.visited.contains(&coord)
    }

    /// Last route found by [`MazeSession::compute_shortest_path`], empty before the first success.
    pub fn shortest_path(&self) -> &[Position] {
        &self.shortest_path
    }

    /// Attempt to move the agent one cell in `direction`.
    /// Returns the new position if the destination is inside the grid and a path cell.
    pub fn step(&mut self, direction: Direction) -> Option<Position> {
        let new_pos = direction.step(self.agent)?;
        if !self.grid.is_open(new_pos) {
            return None;
        }

        self.agent = new_pos;
        if self.visited.insert(new_pos) {
            tracing::debug!("[session] Moving to new cell at {:?}", new_pos);
            self.trace.push(new_pos);
        } else {
            tracing::debug!("[session] Moving to already visited cell at {:?}", new_pos);
        }
        Some(new_pos)
    }

    /// Apply one frame of movement intents.
    /// Opposite directions cancel, then each remaining direction is tried on its
    /// own, in [`Direction::ALL`] order.
    /// Returns the final agent position if it moved at all.
    pub fn apply_intents(&mut self, intents: Intents) -> Option<Position> {
        let intents = intents.net();
        let before = self.agent;
        for direction in Direction::ALL {
            if intents.contains(direction) {
                self.step(direction);
            }
        }
        (self.agent != before).then_some(self.agent)
    }

    /// Search the trace for the shortest route from its first to its last cell.
    ///
    /// On success the stored route is replaced. On [`TraceSearch::NotFound`] and
    /// [`TraceSearch::NoOp`] the previous route is left as it was.
    pub fn compute_shortest_path(&mut self) -> TraceSearch {
        let outcome = shortest_trace_path(&self.trace);
        match &outcome {
            TraceSearch::Found(route) => {
                tracing::info!(
                    "[session] Route of {} cells through {} visited cells",
                    route.len(),
                    self.trace.len()
                );
                self.shortest_path = route.clone();
            }
            TraceSearch::NotFound => {
                tracing::warn!(
                    "[session] No route through {} visited cells, keeping previous route",
                    self.trace.len()
                );
            }
            TraceSearch::NoOp => {
                tracing::debug!("[session] Trace too short to search");
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::is_adjacent;

    fn corridor_session() -> MazeSession {
        let grid = Grid::from_ascii(&[
            "#######", //
            "#.....#", //
            "#.###.#", //
            "#.....#", //
            "#######",
        ]);
        MazeSession::from_parts(grid, (1, 1)).unwrap()
    }

    #[test]
    fn test_start_is_first_trace_cell() {
        let session = corridor_session();
        assert_eq!(session.agent(), (1, 1));
        assert_eq!(session.trace(), &[(1, 1)]);
        assert!(session.shortest_path().is_empty());
    }

    #[test]
    fn test_walls_block_movement() {
        let mut session = corridor_session();
        assert_eq!(session.step(Direction::Up), None);
        assert_eq!(session.step(Direction::Left), None);
        assert_eq!(session.apply_intents(Intents::from(Direction::Up)), None);
        assert_eq!(session.agent(), (1, 1));
        assert_eq!(session.trace().len(), 1);
    }

    #[test]
    fn test_grid_edge_blocks_movement() {
        let grid = Grid::from_ascii(&["..", ".."]);
        let mut session = MazeSession::from_parts(grid, (0, 0)).unwrap();
        assert_eq!(session.step(Direction::Up), None);
        assert_eq!(session.step(Direction::Left), None);
        assert_eq!(session.step(Direction::Right), Some((1, 0)));
        assert_eq!(session.step(Direction::Right), None);
        assert_eq!(session.step(Direction::Down), Some((1, 1)));
        assert_eq!(session.step(Direction::Down), None);
    }

    #[test]
    fn test_revisit_does_not_grow_trace() {
        let mut session = corridor_session();
        session.step(Direction::Right);
        session.step(Direction::Right);
        session.step(Direction::Left);
        session.step(Direction::Left);
        assert_eq!(session.agent(), (1, 1));
        assert_eq!(session.trace(), &[(1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_held_directions_apply_independently() {
        let mut session = corridor_session();
        // Up is blocked, right is open.
        let intents = Intents {
            up: true,
            right: true,
            ..Intents::default()
        };
        assert_eq!(session.apply_intents(intents), Some((2, 1)));
        // Down succeeds first, then right runs into the wall from the new cell.
        let mut session = corridor_session();
        let intents = Intents {
            down: true,
            right: true,
            ..Intents::default()
        };
        assert_eq!(session.apply_intents(intents), Some((1, 2)));
        assert_eq!(session.trace(), &[(1, 1), (1, 2)]);
    }

    #[test]
    fn test_opposite_intents_cancel_out() {
        let left_right = Intents {
            left: true,
            right: true,
            ..Intents::default()
        };
        // Mid-corridor, both neighbours open and unvisited.
        let grid = corridor_session().grid().clone();
        let mut session = MazeSession::from_parts(grid, (2, 1)).unwrap();
        assert_eq!(session.apply_intents(left_right), None);
        assert_eq!(session.agent(), (2, 1));
        assert_eq!(session.trace(), &[(2, 1)]);

        // Dead end on the left does not let the right step through.
        let mut session = corridor_session();
        assert_eq!(session.apply_intents(left_right), None);
        assert_eq!(session.agent(), (1, 1));
        assert_eq!(session.trace(), &[(1, 1)]);

        // Vertical pair cancels and the horizontal intent still applies.
        let intents = Intents {
            up: true,
            down: true,
            right: true,
            ..Intents::default()
        };
        assert_eq!(session.apply_intents(intents), Some((2, 1)));
        assert_eq!(session.trace(), &[(1, 1), (2, 1)]);
        assert!(session.apply_intents(Intents::default()).is_none());
    }

    #[test]
    fn test_net_intents() {
        let all = Intents {
            up: true,
            down: true,
            left: true,
            right: true,
        };
        assert!(all.net().is_idle());
        let up_left = Intents {
            up: true,
            left: true,
            ..Intents::default()
        };
        assert_eq!(up_left.net(), up_left);
    }

    #[test]
    fn test_start_on_wall_rejected() {
        let grid = Grid::from_ascii(&["#.", ".."]);
        assert!(matches!(
            MazeSession::from_parts(grid.clone(), (0, 0)),
            Err(MazeError::InvalidConfiguration(_))
        ));
        assert!(MazeSession::from_parts(grid, (1, 0)).is_ok());
    }

    #[test]
    fn test_random_intents_stay_on_path() {
        let mut rng = get_rng(Some(42));
        for _ in 0..5 {
            let mut session = MazeSession::with_rng(&MazeConfig::default(), &mut rng).unwrap();
            let mut last_len = session.trace().len();
            for _ in 0..500 {
                let intents = Intents {
                    up: rng.random_bool(0.3),
                    down: rng.random_bool(0.3),
                    left: rng.random_bool(0.3),
                    right: rng.random_bool(0.3),
                };
                session.apply_intents(intents);
                assert!(session.grid().is_open(session.agent()));
                assert!(session.trace().len() >= last_len);
                last_len = session.trace().len();
            }
            let unique = session.trace().iter().collect::<HashSet<_>>();
            assert_eq!(unique.len(), session.trace().len());
        }
    }

    #[test]
    fn test_search_after_walk_around_block() {
        let mut session = corridor_session();
        for direction in [
            Direction::Right,
            Direction::Right,
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Down,
            Direction::Left,
            Direction::Left,
            Direction::Left,
            Direction::Left,
        ] {
            assert!(session.step(direction).is_some());
        }
        // The walk ends at (1, 3); the way back along the left column is unvisited.
        let TraceSearch::Found(route) = session.compute_shortest_path() else {
            panic!("expected a route");
        };
        assert_eq!(route.len(), 11);
        assert_eq!(session.shortest_path(), route.as_slice());
        assert!(route.windows(2).all(|w| is_adjacent(w[0], w[1])));

        // Visiting (1, 2) makes it the new end of the trace, right next to the start.
        session.step(Direction::Up);
        let TraceSearch::Found(route) = session.compute_shortest_path() else {
            panic!("expected a route");
        };
        assert_eq!(route, vec![(1, 1), (1, 2)]);
    }

    #[test]
    fn test_noop_keeps_previous_route() {
        let mut session = corridor_session();
        assert_eq!(session.compute_shortest_path(), TraceSearch::NoOp);
        assert!(session.shortest_path().is_empty());

        session.step(Direction::Right);
        assert!(session.compute_shortest_path().is_found());
        assert_eq!(session.shortest_path(), &[(1, 1), (2, 1)]);
    }

    #[test]
    fn test_not_found_keeps_previous_route() {
        let grid = Grid::from_ascii(&["...", "...", "..."]);
        let mut session = MazeSession::from_parts(grid, (0, 0)).unwrap();
        session.step(Direction::Right);
        assert!(session.compute_shortest_path().is_found());
        let previous = session.shortest_path().to_vec();

        // Hand-made trace gap: jump the agent's record past an unvisited cell.
        session.trace.push((2, 2));
        session.visited.insert((2, 2));
        assert_eq!(session.compute_shortest_path(), TraceSearch::NotFound);
        assert_eq!(session.shortest_path(), previous.as_slice());
    }

    #[test]
    fn test_repeated_search_is_stable() {
        let mut rng = get_rng(Some(9));
        let mut session = MazeSession::with_rng(&MazeConfig::default(), &mut rng).unwrap();
        for _ in 0..300 {
            let direction = Direction::ALL[rng.random_range(0..4)];
            session.step(direction);
        }
        let first = session.compute_shortest_path();
        let second = session.compute_shortest_path();
        match (&first, &second) {
            (TraceSearch::Found(a), TraceSearch::Found(b)) => assert_eq!(a.len(), b.len()),
            (TraceSearch::NoOp, TraceSearch::NoOp) => {}
            _ => panic!("searches disagree: {:?} vs {:?}", first, second),
        }
    }

    #[test]
    fn test_invalid_config_fails_session_start() {
        assert!(MazeSession::new(&MazeConfig::new(0, 0)).is_err());
    }
}
