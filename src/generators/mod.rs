use rand::{Rng, SeedableRng, rngs::StdRng};

mod growing_tree;

pub use growing_tree::growing_tree;

use crate::{
    config::MazeConfig,
    error::MazeResult,
    maze::{Grid, GridCell, Position},
};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Output of [`generate_maze`].
#[derive(Debug, Clone)]
pub struct GeneratedMaze {
    pub grid: Grid,
    /// Where the agent starts. Always a path cell.
    pub start: Position,
    /// The random cell carving began from.
    pub origin: Position,
}

/// Carve a fresh `config.rows` x `config.cols` maze and pick a start cell on it.
/// The seed in `config` is ignored; randomness comes from `rng`.
pub fn generate_maze(config: &MazeConfig, rng: &mut impl Rng) -> MazeResult<GeneratedMaze> {
    config.validate()?;

    let mut grid = Grid::new(config.cols, config.rows, GridCell::Wall);
    let origin: Position = (
        rng.random_range(0..grid.width()),
        rng.random_range(0..grid.height()),
    );
    growing_tree(&mut grid, origin, config.branch_probability, rng);

    // The origin is always carved, so after validate() pick_start never comes
    // back empty. Falling back to it keeps the start on a path cell regardless.
    let start = pick_start(&grid, rng).unwrap_or(origin);

    tracing::debug!(
        "[generate] {}x{} maze carved from {:?}, {} path cells, start at {:?}",
        grid.width(),
        grid.height(),
        origin,
        grid.count(GridCell::Path),
        start
    );

    Ok(GeneratedMaze {
        grid,
        start,
        origin,
    })
}

/// Resample uniform coordinates until one lands on a path cell.
/// Returns `None` only for a grid without any path cell.
pub fn pick_start(grid: &Grid, rng: &mut impl Rng) -> Option<Position> {
    if grid.is_empty() || grid.count(GridCell::Path) == 0 {
        return None;
    }
    loop {
        let coord = (
            rng.random_range(0..grid.width()),
            rng.random_range(0..grid.height()),
        );
        if grid[coord].is_path() {
            return Some(coord);
        }
    }
}
