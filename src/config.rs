use crate::error::{MazeError, MazeResult};

/// Options recognized by maze generation and the session built on top of it.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeConfig {
    pub rows: u16,
    pub cols: u16,
    /// Chance of carving a second neighbor in the same step.
    pub branch_probability: f64,
    /// Fixed seed for reproducible mazes. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl MazeConfig {
    pub const DEFAULT_ROWS: u16 = 21;
    pub const DEFAULT_COLS: u16 = 21;
    pub const DEFAULT_BRANCH_PROBABILITY: f64 = 0.3;

    pub fn new(rows: u16, cols: u16) -> Self {
        MazeConfig {
            rows,
            cols,
            ..MazeConfig::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_branch_probability(mut self, branch_probability: f64) -> Self {
        self.branch_probability = branch_probability;
        self
    }

    pub fn validate(&self) -> MazeResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(MazeError::InvalidConfiguration(format!(
                "grid dimensions must be positive, got {} rows x {} cols",
                self.rows, self.cols
            )));
        }
        if !(0.0..=1.0).contains(&self.branch_probability) {
            return Err(MazeError::InvalidConfiguration(format!(
                "branch probability must be within [0, 1], got {}",
                self.branch_probability
            )));
        }
        Ok(())
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        MazeConfig {
            rows: Self::DEFAULT_ROWS,
            cols: Self::DEFAULT_COLS,
            branch_probability: Self::DEFAULT_BRANCH_PROBABILITY,
            seed: None,
        }
    }
}
