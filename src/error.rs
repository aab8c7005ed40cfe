use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MazeError {
    /// Rejected before any generation work starts.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type MazeResult<T> = Result<T, MazeError>;
