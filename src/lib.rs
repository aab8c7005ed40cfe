//! Generate a grid maze, walk it, and find the shortest way back through the
//! cells already visited.

pub mod app;
pub mod config;
pub mod error;
pub mod generators;
pub mod logging;
pub mod maze;
pub mod session;
pub mod solvers;

pub use config::MazeConfig;
pub use error::{MazeError, MazeResult};
pub use session::{Direction, Intents, MazeSession};
pub use solvers::TraceSearch;
