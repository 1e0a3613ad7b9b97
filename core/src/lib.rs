//! Perfect maze generation and single-agent traversal
//!
//! This crate carves spanning-tree mazes on odd-sized grids and tracks one
//! agent walking from the top-left cell to the bottom-right cell. It has no
//! rendering, input or timing of its own: a presentation layer generates a
//! [`GenerationSession`], reads cells with [`GenerationSession::is_road`] and
//! forwards key presses to [`GenerationSession::try_move`].
//!
//! Randomness is always passed in explicitly. [`SimpleLCG`] gives a stable
//! seed-to-maze mapping; any other [`rand::Rng`] works as well.

pub mod direction;
pub mod error;
pub mod grid;
pub mod maze_gen;
pub mod rng;
pub mod session;
pub mod solver;
pub mod traversal;

// Re-export commonly used types for convenience
pub use direction::Direction;
pub use error::MazeError;
pub use grid::{Cell, Grid, Position};
pub use maze_gen::{CarveOptions, CarveStats, DigRule, MazeCarver, Recovery};
pub use rng::SimpleLCG;
pub use session::GenerationSession;
pub use solver::shortest_path;
pub use traversal::TraversalState;

/// Smallest allowed width or height
pub const MIN_DIMENSION: usize = 5;

/// Default grid size (16x16 lattice cells plus walls)
pub const DEFAULT_WIDTH: usize = 33;
pub const DEFAULT_HEIGHT: usize = 33;
