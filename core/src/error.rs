//! Error types for maze generation and grid access.

use thiserror::Error;

/// Errors surfaced by the maze core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Width and height must both be odd and at least 5
    #[error("invalid maze dimensions {width}x{height}: both must be odd and at least 5")]
    InvalidDimensions { width: usize, height: usize },

    /// Grid access outside the allocated extent
    #[error("position ({x}, {y}) is outside the grid")]
    OutOfBounds { x: usize, y: usize },
}
