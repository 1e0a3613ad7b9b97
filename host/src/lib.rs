//! Headless driver for the maze core
//!
//! Generates seeded mazes, replays move lists against them and finds
//! solutions. Nothing is persisted: a maze is always rebuilt from its seed,
//! which is safe because generation with [`SimpleLCG`] is deterministic.

pub mod config;
pub mod logging;

use labyrinth_core::{
    shortest_path, CarveOptions, CarveStats, Direction, GenerationSession, Grid, MazeError,
    Position, SimpleLCG,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use config::HostConfig;

/// Maximum number of moves accepted from a moves file
pub const MAX_MOVES: usize = 10_000;

/// Maximum size of a moves file in bytes
pub const MAX_MOVES_FILE_BYTES: usize = 10_000_000;

/// Errors raised by the host layer
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Maze error: {0}")]
    Maze(#[from] MazeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid move code {code} at index {index}: must be 0-3")]
    InvalidMove { index: usize, code: u8 },

    #[error("Invalid moves file: {0}")]
    InvalidMovesFile(String),

    #[error("No path from start to goal in maze with seed {0}")]
    NoSolution(u32),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging error: {0}")]
    Logging(String),
}

/// A generated maze, ready for display or export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeReport {
    /// The seed used to generate this maze
    pub seed: u32,
    pub width: usize,
    pub height: usize,
    pub options: CarveOptions,
    pub stats: CarveStats,
    /// Binary grid data, one row per entry (0=wall, 1=road)
    pub grid_data: Vec<Vec<u8>>,
}

impl MazeReport {
    pub fn from_session(seed: u32, session: &GenerationSession) -> Self {
        Self {
            seed,
            width: session.width(),
            height: session.height(),
            options: session.options(),
            stats: session.stats(),
            grid_data: session.grid().to_binary_rows(),
        }
    }
}

/// Result of replaying a move list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayOutcome {
    /// Moves that changed the agent's position
    pub applied: usize,
    /// Moves refused by a wall, the border or a solved maze
    pub rejected: usize,
    pub final_position: (usize, usize),
    pub solved: bool,
}

/// Build a session from a seed and the configured size and carver tuning
pub fn generate_session(config: &HostConfig, seed: u32) -> Result<GenerationSession, HostError> {
    let mut rng = SimpleLCG::new(seed);
    let session =
        GenerationSession::generate_with(config.width, config.height, config.carve_options(), &mut rng)?;
    Ok(session)
}

/// Generate a maze and describe it
///
/// # Example
/// ```
/// use host::{generate_maze_report, HostConfig};
///
/// let config = HostConfig { width: 11, height: 11, ..HostConfig::default() };
/// let report = generate_maze_report(&config, 2918957128).unwrap();
/// assert_eq!(report.grid_data.len(), 11);
/// assert_eq!(report.grid_data[1][1], 1);
/// ```
pub fn generate_maze_report(config: &HostConfig, seed: u32) -> Result<MazeReport, HostError> {
    tracing::info!(
        "Generating {}x{} maze for seed {}",
        config.width,
        config.height,
        seed
    );

    let session = generate_session(config, seed)?;

    tracing::info!(
        "Maze generated: {} road cells, {} dead ends",
        session.grid().road_count(),
        session.stats().dead_ends
    );

    Ok(MazeReport::from_session(seed, &session))
}

/// Replay move codes (0=NORTH, 1=EAST, 2=SOUTH, 3=WEST) against a session
///
/// Moves into walls are counted as rejected and do not stop the replay.
/// An unknown move code is an error and nothing after it is applied.
pub fn replay_moves(session: &mut GenerationSession, moves: &[u8]) -> Result<ReplayOutcome, HostError> {
    let mut applied = 0;
    let mut rejected = 0;

    for (index, &code) in moves.iter().enumerate() {
        let dir = Direction::from_code(code).ok_or(HostError::InvalidMove { index, code })?;
        if session.try_step(dir) {
            applied += 1;
        } else {
            rejected += 1;
        }
    }

    let outcome = ReplayOutcome {
        applied,
        rejected,
        final_position: session.current_position(),
        solved: session.is_solved(),
    };

    tracing::info!(
        "Replayed {} moves: {} applied, {} rejected, solved={}",
        moves.len(),
        outcome.applied,
        outcome.rejected,
        outcome.solved
    );

    Ok(outcome)
}

/// Move codes of the shortest path from start to goal
pub fn solve_maze(session: &GenerationSession) -> Option<Vec<u8>> {
    shortest_path(session.grid(), session.start(), session.goal())
        .map(|path| path.into_iter().map(Direction::code).collect())
}

/// Parse and validate a JSON array of move codes
pub fn parse_moves(json: &str) -> Result<Vec<u8>, HostError> {
    // Validate file size (prevent loading gigabytes into memory)
    if json.len() > MAX_MOVES_FILE_BYTES {
        return Err(HostError::InvalidMovesFile(
            "moves file is too large (max 10MB)".to_string(),
        ));
    }

    let moves: Vec<u8> = serde_json::from_str(json)?;

    if moves.is_empty() {
        return Err(HostError::InvalidMovesFile("moves array is empty".to_string()));
    }

    if moves.len() > MAX_MOVES {
        return Err(HostError::InvalidMovesFile(format!(
            "too many moves: {} (max {})",
            moves.len(),
            MAX_MOVES
        )));
    }

    Ok(moves)
}

/// Text picture of a maze: `#` wall, blank road, `@` agent, `G` goal
pub fn render_ascii(grid: &Grid, agent: Position, goal: Position) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let pos = Position::new(x, y);
            let ch = if pos == agent {
                '@'
            } else if pos == goal {
                'G'
            } else if grid.is_road(pos) {
                ' '
            } else {
                '#'
            };
            out.push(ch);
        }
        out.push('\n');
    }

    out
}
