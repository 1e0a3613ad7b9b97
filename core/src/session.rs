//! One playable maze: grid, carver and agent state together
//!
//! The session owns the grid exclusively. Carving borrows it mutably and
//! runs to completion inside [`GenerationSession::generate`] or
//! [`GenerationSession::regenerate`], so callers can only ever observe a
//! finished maze.

use rand::Rng;

use crate::direction::Direction;
use crate::error::MazeError;
use crate::grid::{Grid, Position};
use crate::maze_gen::{CarveOptions, CarveStats, MazeCarver};
use crate::traversal::TraversalState;

#[derive(Debug, Clone)]
pub struct GenerationSession {
    grid: Grid,
    carver: MazeCarver,
    traversal: TraversalState,
    stats: CarveStats,
}

impl GenerationSession {
    /// Generate a maze with the default carver options
    ///
    /// # Errors
    /// [`MazeError::InvalidDimensions`] unless both sides are odd and at least 5.
    pub fn generate<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<Self, MazeError> {
        Self::generate_with(width, height, CarveOptions::default(), rng)
    }

    /// Generate a maze with explicit carver options
    pub fn generate_with<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        options: CarveOptions,
        rng: &mut R,
    ) -> Result<Self, MazeError> {
        let mut grid = Grid::new(width, height)?;
        let mut carver = MazeCarver::new(options);

        tracing::debug!("Generating {}x{} maze with {:?}", width, height, options);
        let stats = carver.carve(&mut grid, rng);
        let traversal = TraversalState::new(grid.start(), grid.goal());

        Ok(Self {
            grid,
            carver,
            traversal,
            stats,
        })
    }

    /// Carve a fresh maze of the same size into the existing grid
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> CarveStats {
        self.grid.reset();
        self.stats = self.carver.carve(&mut self.grid, rng);
        self.traversal.reset(self.grid.start(), self.grid.goal());
        self.stats
    }

    /// Put the agent back on the start cell of the current maze
    pub fn reset(&mut self) {
        self.traversal.reset(self.grid.start(), self.grid.goal());
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn start(&self) -> Position {
        self.traversal.start()
    }

    pub fn goal(&self) -> Position {
        self.traversal.goal()
    }

    /// Statistics of the most recent carve
    pub fn stats(&self) -> CarveStats {
        self.stats
    }

    pub fn options(&self) -> CarveOptions {
        self.carver.options()
    }

    /// Bounds-checked read; false outside the grid
    pub fn is_road(&self, x: usize, y: usize) -> bool {
        self.grid.is_road(Position::new(x, y))
    }

    pub fn current_position(&self) -> (usize, usize) {
        self.traversal.position().into()
    }

    pub fn is_solved(&self) -> bool {
        self.traversal.is_solved()
    }

    pub fn moves_made(&self) -> usize {
        self.traversal.moves_made()
    }

    /// Move the agent one cell; false if the move was refused
    pub fn try_move(&mut self, dx: isize, dy: isize) -> bool {
        self.traversal.attempt_move(&self.grid, dx, dy)
    }

    pub fn try_step(&mut self, dir: Direction) -> bool {
        self.traversal.step(&self.grid, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleLCG;

    #[test]
    fn test_generate_rejects_bad_dimensions() {
        let mut rng = SimpleLCG::new(1);
        for (w, h) in [(4, 5), (5, 4), (3, 5)] {
            assert_eq!(
                GenerationSession::generate(w, h, &mut rng).unwrap_err(),
                MazeError::InvalidDimensions { width: w, height: h }
            );
        }
    }

    #[test]
    fn test_start_and_goal_are_roads() {
        let session = GenerationSession::generate(21, 13, &mut SimpleLCG::new(8)).unwrap();

        assert_eq!(session.start(), Position::new(1, 1));
        assert_eq!(session.goal(), Position::new(19, 11));
        assert!(session.is_road(1, 1));
        assert!(session.is_road(19, 11));
        assert!(!session.is_road(21, 0));
        assert_eq!(session.current_position(), (1, 1));
        assert!(!session.is_solved());
    }

    #[test]
    fn test_five_by_five_scenario() {
        for seed in 1..50 {
            let mut session = GenerationSession::generate(5, 5, &mut SimpleLCG::new(seed)).unwrap();
            let right_open = session.is_road(2, 1);

            assert_eq!(session.try_move(1, 0), right_open, "seed {}", seed);
            if right_open {
                assert_eq!(session.current_position(), (2, 1));
                session.reset();
            }

            // Walls never move the agent
            if !session.is_road(0, 1) {
                assert!(!session.try_move(-1, 0));
                assert_eq!(session.current_position(), (1, 1));
            }
        }
    }

    #[test]
    fn test_regenerate_clears_previous_state() {
        let mut rng = SimpleLCG::new(77);
        let mut session = GenerationSession::generate(15, 15, &mut rng).unwrap();
        let first = session.grid().clone();

        let path = crate::solver::shortest_path(session.grid(), session.start(), session.goal())
            .unwrap();
        for dir in path {
            session.try_step(dir);
        }
        assert!(session.is_solved());
        assert!(!session.try_move(0, -1));

        session.regenerate(&mut rng);
        assert!(!session.is_solved());
        assert_eq!(session.current_position(), (1, 1));
        assert_eq!(session.moves_made(), 0);
        assert_ne!(session.grid(), &first);

        let fresh = GenerationSession::generate(15, 15, &mut SimpleLCG::new(5)).unwrap();
        let mut reused = session;
        reused.regenerate(&mut SimpleLCG::new(5));
        assert_eq!(reused.grid(), fresh.grid());
    }
}
