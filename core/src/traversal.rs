//! Agent position and win detection

use crate::direction::Direction;
use crate::grid::{Grid, Position};

/// The single agent walking a carved maze
///
/// Once the agent stands on the goal the state is `solved` and every further
/// move is refused until [`TraversalState::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalState {
    position: Position,
    start: Position,
    goal: Position,
    solved: bool,
    moves_made: usize,
}

impl TraversalState {
    pub fn new(start: Position, goal: Position) -> Self {
        Self {
            position: start,
            start,
            goal,
            solved: false,
            moves_made: 0,
        }
    }

    /// Put the agent back on `start` with a fresh goal
    pub fn reset(&mut self, start: Position, goal: Position) {
        *self = Self::new(start, goal);
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Moves applied since the last reset
    pub fn moves_made(&self) -> usize {
        self.moves_made
    }

    /// Try a unit step of `(dx, dy)`
    ///
    /// Returns whether the agent moved. Steps off the grid, into walls, with a
    /// non-unit delta, or after the goal was reached are all refused.
    pub fn attempt_move(&mut self, grid: &Grid, dx: isize, dy: isize) -> bool {
        match Direction::from_delta(dx, dy) {
            Some(dir) => self.step(grid, dir),
            None => {
                tracing::trace!("Rejected non-unit move ({}, {})", dx, dy);
                false
            }
        }
    }

    /// Same as [`TraversalState::attempt_move`] for a known direction
    pub fn step(&mut self, grid: &Grid, dir: Direction) -> bool {
        if self.solved {
            return false;
        }

        let target = match self.position.step(dir, 1) {
            Some(target) if grid.is_road(target) => target,
            _ => return false,
        };

        self.position = target;
        self.moves_made += 1;

        if self.position == self.goal {
            self.solved = true;
            tracing::debug!(
                "Goal ({}, {}) reached after {} moves",
                self.goal.x,
                self.goal.y,
                self.moves_made
            );
        }

        true
    }
}
