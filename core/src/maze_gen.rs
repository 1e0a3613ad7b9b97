//! Maze carving: randomized line digging with a candidate pool
//!
//! Algorithm:
//! 1. Open the start cell (1, 1) and make it `current`
//! 2. Line dig: while some direction is diggable from `current`, draw one
//!    uniformly, open the wall slot and the lattice cell behind it, and move
//!    there. Stop at a dead end (or, optionally, on reaching the goal)
//! 3. Recovery: keep the pool entries that are still diggable; if none are
//!    left, rescan the whole lattice for diggable road cells
//! 4. An empty pool after a rescan ends generation; otherwise draw a new
//!    `current` from the pool and go back to 2
//!
//! A direction is diggable from a road cell when the wall slot next to it
//! and the lattice cell two steps away are both in bounds and still walls.
//! Every dig opens exactly one slot and one fresh lattice cell, so the roads
//! form a spanning tree over the lattice and the loop terminates.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::grid::{Grid, Position};

/// Diggability rule, a tuning parameter of the carver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigRule {
    /// Wall slot and lattice cell behind it must be walls
    #[default]
    Standard,
    /// Additionally the slot three steps away must exist and be a wall
    Strict,
}

impl FromStr for DigRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(DigRule::Standard),
            "strict" => Ok(DigRule::Strict),
            _ => Err(format!("Invalid dig rule: '{}'. Must be 'standard' or 'strict'", s)),
        }
    }
}

impl fmt::Display for DigRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigRule::Standard => write!(f, "standard"),
            DigRule::Strict => write!(f, "strict"),
        }
    }
}

/// How the carver finds a new origin after a dead end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recovery {
    /// Filter the previous pool, rescan the lattice only when it runs dry
    #[default]
    FilteredPool,
    /// Rescan the whole lattice after every dead end
    FullScan,
}

impl FromStr for Recovery {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "filtered-pool" | "filtered" => Ok(Recovery::FilteredPool),
            "full-scan" | "full" => Ok(Recovery::FullScan),
            _ => Err(format!(
                "Invalid recovery strategy: '{}'. Must be 'filtered-pool' or 'full-scan'",
                s
            )),
        }
    }
}

impl fmt::Display for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recovery::FilteredPool => write!(f, "filtered-pool"),
            Recovery::FullScan => write!(f, "full-scan"),
        }
    }
}

/// Carver tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarveOptions {
    #[serde(default)]
    pub rule: DigRule,
    #[serde(default)]
    pub recovery: Recovery,
    /// End a line dig as soon as it reaches the goal cell
    #[serde(default = "default_stop_at_goal")]
    pub stop_at_goal: bool,
}

fn default_stop_at_goal() -> bool {
    true
}

impl Default for CarveOptions {
    fn default() -> Self {
        Self {
            rule: DigRule::default(),
            recovery: Recovery::default(),
            stop_at_goal: default_stop_at_goal(),
        }
    }
}

/// Counters from one carving run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarveStats {
    /// Line-dig phases run
    pub lines: usize,
    /// Line digs that ended with no diggable direction left
    pub dead_ends: usize,
    /// Full lattice scans
    pub rescans: usize,
    /// Cells turned from wall to road, start cell included
    pub cells_carved: usize,
}

/// Reusable maze carver
///
/// Holds scratch buffers (direction list and candidate pool) so repeated
/// generations do not reallocate. No state survives between calls to
/// [`MazeCarver::carve`] other than buffer capacity.
#[derive(Debug, Clone, Default)]
pub struct MazeCarver {
    options: CarveOptions,
    directions: Vec<Direction>,
    pool: Vec<Position>,
}

impl MazeCarver {
    pub fn new(options: CarveOptions) -> Self {
        Self {
            options,
            directions: Vec::with_capacity(4),
            pool: Vec::new(),
        }
    }

    pub fn options(&self) -> CarveOptions {
        self.options
    }

    /// Carve a maze into an all-wall grid
    ///
    /// The grid must be freshly allocated or [`Grid::reset`]; carving only
    /// ever opens walls. Runs to completion: every lattice cell ends up road.
    pub fn carve<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) -> CarveStats {
        let mut stats = CarveStats::default();
        let goal = grid.goal();
        let mut current = grid.start();

        self.pool.clear();
        grid.open(current);
        stats.cells_carved += 1;

        loop {
            stats.lines += 1;
            let reached_goal = self.dig_line(grid, &mut current, goal, rng, &mut stats);
            if !reached_goal {
                stats.dead_ends += 1;
            }

            if self.options.recovery == Recovery::FilteredPool {
                let rule = self.options.rule;
                let view: &Grid = grid;
                self.pool.retain(|&p| can_dig_any(view, p, rule));
            } else {
                self.pool.clear();
            }

            if self.pool.is_empty() {
                self.rescan(grid);
                stats.rescans += 1;
            }

            if self.pool.is_empty() {
                break;
            }

            current = self.pool[rng.gen_range(0..self.pool.len())];
        }

        tracing::debug!(
            "Carved {}x{} maze: {} lines, {} dead ends, {} rescans, {} cells",
            grid.width(),
            grid.height(),
            stats.lines,
            stats.dead_ends,
            stats.rescans,
            stats.cells_carved
        );

        stats
    }

    /// Dig from `current` until stuck. Returns true if the line stopped on the goal.
    fn dig_line<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        current: &mut Position,
        goal: Position,
        rng: &mut R,
        stats: &mut CarveStats,
    ) -> bool {
        loop {
            let rule = self.options.rule;
            let origin = *current;
            let view: &Grid = grid;
            self.directions.clear();
            self.directions.extend(
                Direction::CARVE_ORDER
                    .into_iter()
                    .filter(|&d| can_dig(view, origin, d, rule)),
            );

            if self.directions.is_empty() {
                return false;
            }

            let dir = self.directions[rng.gen_range(0..self.directions.len())];
            *current = dig(grid, origin, dir);
            stats.cells_carved += 2;

            if self.options.stop_at_goal && *current == goal {
                return true;
            }
        }
    }

    /// Rebuild the pool from every diggable lattice cell
    fn rescan(&mut self, grid: &Grid) {
        let rule = self.options.rule;
        self.pool.clear();
        self.pool
            .extend(grid.lattice().filter(|&p| can_dig_any(grid, p, rule)));
        tracing::trace!("Rescanned lattice: {} candidates", self.pool.len());
    }
}

/// True if a new lattice cell can be opened from `origin` in `dir`.
/// Out-of-range targets are simply not diggable.
pub fn can_dig(grid: &Grid, origin: Position, dir: Direction, rule: DigRule) -> bool {
    if !grid.is_road(origin) {
        return false;
    }

    let diggable = |steps| origin.step(dir, steps).is_some_and(|p| grid.is_wall(p));

    match rule {
        DigRule::Standard => diggable(1) && diggable(2),
        DigRule::Strict => diggable(1) && diggable(2) && diggable(3),
    }
}

/// True if any direction is diggable from `origin`
pub fn can_dig_any(grid: &Grid, origin: Position, rule: DigRule) -> bool {
    Direction::CARVE_ORDER
        .into_iter()
        .any(|d| can_dig(grid, origin, d, rule))
}

/// Open the slot and the lattice cell two steps away; returns the new cell
fn dig(grid: &mut Grid, origin: Position, dir: Direction) -> Position {
    let mut target = origin;
    for steps in 1..=2 {
        if let Some(p) = origin.step(dir, steps) {
            grid.open(p);
            target = p;
        }
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleLCG;

    fn carve(width: usize, height: usize, seed: u32, options: CarveOptions) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        let mut rng = SimpleLCG::new(seed);
        MazeCarver::new(options).carve(&mut grid, &mut rng);
        grid
    }

    #[test]
    fn test_maze_generation() {
        let grid = carve(11, 11, 12345, CarveOptions::default());

        // Start and goal should be paths
        assert!(grid.is_road(Position::new(1, 1)));
        assert!(grid.is_road(Position::new(9, 9)));

        // Every lattice cell gets carved
        assert!(grid.lattice().all(|p| grid.is_road(p)));
    }

    #[test]
    fn test_border_stays_wall() {
        let grid = carve(21, 15, 2918957128, CarveOptions::default());

        for x in 0..grid.width() {
            assert!(grid.is_wall(Position::new(x, 0)));
            assert!(grid.is_wall(Position::new(x, grid.height() - 1)));
        }
        for y in 0..grid.height() {
            assert!(grid.is_wall(Position::new(0, y)));
            assert!(grid.is_wall(Position::new(grid.width() - 1, y)));
        }
    }

    #[test]
    fn test_even_even_positions_stay_wall() {
        let grid = carve(15, 15, 4242, CarveOptions::default());

        for x in (0..grid.width()).step_by(2) {
            for y in (0..grid.height()).step_by(2) {
                assert!(grid.is_wall(Position::new(x, y)), "({}, {}) was opened", x, y);
            }
        }
    }

    #[test]
    fn test_road_count_is_spanning_tree() {
        let grid = carve(31, 21, 99999, CarveOptions::default());
        let lattice = grid.lattice().count();

        // lattice cells plus one connector per tree edge
        assert_eq!(grid.road_count(), lattice + (lattice - 1));
    }

    #[test]
    fn test_stats_account_for_every_cell() {
        let mut grid = Grid::new(25, 17).unwrap();
        let mut rng = SimpleLCG::new(31337);
        let stats = MazeCarver::default().carve(&mut grid, &mut rng);

        assert_eq!(stats.cells_carved, grid.road_count());
        assert!(stats.lines >= 1);
        assert!(stats.rescans >= 1, "termination always needs a final rescan");
        assert!(stats.dead_ends <= stats.lines);
    }

    #[test]
    fn test_determinism() {
        let grid1 = carve(21, 21, 99999, CarveOptions::default());
        let grid2 = carve(21, 21, 99999, CarveOptions::default());

        // Same seed should produce identical mazes
        assert_eq!(grid1, grid2);
    }

    #[test]
    fn test_different_seeds() {
        let grid1 = carve(21, 21, 11111, CarveOptions::default());
        let grid2 = carve(21, 21, 22222, CarveOptions::default());

        // Different seeds should (almost certainly) produce different mazes
        assert_ne!(grid1, grid2);
    }

    #[test]
    fn test_full_scan_matches_filtered_pool_on_smallest_grid() {
        let filtered = CarveOptions::default();
        let full = CarveOptions {
            recovery: Recovery::FullScan,
            ..CarveOptions::default()
        };

        for seed in 1..200 {
            assert_eq!(carve(5, 5, seed, filtered), carve(5, 5, seed, full), "seed {}", seed);
        }
    }

    #[test]
    fn test_strict_rule_still_spans_lattice() {
        let options = CarveOptions {
            rule: DigRule::Strict,
            ..CarveOptions::default()
        };
        let grid = carve(19, 13, 777, options);
        let lattice = grid.lattice().count();

        assert!(grid.lattice().all(|p| grid.is_road(p)));
        assert_eq!(grid.road_count(), 2 * lattice - 1);
    }

    #[test]
    fn test_carver_reuse_matches_fresh_carver() {
        let mut carver = MazeCarver::default();
        let mut first = Grid::new(17, 17).unwrap();
        carver.carve(&mut first, &mut SimpleLCG::new(5));

        let mut second = Grid::new(17, 17).unwrap();
        carver.carve(&mut second, &mut SimpleLCG::new(6));

        assert_eq!(second, carve(17, 17, 6, CarveOptions::default()));
    }

    #[test]
    fn test_can_dig_needs_road_origin() {
        let mut grid = Grid::new(7, 7).unwrap();
        let origin = Position::new(1, 1);
        assert!(!can_dig(&grid, origin, Direction::Right, DigRule::Standard));

        grid.set_road(origin).unwrap();
        assert!(can_dig(&grid, origin, Direction::Right, DigRule::Standard));
        assert!(can_dig(&grid, origin, Direction::Down, DigRule::Strict));
        assert!(!can_dig(&grid, origin, Direction::Up, DigRule::Standard));
        assert!(!can_dig(&grid, origin, Direction::Left, DigRule::Standard));
    }

    #[test]
    fn test_rule_and_recovery_parse() {
        assert_eq!("STRICT".parse::<DigRule>(), Ok(DigRule::Strict));
        assert_eq!("full-scan".parse::<Recovery>(), Ok(Recovery::FullScan));
        assert_eq!(Recovery::FilteredPool.to_string(), "filtered-pool");
        assert!("diagonal".parse::<DigRule>().is_err());
    }
}
