//! Breadth-first shortest path over road cells

use std::collections::VecDeque;

use crate::direction::Direction;
use crate::grid::{Grid, Position};

/// Shortest sequence of unit moves from `from` to `to` over road cells
///
/// Returns `None` when either end is not a road or no path exists, and an
/// empty path when `from == to`.
pub fn shortest_path(grid: &Grid, from: Position, to: Position) -> Option<Vec<Direction>> {
    if !grid.is_road(from) || !grid.is_road(to) {
        return None;
    }

    // Direction used to enter each visited cell; `from` is its own marker
    let mut came_by: Vec<Option<Direction>> = vec![None; grid.width() * grid.height()];
    let mut visited = vec![false; grid.width() * grid.height()];
    let index = |p: Position| p.y * grid.width() + p.x;

    let mut queue = VecDeque::new();
    visited[index(from)] = true;
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        if current == to {
            return Some(walk_back(&came_by, index, from, to));
        }

        for dir in Direction::CARVE_ORDER {
            let Some(next) = current.step(dir, 1) else {
                continue;
            };
            if grid.is_road(next) && !visited[index(next)] {
                visited[index(next)] = true;
                came_by[index(next)] = Some(dir);
                queue.push_back(next);
            }
        }
    }

    None
}

fn walk_back(
    came_by: &[Option<Direction>],
    index: impl Fn(Position) -> usize,
    from: Position,
    to: Position,
) -> Vec<Direction> {
    let mut path = Vec::new();
    let mut cursor = to;

    while cursor != from {
        let Some(dir) = came_by[index(cursor)] else {
            break;
        };
        path.push(dir);
        let (dx, dy) = dir.delta();
        cursor = Position::new(
            cursor.x.wrapping_add_signed(-dx),
            cursor.y.wrapping_add_signed(-dy),
        );
    }

    path.reverse();
    path
}
