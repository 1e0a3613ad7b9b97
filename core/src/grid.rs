//! Dense wall/road grid
//!
//! The grid is stored row-major with `(0, 0)` in the top-left corner.
//! For a maze with W x H grid cells:
//! - Positions with both coordinates odd form the lattice of real maze cells
//! - Every other position is a wall slot that only opens when the carver
//!   links the two lattice cells on either side of it
//! - Row 0, column 0, row H-1 and column W-1 always stay walls

use crate::direction::Direction;
use crate::error::MazeError;
use crate::MIN_DIMENSION;

/// State of one grid position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Wall,
    Road,
}

impl Cell {
    pub fn is_road(self) -> bool {
        self == Cell::Road
    }

    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }
}

/// A grid coordinate, 0-indexed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The position `steps` cells away in `dir`, or `None` if it would
    /// leave the non-negative quadrant. Upper bounds are checked by the grid.
    pub fn step(self, dir: Direction, steps: usize) -> Option<Self> {
        let (dx, dy) = dir.delta();
        let x = self.x.checked_add_signed(dx.checked_mul(steps as isize)?)?;
        let y = self.y.checked_add_signed(dy.checked_mul(steps as isize)?)?;
        Some(Self { x, y })
    }

    /// True when both coordinates are odd
    pub fn is_lattice(self) -> bool {
        self.x % 2 == 1 && self.y % 2 == 1
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (usize, usize) {
    fn from(pos: Position) -> Self {
        (pos.x, pos.y)
    }
}

/// Fixed-size maze grid, all walls until carved
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Allocate an all-wall grid
    ///
    /// # Errors
    /// [`MazeError::InvalidDimensions`] unless both sides are odd and at least 5.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        validate_dimensions(width, height)?;

        Ok(Self {
            cells: vec![Cell::Wall; width * height],
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Start cell of every maze: the top-left lattice cell
    pub fn start(&self) -> Position {
        Position::new(1, 1)
    }

    /// Goal cell of every maze: the bottom-right lattice cell
    pub fn goal(&self) -> Position {
        Position::new(self.width - 2, self.height - 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.y * self.width + pos.x)
    }

    /// Bounds-checked read
    ///
    /// # Errors
    /// [`MazeError::OutOfBounds`] when `pos` lies outside the grid.
    pub fn get(&self, pos: Position) -> Result<Cell, MazeError> {
        self.cell(pos).ok_or(MazeError::OutOfBounds { x: pos.x, y: pos.y })
    }

    /// Non-failing read; `None` outside the grid
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// True only for in-bounds road cells
    pub fn is_road(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(Cell::is_road)
    }

    /// True only for in-bounds wall cells
    pub fn is_wall(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(Cell::is_wall)
    }

    pub fn set_road(&mut self, pos: Position) -> Result<(), MazeError> {
        self.set(pos, Cell::Road)
    }

    pub fn set_wall(&mut self, pos: Position) -> Result<(), MazeError> {
        self.set(pos, Cell::Wall)
    }

    fn set(&mut self, pos: Position, cell: Cell) -> Result<(), MazeError> {
        let idx = self
            .index(pos)
            .ok_or(MazeError::OutOfBounds { x: pos.x, y: pos.y })?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Open a cell the carver has already bounds-checked.
    ///
    /// Panics on an out-of-range position: that is a coordinate bug in the
    /// caller, never an expected condition.
    pub(crate) fn open(&mut self, pos: Position) {
        assert!(
            self.contains(pos),
            "carver opened ({}, {}) outside a {}x{} grid",
            pos.x,
            pos.y,
            self.width,
            self.height
        );
        self.cells[pos.y * self.width + pos.x] = Cell::Road;
    }

    /// Turn every cell back into a wall, keeping the allocation
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Wall);
    }

    /// Every lattice position, column by column
    pub fn lattice(&self) -> impl Iterator<Item = Position> + '_ {
        (1..self.width)
            .step_by(2)
            .flat_map(move |x| (1..self.height).step_by(2).map(move |y| Position::new(x, y)))
    }

    /// Number of road cells in the whole grid
    pub fn road_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_road()).count()
    }

    /// Binary rows (0 = wall, 1 = road), row-major, for display and export
    pub fn to_binary_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|c| u8::from(c.is_road())).collect())
            .collect()
    }
}

/// Check the odd and minimum-size constraints shared by every grid
pub fn validate_dimensions(width: usize, height: usize) -> Result<(), MazeError> {
    if width % 2 == 0 || height % 2 == 0 || width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(MazeError::InvalidDimensions { width, height });
    }
    Ok(())
}
