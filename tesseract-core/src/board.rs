//! 4D board geometry and cell storage

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::lines::Direction;

/// Cells per axis
pub const SIZE: usize = 3;

/// Number of axes
pub const DIMENSIONS: usize = 4;

/// Total cells on the board (SIZE^DIMENSIONS)
pub const CELL_COUNT: usize = SIZE * SIZE * SIZE * SIZE;

// ============================================================================
// ERRORS
// ============================================================================

/// Invalid board access
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("coordinate {coord} is outside the board")]
    OutOfRange { coord: Coord },

    #[error("cell {coord} is already taken by {mark}")]
    CellOccupied { coord: Coord, mark: Mark },
}

/// Text that does not describe a coordinate
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CoordParseError {
    #[error("expected 4 comma-separated components, got {0}")]
    WrongArity(usize),

    #[error("invalid component {0:?}")]
    InvalidComponent(String),
}

// ============================================================================
// MARK
// ============================================================================

/// A player's symbol. Empty cells are `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The mark that opens every game
    pub const FIRST: Mark = Mark::X;

    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

// ============================================================================
// COORDINATE
// ============================================================================

/// Position on the board, one component per axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub w: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8, z: u8, w: u8) -> Self {
        Self { x, y, z, w }
    }

    /// Check if every component is within the board
    pub fn is_valid(&self) -> bool {
        let n = SIZE as u8;
        self.x < n && self.y < n && self.z < n && self.w < n
    }

    /// Flat storage index: ((w*N + z)*N + y)*N + x
    pub fn index(&self) -> Result<usize, BoardError> {
        if !self.is_valid() {
            return Err(BoardError::OutOfRange { coord: *self });
        }
        let (x, y, z, w) = (
            self.x as usize,
            self.y as usize,
            self.z as usize,
            self.w as usize,
        );
        Ok(((w * SIZE + z) * SIZE + y) * SIZE + x)
    }

    /// Inverse of [`Coord::index`] for `index < CELL_COUNT`
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < CELL_COUNT, "cell index {index} is outside the board");
        Self::new(
            (index % SIZE) as u8,
            (index / SIZE % SIZE) as u8,
            (index / (SIZE * SIZE) % SIZE) as u8,
            (index / (SIZE * SIZE * SIZE)) as u8,
        )
    }

    /// All coordinates, w outermost and x innermost, each ascending
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELL_COUNT).map(Coord::from_index)
    }

    /// Cell `k` steps away along `direction`, or `None` if that leaves the board
    pub fn step(&self, direction: Direction, k: i8) -> Option<Coord> {
        if !self.is_valid() {
            return None;
        }
        let n = SIZE as i16;
        let shift = |c: u8, d: i8| -> Option<u8> {
            let v = c as i16 + d as i16 * k as i16;
            (0..n).contains(&v).then_some(v as u8)
        };
        Some(Coord::new(
            shift(self.x, direction.dx)?,
            shift(self.y, direction.dy)?,
            shift(self.z, direction.dz)?,
            shift(self.w, direction.dw)?,
        ))
    }

    pub fn components(&self) -> [u8; DIMENSIONS] {
        [self.x, self.y, self.z, self.w]
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

/// Parses `x,y,z,w`, optionally wrapped in parentheses.
/// Range is not checked here; the board rejects out-of-range coordinates.
impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts.len() != DIMENSIONS {
            return Err(CoordParseError::WrongArity(parts.len()));
        }

        let mut components = [0u8; DIMENSIONS];
        for (slot, part) in components.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| CoordParseError::InvalidComponent(part.to_string()))?;
        }

        let [x, y, z, w] = components;
        Ok(Coord::new(x, y, z, w))
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Flat 3x3x3x3 grid. Every cell always has an entry; `None` is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Mark>; CELL_COUNT],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    /// Mark at `coord`
    pub fn get(&self, coord: Coord) -> Result<Option<Mark>, BoardError> {
        Ok(self.cells[coord.index()?])
    }

    /// Write `mark` into an empty cell. Filled cells never change.
    pub fn set(&mut self, coord: Coord, mark: Mark) -> Result<(), BoardError> {
        let index = coord.index()?;
        if let Some(existing) = self.cells[index] {
            return Err(BoardError::CellOccupied {
                coord,
                mark: existing,
            });
        }
        self.cells[index] = Some(mark);
        Ok(())
    }

    /// True iff no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Number of non-empty cells
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Number of cells holding `mark`
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&c| c == Some(mark)).count()
    }

    /// Iterate (coordinate, mark) pairs in index order
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Option<Mark>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &mark)| (Coord::from_index(i), mark))
    }

    /// Empty coordinates in index order
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells()
            .filter(|(_, mark)| mark.is_none())
            .map(|(coord, _)| coord)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
