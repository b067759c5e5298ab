//! Line geometry and win detection
//!
//! A line is SIZE cells in a row along one of the 40 canonical 4D directions.
//! Detection is an eager first-match scan: starts in ascending coordinate
//! order (w outermost, x innermost), directions in generation order. When
//! several lines are complete at once, the first one found is the winner.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Coord, Mark, SIZE};

/// Number of canonical directions in 4D: (3^4 - 1) / 2
pub const DIRECTION_COUNT: usize = 40;

/// Step vector with components in {-1, 0, 1}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction {
    pub dx: i8,
    pub dy: i8,
    pub dz: i8,
    pub dw: i8,
}

impl Direction {
    pub const fn new(dx: i8, dy: i8, dz: i8, dw: i8) -> Self {
        Self { dx, dy, dz, dw }
    }

    /// Nonzero with a positive first nonzero component.
    /// Exactly one of `d` and `-d` is canonical.
    pub const fn is_canonical(&self) -> bool {
        let components = [self.dx, self.dy, self.dz, self.dw];
        let mut i = 0;
        while i < components.len() {
            if components[i] != 0 {
                return components[i] > 0;
            }
            i += 1;
        }
        false
    }

    /// Number of axes this direction moves along (1 = straight, 4 = full diagonal)
    pub fn axes(&self) -> usize {
        [self.dx, self.dy, self.dz, self.dw]
            .iter()
            .filter(|&&d| d != 0)
            .count()
    }
}

/// Canonical directions in generation order: dx outermost, dw innermost,
/// each iterating -1, 0, 1.
pub const DIRECTIONS: [Direction; DIRECTION_COUNT] = canonical_directions();

const fn canonical_directions() -> [Direction; DIRECTION_COUNT] {
    let mut out = [Direction::new(0, 0, 0, 0); DIRECTION_COUNT];
    let mut n = 0;

    let mut dx = -1;
    while dx <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dz = -1;
            while dz <= 1 {
                let mut dw = -1;
                while dw <= 1 {
                    let d = Direction::new(dx, dy, dz, dw);
                    if d.is_canonical() {
                        out[n] = d;
                        n += 1;
                    }
                    dw += 1;
                }
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }

    assert!(n == DIRECTION_COUNT);
    out
}

/// SIZE cells in a row, in walk order from the start cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub direction: Direction,
    pub cells: [Coord; SIZE],
}

impl Line {
    /// Line from `start` along `direction`, or `None` if its far end is off the board
    pub fn from_start(start: Coord, direction: Direction) -> Option<Self> {
        if !start.is_valid() {
            return None;
        }
        // Far endpoint first: an in-bounds endpoint means every cell is in bounds
        start.step(direction, (SIZE - 1) as i8)?;

        let mut cells = [start; SIZE];
        for (k, cell) in cells.iter_mut().enumerate() {
            *cell = start.step(direction, k as i8)?;
        }
        Some(Self { direction, cells })
    }

    pub fn start(&self) -> Coord {
        self.cells[0]
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    /// The mark filling every cell of this line, if any
    pub fn owner(&self, board: &Board) -> Option<Mark> {
        let first = board.get(self.start()).ok().flatten()?;
        self.cells[1..]
            .iter()
            .all(|&c| board.get(c).ok().flatten() == Some(first))
            .then_some(first)
    }
}

/// A completed line and who completed it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Win {
    pub winner: Mark,
    pub line: Line,
}

/// Every in-bounds line, in scan order
pub fn all_lines() -> impl Iterator<Item = Line> {
    Coord::all().flat_map(|start| {
        DIRECTIONS
            .iter()
            .filter_map(move |&direction| Line::from_start(start, direction))
    })
}

/// First complete line in scan order, if any
pub fn evaluate(board: &Board) -> Option<Win> {
    scan(board).next()
}

/// All complete lines in scan order. The first element is what [`evaluate`] reports.
pub fn winning_lines(board: &Board) -> Vec<Win> {
    scan(board).collect()
}

fn scan(board: &Board) -> impl Iterator<Item = Win> + '_ {
    Coord::all()
        // Empty starts cannot begin a line
        .filter(move |&start| matches!(board.get(start), Ok(Some(_))))
        .flat_map(|start| {
            DIRECTIONS
                .iter()
                .filter_map(move |&direction| Line::from_start(start, direction))
        })
        .filter_map(move |line| line.owner(board).map(|winner| Win { winner, line }))
}
