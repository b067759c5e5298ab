//! Tesseract Core - 4D tic-tac-toe engine
//!
//! This crate provides the pure game logic for 3x3x3x3 tic-tac-toe:
//! - Board geometry (4D coordinates, flat cell storage)
//! - Line evaluation over the 40 canonical 4D directions
//! - Game controller (turn order, win/draw detection, reset)
//! - Seeded random playouts

pub mod board;
pub mod lines;
pub mod game;
pub mod playout;

// Re-exports for convenient access
pub use board::{Board, BoardError, Coord, CoordParseError, Mark, CELL_COUNT, DIMENSIONS, SIZE};
pub use lines::{all_lines, evaluate, winning_lines, Direction, Line, Win, DIRECTIONS, DIRECTION_COUNT};
pub use game::{Game, GameState, MoveError, ReplayError};
pub use playout::{continue_playout, random_playout};
