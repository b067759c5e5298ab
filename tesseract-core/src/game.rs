//! Game controller: turn order and terminal detection

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::board::{Board, BoardError, Coord, Mark};
use crate::lines::{evaluate, Line};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Where the game stands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameState {
    Playing { turn: Mark },
    Won { winner: Mark, line: Line },
    Draw,
}

impl GameState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameState::Playing { .. })
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::Playing { turn: Mark::FIRST }
    }
}

/// Status line text
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Playing { turn } => write!(f, "{turn}'s turn"),
            GameState::Won { winner, .. } => write!(f, "{winner} wins!"),
            GameState::Draw => f.write_str("Draw!"),
        }
    }
}

/// Rejected move. The game is unchanged when one of these is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is over")]
    GameOver,

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// A move sequence that could not be replayed
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("move {index} at {coord} rejected: {source}")]
pub struct ReplayError {
    pub index: usize,
    pub coord: Coord,
    pub source: MoveError,
}

// ============================================================================
// GAME
// ============================================================================

/// One game session. Owns its board and state exclusively.
#[derive(Clone, Debug, Default)]
pub struct Game {
    board: Board,
    state: GameState,
    history: Vec<(Mark, Coord)>,
}

impl Game {
    /// Empty board, X to move
    pub fn new() -> Self {
        Self::default()
    }

    /// Play `moves` in order from a fresh game, stopping at the first rejected one
    pub fn replay<I>(moves: I) -> Result<Self, ReplayError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut game = Self::new();
        for (index, coord) in moves.into_iter().enumerate() {
            game.apply_move(coord).map_err(|source| ReplayError {
                index,
                coord,
                source,
            })?;
        }
        Ok(game)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mark to move, `None` once the game is over
    pub fn turn(&self) -> Option<Mark> {
        match self.state {
            GameState::Playing { turn } => Some(turn),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn winning_line(&self) -> Option<&Line> {
        match &self.state {
            GameState::Won { line, .. } => Some(line),
            _ => None,
        }
    }

    /// Applied moves, oldest first
    pub fn history(&self) -> &[(Mark, Coord)] {
        &self.history
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Whether a move at `coord` would currently be accepted
    pub fn is_playable(&self, coord: Coord) -> bool {
        !self.is_over() && matches!(self.board.get(coord), Ok(None))
    }

    /// Empty cells while the game is on, in index order
    pub fn legal_moves(&self) -> Vec<Coord> {
        if self.is_over() {
            return vec![];
        }
        self.board.empty_cells().collect()
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Place the current player's mark at `coord`, then settle the state:
    /// a completed line wins, a full board draws, otherwise the turn passes.
    pub fn apply_move(&mut self, coord: Coord) -> Result<&GameState, MoveError> {
        let turn = match self.state {
            GameState::Playing { turn } => turn,
            _ => {
                debug!(%coord, "move rejected: game over");
                return Err(MoveError::GameOver);
            }
        };

        if let Err(e) = self.board.set(coord, turn) {
            debug!(%coord, error = %e, "move rejected");
            return Err(e.into());
        }
        self.history.push((turn, coord));
        debug!(mark = %turn, %coord, moves = self.history.len(), "move applied");

        self.state = if let Some(win) = evaluate(&self.board) {
            info!(winner = %win.winner, start = %win.line.start(), "game won");
            GameState::Won {
                winner: win.winner,
                line: win.line,
            }
        } else if self.board.is_full() {
            info!(moves = self.history.len(), "game drawn");
            GameState::Draw
        } else {
            GameState::Playing {
                turn: turn.opponent(),
            }
        };

        Ok(&self.state)
    }

    /// Back to an empty board with X to move, from any state
    pub fn reset(&mut self) {
        debug!(moves = self.history.len(), "game reset");
        *self = Self::new();
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::Direction;

    fn c(x: u8, y: u8, z: u8, w: u8) -> Coord {
        Coord::new(x, y, z, w)
    }

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(*game.state(), GameState::Playing { turn: Mark::X });
        assert_eq!(game.turn(), Some(Mark::X));
        assert!(game.board().is_empty());
        assert_eq!(game.legal_moves().len(), 81);
    }

    #[test]
    fn test_turn_alternates() {
        let mut game = Game::new();
        game.apply_move(c(0, 0, 0, 0)).unwrap();
        assert_eq!(game.turn(), Some(Mark::O));
        game.apply_move(c(1, 1, 0, 0)).unwrap();
        assert_eq!(game.turn(), Some(Mark::X));
        assert_eq!(
            game.history(),
            &[(Mark::X, c(0, 0, 0, 0)), (Mark::O, c(1, 1, 0, 0))]
        );
    }

    #[test]
    fn test_occupied_cell_is_rejected_without_change() {
        let mut game = Game::new();
        game.apply_move(c(2, 1, 0, 2)).unwrap();
        let before = game.clone();

        let err = game.apply_move(c(2, 1, 0, 2)).unwrap_err();
        assert_eq!(
            err,
            MoveError::Board(BoardError::CellOccupied {
                coord: c(2, 1, 0, 2),
                mark: Mark::X
            })
        );
        assert_eq!(game.state(), before.state());
        assert_eq!(game.board(), before.board());
        assert_eq!(game.move_count(), 1);
        assert!(!game.is_playable(c(2, 1, 0, 2)));
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut game = Game::new();
        let err = game.apply_move(c(0, 0, 3, 0)).unwrap_err();
        assert!(matches!(err, MoveError::Board(BoardError::OutOfRange { .. })));
        assert_eq!(game.turn(), Some(Mark::X));
        assert!(!game.is_playable(c(0, 0, 3, 0)));
    }

    #[test]
    fn test_win_ends_game() {
        let mut game = Game::new();
        for coord in [c(0, 0, 0, 0), c(0, 1, 0, 0), c(1, 0, 0, 0), c(0, 2, 0, 0)] {
            game.apply_move(coord).unwrap();
        }
        let state = *game.apply_move(c(2, 0, 0, 0)).unwrap();

        match state {
            GameState::Won { winner, line } => {
                assert_eq!(winner, Mark::X);
                assert_eq!(line.cells, [c(0, 0, 0, 0), c(1, 0, 0, 0), c(2, 0, 0, 0)]);
                assert_eq!(line.direction, Direction::new(1, 0, 0, 0));
            }
            other => panic!("expected win, got {other:?}"),
        }
        assert!(game.is_over());
        assert_eq!(game.turn(), None);
        assert!(game.winning_line().is_some());
        assert!(game.legal_moves().is_empty());

        let filled = game.board().filled();
        assert_eq!(game.apply_move(c(2, 2, 2, 2)), Err(MoveError::GameOver));
        assert_eq!(game.board().filled(), filled);
    }

    #[test]
    fn test_reset_from_won() {
        let mut game = Game::replay([
            c(0, 0, 0, 0),
            c(0, 1, 0, 0),
            c(1, 1, 1, 1),
            c(0, 2, 0, 0),
            c(2, 2, 2, 2),
        ])
        .unwrap();
        assert!(game.is_over());

        game.reset();
        assert_eq!(*game.state(), GameState::Playing { turn: Mark::X });
        assert!(game.board().is_empty());
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_replay_reports_bad_move() {
        let err = Game::replay([c(0, 0, 0, 0), c(1, 0, 0, 0), c(0, 0, 0, 0)]).unwrap_err();
        assert_eq!(err.index, 2);
        assert_eq!(err.coord, c(0, 0, 0, 0));
        assert_eq!(
            err.to_string(),
            "move 2 at (0, 0, 0, 0) rejected: cell (0, 0, 0, 0) is already taken by X"
        );
    }

    #[test]
    fn test_status_text() {
        assert_eq!(GameState::Playing { turn: Mark::O }.to_string(), "O's turn");
        assert_eq!(GameState::Draw.to_string(), "Draw!");
    }

    #[test]
    fn test_state_serialization() {
        let json = serde_json::to_value(GameState::Playing { turn: Mark::X }).unwrap();
        assert_eq!(json["status"], "playing");
        assert_eq!(json["turn"], "X");

        let json = serde_json::to_value(GameState::Draw).unwrap();
        assert_eq!(json["status"], "draw");
    }
}
