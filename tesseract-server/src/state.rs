//! Server state management
//!
//! One game session shared by all requests.

use std::sync::{Mutex, PoisonError};

use tesseract_core::Game;

/// Server-wide shared state
pub struct ServerState {
    game: Mutex<Game>,
}

impl ServerState {
    pub fn new() -> Self {
        Self::with_game(Game::new())
    }

    pub fn with_game(game: Game) -> Self {
        Self {
            game: Mutex::new(game),
        }
    }

    /// Run `f` with exclusive access to the game. Moves are a check-then-write
    /// sequence, so every access goes through the lock.
    pub fn lock_game<T>(&self, f: impl FnOnce(&mut Game) -> T) -> T {
        // `apply_move` mutates only after all checks pass, so a poisoned game is still consistent
        let mut game = self.game.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut game)
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
