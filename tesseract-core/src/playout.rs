//! Random playouts
//!
//! Both sides pick uniformly among empty cells until the game ends. Seed the
//! RNG (e.g. `ChaCha8Rng::seed_from_u64`) to get the same game back.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::game::Game;

/// Play uniformly random legal moves from a fresh game until it is over
pub fn random_playout<R: Rng + ?Sized>(rng: &mut R) -> Game {
    let mut game = Game::new();
    continue_playout(&mut game, rng);
    game
}

/// Finish `game` with uniformly random legal moves. Returns the number of moves played.
pub fn continue_playout<R: Rng + ?Sized>(game: &mut Game, rng: &mut R) -> usize {
    let mut played = 0;
    while let Some(&coord) = game.legal_moves().choose(rng) {
        if game.apply_move(coord).is_err() {
            break;
        }
        played += 1;
    }
    played
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CELL_COUNT;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_playout_terminates() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            let game = random_playout(&mut rng);
            assert!(game.is_over());
            assert!(game.move_count() <= CELL_COUNT);
        }
    }

    #[test]
    fn test_playout_deterministic() {
        let a = random_playout(&mut ChaCha8Rng::seed_from_u64(42));
        let b = random_playout(&mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a.history(), b.history());
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_continue_finished_game_is_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut game = random_playout(&mut rng);
        let moves = game.move_count();
        assert_eq!(continue_playout(&mut game, &mut rng), 0);
        assert_eq!(game.move_count(), moves);
    }
}
