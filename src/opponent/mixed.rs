//! Coin-flip between optimal and random play (the medium tier)
//!
//! Every call re-rolls independently; nothing about earlier choices is
//! remembered, so the behaviour is only meaningful statistically.

use rand::Rng;

use super::{minimax::best_move, random::random_move};
use crate::tictactoe::{Board, Mark};

/// Probability of deferring to the full search on a given move.
pub const SEARCH_PROBABILITY: f64 = 0.5;

/// With probability [`SEARCH_PROBABILITY`] play [`best_move`], otherwise
/// [`random_move`]. `None` only on a full board.
pub fn mixed_move<R: Rng + ?Sized>(board: &Board, me: Mark, rng: &mut R) -> Option<usize> {
    if rng.random_bool(SEARCH_PROBABILITY) {
        best_move(board, me)
    } else {
        random_move(board, rng)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn plays_both_optimal_and_suboptimal_moves() {
        // O wins at 5; every other empty cell is a lesser move
        let board = Board::from_string("XX.OO....").unwrap();
        let mut rng = StdRng::seed_from_u64(2024);

        let picks: Vec<usize> = (0..200)
            .map(|_| mixed_move(&board, Mark::O, &mut rng).unwrap())
            .collect();

        let optimal = picks.iter().filter(|&&pos| pos == 5).count();
        assert!(optimal > 0, "search branch never taken");
        assert!(optimal < picks.len(), "random branch never strayed");
        // search alone contributes about half; random adds a fifth of the rest
        assert!(optimal > 80, "optimal picks {optimal} too rare");
        assert!(picks.iter().all(|pos| board.is_empty(*pos)));
    }
}
