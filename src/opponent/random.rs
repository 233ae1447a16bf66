//! Uniform random play (the easy tier)

use rand::Rng;

use crate::tictactoe::Board;

/// Pick one empty cell uniformly at random, or `None` on a full board.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    let moves = board.available_moves();
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.random_range(0..moves.len())])
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn covers_every_empty_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = Board::new();
        let seen: HashSet<usize> = (0..1000)
            .map(|_| random_move(&board, &mut rng).unwrap())
            .collect();
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn only_picks_empty_cells() {
        let mut rng = StdRng::seed_from_u64(11);
        let board = Board::from_string("XOX.O.X..").unwrap();
        let legal = board.available_moves();
        for _ in 0..200 {
            let pos = random_move(&board, &mut rng).unwrap();
            assert!(legal.contains(&pos));
        }
    }

    #[test]
    fn full_board_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = Board::from_string("XOXOXOOXO").unwrap();
        assert_eq!(random_move(&board, &mut rng), None);
    }
}
