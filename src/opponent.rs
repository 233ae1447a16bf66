//! Computer opponent
//!
//! Three strength tiers share one entry point, [`choose_move`], which
//! dispatches on [`Difficulty`] once per request:
//! - [`Difficulty::Easy`] - uniform random over the empty cells
//! - [`Difficulty::Medium`] - a fresh coin flip between Easy and Hard on every move
//! - [`Difficulty::Hard`] - exhaustive minimax, never loses

pub mod minimax;
pub mod mixed;
pub mod random;

use std::{fmt, str::FromStr};

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use minimax::{WIN_SCORE, best_move, evaluate_moves, minimax};
pub use mixed::{SEARCH_PROBABILITY, mixed_move};
pub use random::random_move;

use crate::{
    Error, Result,
    ports::Strategy,
    tictactoe::{Board, GameState, Mark},
};

/// Strength tier of the computer opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(label)
    }
}

impl FromStr for Difficulty {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "random" => Ok(Difficulty::Easy),
            "medium" | "mixed" => Ok(Difficulty::Medium),
            "hard" | "minimax" | "optimal" => Ok(Difficulty::Hard),
            _ => Err(Error::ParseDifficulty {
                input: s.to_string(),
                expected: "easy, medium, hard".to_string(),
            }),
        }
    }
}

/// Pick a move for `me` at the given tier, or `None` on a full board.
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    me: Mark,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<usize> {
    match difficulty {
        Difficulty::Easy => random_move(board, rng),
        Difficulty::Medium => mixed_move(board, me, rng),
        Difficulty::Hard => best_move(board, me),
    }
}

/// A computer player at a fixed tier, owning its random number generator.
pub struct ComputerOpponent {
    difficulty: Difficulty,
    name: String,
    rng: StdRng,
}

impl ComputerOpponent {
    /// Create an opponent seeded from the thread-local generator
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_seed(difficulty, rand::random())
    }

    /// Create an opponent with a deterministic seed
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            name: format!("computer-{difficulty}"),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Override the name reported in logs and reports
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Strategy for ComputerOpponent {
    fn select_move(&mut self, state: &GameState) -> Result<usize> {
        if state.is_terminal() {
            return Err(Error::NoValidMoves);
        }
        let me = state.current_mark();
        let choice = choose_move(state.board(), me, self.difficulty, &mut self.rng)
            .ok_or(Error::NoValidMoves)?;

        debug_assert!(
            state.legal_moves().contains(&choice),
            "{} chose illegal move {choice}",
            self.name
        );
        debug!(strategy = %self.name, %me, choice, "computer move selected");
        Ok(choice)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_round_trips_through_text() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>().unwrap(), difficulty);
        }
        assert_eq!("Optimal".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn hard_opponent_is_deterministic() {
        let state = GameState::new().apply_move(0, Mark::X).unwrap();
        let mut a = ComputerOpponent::with_seed(Difficulty::Hard, 1);
        let mut b = ComputerOpponent::with_seed(Difficulty::Hard, 99);
        assert_eq!(a.select_move(&state).unwrap(), b.select_move(&state).unwrap());
        // the only non-losing reply to a corner opening is the centre
        assert_eq!(a.select_move(&state).unwrap(), 4);
    }

    #[test]
    fn terminal_state_has_no_move() {
        let state = GameState::from_string("XXXOO....").unwrap();
        let mut opponent = ComputerOpponent::with_seed(Difficulty::Easy, 3);
        assert!(matches!(
            opponent.select_move(&state),
            Err(Error::NoValidMoves)
        ));
    }

    #[test]
    fn seeded_opponents_repeat_themselves() {
        let state = GameState::new()
            .apply_move(4, Mark::X)
            .and_then(|s| s.apply_move(0, Mark::O))
            .unwrap();
        let mut a = ComputerOpponent::with_seed(Difficulty::Medium, 5);
        let mut b = ComputerOpponent::with_seed(Difficulty::Medium, 5);
        for _ in 0..20 {
            assert_eq!(a.select_move(&state).unwrap(), b.select_move(&state).unwrap());
        }
    }
}
