//! Strategy port - anything that can pick a move for the side to play
//!
//! The computer opponent's three tiers implement this trait, as does any
//! scripted or recorded player used by the simulation pipeline.

use crate::{Result, tictactoe::GameState};

/// A source of moves for the mark whose turn it is.
///
/// # Contract
///
/// For a non-terminal `state`, [`Strategy::select_move`] must return an index
/// contained in `state.legal_moves()`. Returning anything else is a defect in
/// the strategy, not a recoverable condition; callers surface it as
/// [`crate::Error::IllegalStrategyMove`].
///
/// # Examples
///
/// ```
/// use noughts::{ports::Strategy, tictactoe::GameState};
///
/// struct FirstFree;
///
/// impl Strategy for FirstFree {
///     fn select_move(&mut self, state: &GameState) -> noughts::Result<usize> {
///         state
///             .legal_moves()
///             .first()
///             .copied()
///             .ok_or(noughts::Error::NoValidMoves)
///     }
///
///     fn name(&self) -> &str {
///         "first-free"
///     }
/// }
///
/// let mut strategy = FirstFree;
/// assert_eq!(strategy.select_move(&GameState::new()).unwrap(), 0);
/// ```
pub trait Strategy: Send {
    /// Select a move for `state.current_mark()`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoValidMoves`] if the state is terminal.
    fn select_move(&mut self, state: &GameState) -> Result<usize>;

    /// Name used in logs and simulation reports
    fn name(&self) -> &str;

    /// Seed the strategy's random number generator.
    ///
    /// Deterministic strategies ignore this.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
