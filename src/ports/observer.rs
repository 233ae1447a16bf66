//! Observer port - round lifecycle events
//!
//! The session and the simulation pipeline both report what happens to
//! registered observers. The score tally is one such observer: it counts the
//! single terminal event emitted for each finished round.

use crate::{
    Result,
    tictactoe::{GameState, Mark, RoundOutcome},
};

/// Receives round events.
///
/// # Event Sequence
///
/// 1. `on_run_start(total_rounds)` - once, when the number is known
/// 2. For each round:
///    - `on_round_start(round)` - before the round's first move is reported
///    - `on_move(...)` for each applied move
///    - `on_round_end(round, outcome)` exactly once, when the round terminates
/// 3. `on_run_end()` - once at the end
///
/// Rounds abandoned before termination (restart, back to menu) get no
/// `on_round_end`; rounds abandoned before any move get no events at all.
/// A failing observer does not stop the others from receiving the event.
///
/// # Examples
///
/// ```
/// use noughts::{ports::Observer, tictactoe::RoundOutcome};
///
/// struct DrawCounter(usize);
///
/// impl Observer for DrawCounter {
///     fn on_round_end(&mut self, _round: usize, outcome: RoundOutcome) -> noughts::Result<()> {
///         if outcome == RoundOutcome::Draw {
///             self.0 += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called before the first round when the total is known
    fn on_run_start(&mut self, _total_rounds: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a round begins, ahead of its first move
    fn on_round_start(&mut self, _round: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a move has been applied.
    ///
    /// * `before` - state the move was applied to
    /// * `index` - cell the mark was placed in
    /// * `mark` - the mark that moved
    fn on_move(
        &mut self,
        _round: usize,
        _step: usize,
        _before: &GameState,
        _index: usize,
        _mark: Mark,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once when a round terminates
    fn on_round_end(&mut self, _round: usize, _outcome: RoundOutcome) -> Result<()> {
        Ok(())
    }

    /// Called after the last round
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
