//! Play session: the boundary a front end talks to
//!
//! A [`Session`] owns the current round, the running [`ScoreTally`] and, in
//! vs-computer mode, the [`ComputerOpponent`]. Front ends forward user
//! intents (`attempt_move`, `restart`, ...) and read back statuses, the
//! tally and the end-of-round notice. Pacing of the computer's move is left
//! to the front end.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    Error, MoveError, Result,
    config::{GameMode, SessionConfig},
    opponent::ComputerOpponent,
    ports::{Observer, Strategy},
    tictactoe::{Game, GameState, GameStatus, Mark, RoundOutcome},
};

/// Running totals across rounds, in memory only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTally {
    wins_x: usize,
    wins_o: usize,
    draws: usize,
    games_played: usize,
}

impl ScoreTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished round
    pub fn record(&mut self, outcome: RoundOutcome) {
        match outcome.winner() {
            Some(Mark::X) => self.wins_x += 1,
            Some(Mark::O) => self.wins_o += 1,
            None => self.draws += 1,
        }
        self.games_played += 1;
    }

    pub fn wins(&self, mark: Mark) -> usize {
        match mark {
            Mark::X => self.wins_x,
            Mark::O => self.wins_o,
        }
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn games_played(&self) -> usize {
        self.games_played
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Observer for ScoreTally {
    fn on_round_end(&mut self, _round: usize, outcome: RoundOutcome) -> Result<()> {
        self.record(outcome);
        Ok(())
    }
}

/// What happened to an attempted move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Applied(GameStatus),
    Rejected(MoveError),
}

/// Text shown when a round ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndNotice {
    pub title: String,
    pub message: String,
}

/// A sequence of rounds under one configuration
pub struct Session {
    config: SessionConfig,
    game: Game,
    tally: ScoreTally,
    opponent: Option<ComputerOpponent>,
    observers: Vec<Box<dyn Observer>>,
    round: usize,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let opponent = Self::build_opponent(&config);
        Self {
            config,
            game: Game::new(),
            tally: ScoreTally::new(),
            opponent,
            observers: Vec::new(),
            round: 0,
        }
    }

    /// Register an observer for move and round events
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    fn build_opponent(config: &SessionConfig) -> Option<ComputerOpponent> {
        match config.mode {
            GameMode::TwoPlayer => None,
            GameMode::VsComputer => Some(match config.seed {
                Some(seed) => ComputerOpponent::with_seed(config.difficulty, seed),
                None => ComputerOpponent::new(config.difficulty),
            }),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        self.game.current_state()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn tally(&self) -> &ScoreTally {
        &self.tally
    }

    /// Zero-based index of the current round
    pub fn round(&self) -> usize {
        self.round
    }

    /// Whether the computer should move next
    pub fn is_computer_turn(&self) -> bool {
        let state = self.state();
        !state.is_terminal() && self.config.computer_mark() == Some(state.current_mark())
    }

    /// Try to place `mark` at `index`.
    ///
    /// A rejected move leaves everything untouched. The first applied move of
    /// a round announces the round to observers. When an applied move ends
    /// the round, the tally and every observer receive the outcome once.
    ///
    /// # Errors
    ///
    /// Only observer failures are errors; rule violations come back as
    /// [`MoveResult::Rejected`]. The move stays applied and counted, every
    /// observer still receives the event, and the first failure is returned.
    pub fn attempt_move(&mut self, index: usize, mark: Mark) -> Result<MoveResult> {
        let before = *self.state();
        let status = match self.game.play(index, mark) {
            Ok(status) => status,
            Err(reason) => {
                debug!(index, %mark, %reason, "move rejected");
                return Ok(MoveResult::Rejected(reason));
            }
        };

        let round = self.round;
        let step = self.game.moves.len() - 1;
        let outcome = status.outcome();

        let mut delivered = match outcome {
            Some(outcome) => self.tally.on_round_end(round, outcome),
            None => Ok(()),
        };
        if step == 0 {
            let started = notify_all(&mut self.observers, |o| o.on_round_start(round));
            delivered = delivered.and(started);
        }
        let moved = notify_all(&mut self.observers, |o| {
            o.on_move(round, step, &before, index, mark)
        });
        delivered = delivered.and(moved);

        if let Some(outcome) = outcome {
            let ended = notify_all(&mut self.observers, |o| o.on_round_end(round, outcome));
            delivered = delivered.and(ended);
            info!(
                round,
                %outcome,
                wins_x = self.tally.wins(Mark::X),
                wins_o = self.tally.wins(Mark::O),
                draws = self.tally.draws(),
                "round finished"
            );
        }

        delivered?;
        Ok(MoveResult::Applied(status))
    }

    /// Choose, without applying, the computer's next move.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfiguration`] in two-player mode
    /// - [`Error::NoValidMoves`] if the round is over
    /// - [`MoveError::WrongTurn`] if it is the human's turn
    /// - [`Error::IllegalStrategyMove`] if the opponent breaks its contract;
    ///   this is a defect and callers should not continue the round
    pub fn request_ai_move(&mut self) -> Result<usize> {
        let state = *self.state();
        let Some(opponent) = self.opponent.as_mut() else {
            return Err(Error::InvalidConfiguration {
                message: "no computer opponent in two-player mode".to_string(),
            });
        };
        if state.is_terminal() {
            return Err(Error::NoValidMoves);
        }
        let computer = self.config.human_mark.opponent();
        if state.current_mark() != computer {
            return Err(MoveError::WrongTurn {
                expected: state.current_mark(),
                got: computer,
            }
            .into());
        }

        let choice = opponent.select_move(&state)?;
        if !state.legal_moves().contains(&choice) {
            return Err(Error::IllegalStrategyMove {
                position: choice,
                strategy: opponent.name().to_string(),
            });
        }
        Ok(choice)
    }

    /// Choose the computer's move and apply it
    pub fn play_computer_turn(&mut self) -> Result<MoveResult> {
        let index = self.request_ai_move()?;
        let mark = self.state().current_mark();
        match self.attempt_move(index, mark)? {
            MoveResult::Rejected(reason) => Err(Error::IllegalStrategyMove {
                position: index,
                strategy: format!("computer ({reason})"),
            }),
            applied => Ok(applied),
        }
    }

    /// Start a fresh round, keeping the tally.
    ///
    /// Observers hear about the new round with its first move.
    pub fn restart(&mut self) -> Result<()> {
        self.game = Game::new();
        self.round += 1;
        debug!(round = self.round, "round restarted");
        Ok(())
    }

    /// Zero the tally and start a fresh round
    pub fn reset_scores(&mut self) -> Result<()> {
        self.tally.reset();
        self.restart()
    }

    /// Leave the round for the mode menu: the tally is zeroed and a fresh
    /// round begins
    pub fn return_to_menu(&mut self) -> Result<()> {
        info!(games_played = self.tally.games_played(), "back to menu");
        self.reset_scores()
    }

    /// Return to the menu and continue under a new configuration
    pub fn reconfigure(&mut self, config: SessionConfig) -> Result<()> {
        self.opponent = Self::build_opponent(&config);
        self.config = config;
        self.return_to_menu()
    }

    /// Display name for the side playing `mark`
    pub fn player_name(&self, mark: Mark) -> String {
        if self.config.computer_mark() == Some(mark) {
            "AI".to_string()
        } else {
            format!("Player {mark}")
        }
    }

    /// Notice for the finished round, `None` while it is running
    pub fn end_notice(&self) -> Option<EndNotice> {
        let outcome = self.state().status().outcome()?;
        Some(match outcome {
            RoundOutcome::Draw => EndNotice {
                title: "It's a Draw!".to_string(),
                message: "Nobody wins this round!".to_string(),
            },
            RoundOutcome::Win { mark, .. } => EndNotice {
                title: format!("{} Wins!", self.player_name(mark)),
                message: "Congratulations on your victory!".to_string(),
            },
        })
    }
}

/// Deliver one event to every observer, returning the first failure
fn notify_all<F>(observers: &mut [Box<dyn Observer>], mut event: F) -> Result<()>
where
    F: FnMut(&mut Box<dyn Observer>) -> Result<()>,
{
    let mut first_error = None;
    for observer in observers.iter_mut() {
        if let Err(err) = event(observer) {
            warn!(%err, "observer failed");
            first_error.get_or_insert(err);
        }
    }
    first_error.map_or(Ok(()), Err)
}
