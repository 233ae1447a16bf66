//! Match pipeline for two strategies

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Error, Result,
    ports::{Observer, Strategy},
    tictactoe::{GameState, Mark, RoundOutcome},
};

/// Match configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of rounds to play
    pub num_games: usize,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 100,
            seed: None,
        }
    }
}

/// Result of a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Name of the strategy playing X
    pub x_strategy: String,

    /// Name of the strategy playing O
    pub o_strategy: String,

    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,

    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub draw_rate: f64,

    /// Mean number of moves per round
    pub avg_game_length: f64,
}

impl MatchResult {
    pub fn new(
        x_strategy: impl Into<String>,
        o_strategy: impl Into<String>,
        x_wins: usize,
        o_wins: usize,
        draws: usize,
        total_moves: usize,
    ) -> Self {
        let total_games = x_wins + o_wins + draws;
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            x_strategy: x_strategy.into(),
            o_strategy: o_strategy.into(),
            total_games,
            x_wins,
            o_wins,
            draws,
            x_win_rate: rate(x_wins),
            o_win_rate: rate(o_wins),
            draw_rate: rate(draws),
            avg_game_length: if total_games > 0 {
                total_moves as f64 / total_games as f64
            } else {
                0.0
            },
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Plays rounds between a strategy for X and a strategy for O
pub struct MatchPipeline {
    config: MatchConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl MatchPipeline {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Play `num_games` rounds.
    ///
    /// # Errors
    ///
    /// Fails on the first strategy or observer error. A strategy answering
    /// with a move outside the legal set yields
    /// [`Error::IllegalStrategyMove`].
    pub fn run(&mut self, x: &mut dyn Strategy, o: &mut dyn Strategy) -> Result<MatchResult> {
        if let Some(seed) = self.config.seed {
            x.set_rng_seed(seed)?;
            o.set_rng_seed(seed.wrapping_add(1))?;
        }

        for observer in &mut self.observers {
            observer.on_run_start(self.config.num_games)?;
        }

        let mut x_wins = 0;
        let mut o_wins = 0;
        let mut draws = 0;
        let mut total_moves = 0;

        for round in 0..self.config.num_games {
            let (outcome, moves) = self.play_round(round, x, o)?;
            match outcome.winner() {
                Some(Mark::X) => x_wins += 1,
                Some(Mark::O) => o_wins += 1,
                None => draws += 1,
            }
            total_moves += moves;

            for observer in &mut self.observers {
                observer.on_round_end(round, outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        let result = MatchResult::new(x.name(), o.name(), x_wins, o_wins, draws, total_moves);
        info!(
            x = %result.x_strategy,
            o = %result.o_strategy,
            games = result.total_games,
            x_wins,
            o_wins,
            draws,
            "match finished"
        );
        Ok(result)
    }

    fn play_round(
        &mut self,
        round: usize,
        x: &mut dyn Strategy,
        o: &mut dyn Strategy,
    ) -> Result<(RoundOutcome, usize)> {
        for observer in &mut self.observers {
            observer.on_round_start(round)?;
        }

        let mut state = GameState::new();
        let mut step = 0;

        loop {
            if let Some(outcome) = state.status().outcome() {
                debug!(round, %outcome, moves = step, "round finished");
                return Ok((outcome, step));
            }

            let mark = state.current_mark();
            let strategy: &mut dyn Strategy = match mark {
                Mark::X => &mut *x,
                Mark::O => &mut *o,
            };

            let position = strategy.select_move(&state)?;
            if !state.legal_moves().contains(&position) {
                return Err(Error::IllegalStrategyMove {
                    position,
                    strategy: strategy.name().to_string(),
                });
            }

            for observer in &mut self.observers {
                observer.on_move(round, step, &state, position, mark)?;
            }

            state = state.apply_move(position, mark)?;
            step += 1;
        }
    }
}
