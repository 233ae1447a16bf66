//! Observers for match pipelines
//!
//! Observers allow composable data collection during a match without coupling
//! the play loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Observer,
    tictactoe::{GameState, Mark, RoundOutcome, WinLine},
};

/// One move of a recorded round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step number within the round
    pub step: usize,
    /// Board before the move, encoded
    pub board: String,
    /// Mark that moved
    pub mark: Mark,
    /// Cell chosen
    pub position: usize,
}

/// Complete record of one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: usize,
    /// Human-readable outcome, e.g. "X wins on [0, 4, 8]"
    pub outcome: String,
    pub winner: Option<Mark>,
    pub winning_line: Option<WinLine>,
    pub steps: Vec<StepRecord>,
    pub total_moves: usize,
}

/// Progress bar observer - shows match progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
        }
    }

    fn message(&self) -> String {
        format!("X:{} O:{} D:{}", self.x_wins, self.o_wins, self.draws)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, total_rounds: usize) -> Result<()> {
        let pb = ProgressBar::new(total_rounds as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_round_end(&mut self, round: usize, outcome: RoundOutcome) -> Result<()> {
        match outcome.winner() {
            Some(Mark::X) => self.x_wins += 1,
            Some(Mark::O) => self.o_wins += 1,
            None => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(round as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// JSONL observer - exports one [`RoundRecord`] per line
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current_steps: Vec<StepRecord>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            current_steps: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_round_start(&mut self, _round: usize) -> Result<()> {
        self.current_steps.clear();
        Ok(())
    }

    fn on_move(
        &mut self,
        _round: usize,
        step: usize,
        before: &GameState,
        index: usize,
        mark: Mark,
    ) -> Result<()> {
        self.current_steps.push(StepRecord {
            step,
            board: before.board().encode(),
            mark,
            position: index,
        });
        Ok(())
    }

    fn on_round_end(&mut self, round: usize, outcome: RoundOutcome) -> Result<()> {
        let winning_line = match outcome {
            RoundOutcome::Win { line, .. } => Some(line),
            RoundOutcome::Draw => None,
        };
        let record = RoundRecord {
            round,
            outcome: outcome.to_string(),
            winner: outcome.winner(),
            winning_line,
            total_moves: self.current_steps.len(),
            steps: std::mem::take(&mut self.current_steps),
        };

        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
