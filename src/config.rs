//! Configuration for a play session.

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, opponent::Difficulty, tictactoe::Mark};

/// Who controls the second mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Two humans share the board
    #[default]
    TwoPlayer,
    /// One human against the computer opponent
    VsComputer,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameMode::TwoPlayer => "two-player",
            GameMode::VsComputer => "vs-computer",
        };
        f.write_str(label)
    }
}

impl FromStr for GameMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "two-player" | "two_player" | "pvp" | "2p" => Ok(GameMode::TwoPlayer),
            "vs-computer" | "vs_computer" | "pvc" | "computer" | "ai" => Ok(GameMode::VsComputer),
            _ => Err(Error::ParseGameMode {
                input: s.to_string(),
                expected: "two-player/pvp, vs-computer/pvc".to_string(),
            }),
        }
    }
}

/// Configuration for a [`Session`](crate::session::Session).
///
/// Builder-style; every field has a default so a TOML file only needs the
/// values it changes:
///
/// ```toml
/// mode = "vs-computer"
/// difficulty = "medium"
/// ai_delay_ms = 0
/// ```
///
/// # Examples
///
/// ```
/// use noughts::{config::{GameMode, SessionConfig}, opponent::Difficulty, tictactoe::Mark};
///
/// let config = SessionConfig::new(GameMode::VsComputer)
///     .with_difficulty(Difficulty::Easy)
///     .with_human_mark(Mark::O)
///     .with_seed(42);
/// assert_eq!(config.computer_mark(), Some(Mark::X));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Two-player or against the computer
    pub mode: GameMode,
    /// Computer strength; ignored in two-player mode
    pub difficulty: Difficulty,
    /// Mark played by the human in vs-computer mode
    pub human_mark: Mark,
    /// Random seed for reproducible computer play
    pub seed: Option<u64>,
    /// Pause before a computer move is shown, in milliseconds
    pub ai_delay_ms: u64,
}

impl SessionConfig {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            difficulty: Difficulty::default(),
            human_mark: Mark::X,
            seed: None,
            ai_delay_ms: 500,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_human_mark(mut self, mark: Mark) -> Self {
        self.human_mark = mark;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_ai_delay_ms(mut self, delay_ms: u64) -> Self {
        self.ai_delay_ms = delay_ms;
        self
    }

    /// The computer's mark, `None` in two-player mode
    pub fn computer_mark(&self) -> Option<Mark> {
        match self.mode {
            GameMode::TwoPlayer => None,
            GameMode::VsComputer => Some(self.human_mark.opponent()),
        }
    }

    /// Load a configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {}", path.display()),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}
