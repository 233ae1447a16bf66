//! Error types for the noughts crate

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tictactoe::Mark;

/// Reasons a move can be rejected by the rules engine.
///
/// All of these are recoverable: the caller ignores the input and asks again.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveError {
    #[error("position {index} is out of range (must be 0-8)")]
    OutOfRange { index: usize },

    #[error("position {index} is already occupied")]
    CellOccupied { index: usize },

    #[error("game already over")]
    GameOver,

    #[error("it is {expected}'s turn, not {got}'s")]
    WrongTurn { expected: Mark, got: Mark },
}

/// Main error type for the noughts crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("move rejected: {0}")]
    Move(#[from] MoveError),

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("strategy '{strategy}' returned illegal move {position}")]
    IllegalStrategyMove { position: usize, strategy: String },

    #[error("board string must have {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must be equal or X ahead by 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("board '{board}' cannot be reached by alternating legal moves: {reason}")]
    UnreachableBoard { board: String, reason: String },

    #[error("invalid mark '{input}' (expected 'X' or 'O')")]
    ParseMark { input: String },

    #[error("invalid difficulty '{input}'. Expected one of: {expected}")]
    ParseDifficulty { input: String, expected: String },

    #[error("invalid game mode '{input}'. Expected one of: {expected}")]
    ParseGameMode { input: String, expected: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
