//! Noughts and crosses rules engine

pub mod board;
pub mod game;
pub mod lines;
pub mod validation;

pub use board::{Board, Cell, Mark};
pub use game::{Game, GameState, GameStatus, Move, RoundOutcome};
pub use lines::{LineAnalyzer, WIN_LINES, WinLine};
