//! Noughts and crosses with a computer opponent
//!
//! This crate provides:
//! - The rules engine: board, move validation, win and draw detection
//! - A computer opponent in three tiers (random, mixed, minimax)
//! - A play session that tracks scores across rounds
//! - A match pipeline for simulating games between strategies
//! - The `noughts` command-line front end

pub mod cli;
pub mod config;
pub mod error;
pub mod opponent;
pub mod pipeline;
pub mod ports;
pub mod session;
pub mod tictactoe;

pub use error::{Error, MoveError, Result};
