//! CLI infrastructure for noughts
//!
//! This module provides the command-line interface for playing rounds,
//! simulating matches between computer tiers, and analysing positions.

pub mod commands;
pub mod output;
