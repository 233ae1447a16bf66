//! Batch play between strategies
//!
//! This module provides:
//! - A match pipeline that plays many rounds between two strategies
//! - Observers that report progress and export rounds

pub mod observers;
pub mod simulation;

pub use observers::{JsonlObserver, ProgressObserver, RoundRecord, StepRecord};
pub use simulation::{MatchConfig, MatchPipeline, MatchResult};

pub use crate::ports::{Observer, Strategy};
