//! Ports (trait boundaries) between the engine and its callers.

pub mod observer;
pub mod strategy;

pub use observer::Observer;
pub use strategy::Strategy;
