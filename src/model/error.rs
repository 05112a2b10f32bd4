//! Error types for pipeline configuration.

use super::Role;
use std::time::Duration;
use thiserror::Error;

/// Reasons a [`PipelineConfig`](super::PipelineConfig) cannot be started.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// Every role needs at least one worker or the pipeline stalls.
    #[error("{0} pool must have at least one worker")]
    EmptyPool(Role),

    #[error("{name} range is inverted: min {min:?} > max {max:?}")]
    InvalidDelay {
        name: &'static str,
        min: Duration,
        max: Duration,
    },

    #[error("yield range is inverted: min {min} > max {max}")]
    InvalidYieldRange { min: u32, max: u32 },
}
