use thiserror::Error;

use super::config::ConfigError;
use super::torsor::TorsorError;
use crate::core::coefficient::CoefficientError;
use crate::core::combination::CombinationError;
use crate::core::stress::StressError;
use crate::core::table::TableError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Integrity check failed: {0}")]
    Integrity(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("State {state} is out of range ({size} states)")]
    StateOutOfRange { state: usize, size: usize },

    #[error("Admissible stress coefficient of state {state} must be positive, got {value}")]
    InvalidCoefficient { state: usize, value: f64 },

    #[error("Search was cancelled")]
    Cancelled,

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Interpolation failed: {source}")]
    Table {
        #[from]
        source: TableError,
    },

    #[error("Coefficient lookup failed: {source}")]
    Coefficient {
        #[from]
        source: CoefficientError,
    },

    #[error(transparent)]
    Stress(#[from] StressError),

    #[error("Combination space error: {source}")]
    Combination {
        #[from]
        source: CombinationError,
    },

    #[error("Torsor combination error: {source}")]
    Torsor {
        #[from]
        source: TorsorError,
    },
}
