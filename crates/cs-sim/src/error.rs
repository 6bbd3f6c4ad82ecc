//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while driving a simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Simulation is not running")]
    NotRunning,

    #[error("Compute backend error: {message}")]
    Compute { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<cs_compute::ComputeError> for SimError {
    fn from(e: cs_compute::ComputeError) -> Self {
        SimError::Compute {
            message: e.to_string(),
        }
    }
}
