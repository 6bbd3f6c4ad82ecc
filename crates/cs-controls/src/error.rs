//! Error types for control calculations.

use thiserror::Error;

/// Result type for control calculations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur in control calculations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// A parameter was rejected before any computation ran.
    #[error("Invalid parameter: {what}")]
    InvalidParameter { what: &'static str },

    /// The computation hit a singular or non-finite condition.
    #[error("Numeric degenerate: {what}")]
    NumericDegenerate { what: String },

    /// Unexpected internal fault.
    #[error("Computation failure: {message}")]
    ComputationFailure { message: String },
}

impl From<cs_core::CoreError> for ControlError {
    fn from(e: cs_core::CoreError) -> Self {
        match e {
            cs_core::CoreError::InvalidArg { what } => ControlError::InvalidParameter { what },
            cs_core::CoreError::NonFinite { what, value } => ControlError::NumericDegenerate {
                what: format!("{what} is {value}"),
            },
        }
    }
}
