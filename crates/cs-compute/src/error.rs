//! Error types for the computation boundary.

use thiserror::Error;

/// Result type for backend operations.
pub type ComputeResult<T> = Result<T, ComputeError>;

/// Transport-level failures. Calculation failures travel inside responses.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComputeError {
    /// The other side of the channel is gone.
    #[error("Compute backend disconnected")]
    Disconnected,

    /// No response arrived within the wait budget.
    #[error("No response within {waited_ms} ms")]
    Timeout { waited_ms: u128 },

    /// Nothing was submitted that could still be answered.
    #[error("No requests pending")]
    NothingPending,
}
