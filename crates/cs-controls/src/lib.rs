//! Numeric calculators for control-system block diagrams.
//!
//! This crate holds every calculation the simulation engine performs. Each
//! calculator is a pure function of its arguments: no calculator owns or
//! mutates state between calls, the caller threads any state it needs.
//!
//! # Calculators
//!
//! - **PID**: one step of the proportional-integral-derivative law
//! - **Transfer function**: causal IIR recursion over coefficient arrays
//! - **Step response**: constant input fed through the recursion
//! - **Frequency response**: magnitude/phase of `N(jω)/D(jω)` over a sweep
//!
//! Block parameters are described by the closed [`BlockKind`] variant, one
//! record shape per block type.

pub mod block;
pub mod error;
pub mod frequency;
pub mod pid;
pub mod sources;
pub mod step;
pub mod sweep;
pub mod transfer;

pub use block::{Block, BlockId, BlockKind};
pub use error::{ControlError, ControlResult};
pub use frequency::{FrequencyPoint, FrequencySample, frequency_response};
pub use pid::{PidGains, PidOutput, PidState, pid};
pub use step::{StepResponse, step_response};
pub use sweep::{linspace, logspace};
pub use transfer::{TransferFunction, evaluate};
