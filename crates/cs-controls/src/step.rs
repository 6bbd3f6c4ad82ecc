//! Step response built on the transfer-function recursion.

use cs_core::whole_steps;
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};
use crate::transfer::TransferFunction;

/// Step response with its sample times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResponse {
    /// Sample times (seconds), `k · sample_time`.
    pub time: Vec<f64>,
    pub output: Vec<f64>,
}

fn validate_timing(duration: f64, sample_time: f64) -> ControlResult<()> {
    if !(sample_time > 0.0 && sample_time.is_finite()) {
        return Err(ControlError::InvalidParameter {
            what: "sample_time must be positive and finite",
        });
    }
    if !(duration > 0.0 && duration.is_finite()) {
        return Err(ControlError::InvalidParameter {
            what: "duration must be positive and finite",
        });
    }
    Ok(())
}

/// Output of the recursion driven by a constant `amplitude`.
///
/// The input has `floor(duration / sample_time)` samples. A count that is not
/// finite or exceeds [`cs_core::MAX_SAMPLES`] is rejected.
pub fn step_response(
    numerator: &[f64],
    denominator: &[f64],
    amplitude: f64,
    duration: f64,
    sample_time: f64,
) -> ControlResult<Vec<f64>> {
    validate_timing(duration, sample_time)?;
    let tf = TransferFunction::new(numerator, denominator)?;
    let input = vec![amplitude; whole_steps(duration, sample_time)?];
    Ok(tf.evaluate(&input))
}

impl TransferFunction {
    /// Step response paired with sample times.
    pub fn step_response(
        &self,
        amplitude: f64,
        duration: f64,
        sample_time: f64,
    ) -> ControlResult<StepResponse> {
        validate_timing(duration, sample_time)?;
        let n = whole_steps(duration, sample_time)?;
        let output = self.evaluate(&vec![amplitude; n]);
        let time = (0..n).map(|k| k as f64 * sample_time).collect();
        Ok(StepResponse { time, output })
    }
}
