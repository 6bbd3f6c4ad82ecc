//! Discrete transfer-function evaluation.
//!
//! Direct-form causal recursion with zero initial conditions:
//!
//! ```text
//! y[i] = ( Σ_{j=0..m} b[j]·x[i-j] - Σ_{j=1..n} a[j]·y[i-j] ) / a0
//! ```
//!
//! Terms with `i - j < 0` are dropped. `a0` is `a[0]`, or `1.0` when `a[0]` is
//! exactly zero. The coefficients are taken as already describing the digital
//! recursion; nothing here discretizes a continuous model.

use cs_core::Polynomial;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ControlError, ControlResult};
use crate::frequency::{self, FrequencySample};

/// Numerator/denominator pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferFunction {
    pub numerator: Polynomial,
    pub denominator: Polynomial,
}

impl TransferFunction {
    /// Build from raw coefficient slices, rejecting empty ones.
    pub fn new(numerator: &[f64], denominator: &[f64]) -> ControlResult<Self> {
        let numerator = Polynomial::from_slice(numerator).map_err(|_| {
            ControlError::InvalidParameter {
                what: "numerator must have at least one coefficient",
            }
        })?;
        let denominator = Polynomial::from_slice(denominator).map_err(|_| {
            ControlError::InvalidParameter {
                what: "denominator must have at least one coefficient",
            }
        })?;
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// True when `a[0]` is zero and the recursion substitutes `1.0` for it.
    pub fn a0_is_degenerate(&self) -> bool {
        self.denominator.leading_is_degenerate()
    }

    /// Run the recursion over `input`. Output has the same length as input.
    pub fn evaluate(&self, input: &[f64]) -> Vec<f64> {
        let b = self.numerator.coeffs();
        let a = self.denominator.coeffs();
        let a0 = self.denominator.leading_or_one();

        let mut output = Vec::with_capacity(input.len());
        for i in 0..input.len() {
            let mut acc = 0.0;
            for (j, bj) in b.iter().enumerate().take(i + 1) {
                acc += bj * input[i - j];
            }
            for (j, aj) in a.iter().enumerate().take(i + 1).skip(1) {
                acc -= aj * output[i - j];
            }
            output.push(acc / a0);
        }
        output
    }

    /// Continuous-frequency response, see [`frequency::frequency_response`].
    pub fn frequency_response(&self, frequencies: &[f64]) -> Vec<FrequencySample> {
        frequency::sweep(&self.numerator, &self.denominator, frequencies)
    }
}

/// Evaluate the recursion for raw coefficient slices.
pub fn evaluate(numerator: &[f64], denominator: &[f64], input: &[f64]) -> ControlResult<Vec<f64>> {
    let tf = TransferFunction::new(numerator, denominator)?;
    if tf.a0_is_degenerate() {
        warn!("denominator leading coefficient is zero, recursion uses a0 = 1");
    }
    Ok(tf.evaluate(input))
}
