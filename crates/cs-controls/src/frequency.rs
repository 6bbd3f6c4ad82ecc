//! Frequency response of `N(s)/D(s)` at `s = j·2πf`.
//!
//! Coefficients are read highest power first. This evaluates the continuous
//! polynomial even though [`crate::transfer`] treats the same coefficients as
//! a discrete recursion. The two views are not reconciled.

use std::f64::consts::PI;

use cs_core::{Complex, Polynomial};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ControlResult;
use crate::transfer::TransferFunction;

/// Magnitude and phase at one frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyPoint {
    /// Frequency (Hz).
    pub frequency: f64,
    /// `20·log10|H|`.
    pub magnitude_db: f64,
    /// `arg(H)` in degrees, in `(-180, 180]`.
    pub phase_deg: f64,
}

/// Outcome at one swept frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FrequencySample {
    Ok(FrequencyPoint),
    /// `|D(jω)| = 0` (or the frequency itself was not finite).
    Degenerate { frequency: f64 },
}

impl FrequencySample {
    pub fn frequency(&self) -> f64 {
        match self {
            Self::Ok(p) => p.frequency,
            Self::Degenerate { frequency } => *frequency,
        }
    }

    pub fn point(&self) -> Option<&FrequencyPoint> {
        match self {
            Self::Ok(p) => Some(p),
            Self::Degenerate { .. } => None,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate { .. })
    }
}

fn evaluate_at(num: &Polynomial, den: &Polynomial, frequency: f64) -> FrequencySample {
    if !frequency.is_finite() {
        return FrequencySample::Degenerate { frequency };
    }
    let s = Complex::imag(2.0 * PI * frequency);
    let n = num.eval_complex(s);
    let d = den.eval_complex(s);
    match n.checked_div(d) {
        Some(q) => FrequencySample::Ok(FrequencyPoint {
            frequency,
            magnitude_db: 20.0 * q.abs().log10(),
            phase_deg: q.arg().to_degrees(),
        }),
        None => {
            debug!(frequency, "denominator vanishes");
            FrequencySample::Degenerate { frequency }
        }
    }
}

pub(crate) fn sweep(num: &Polynomial, den: &Polynomial, frequencies: &[f64]) -> Vec<FrequencySample> {
    frequencies
        .iter()
        .map(|&f| evaluate_at(num, den, f))
        .collect()
}

/// Magnitude (dB) and phase (degrees) at every requested frequency.
///
/// A frequency where the denominator vanishes yields a
/// [`FrequencySample::Degenerate`] entry; the rest of the sweep is unaffected.
pub fn frequency_response(
    numerator: &[f64],
    denominator: &[f64],
    frequencies: &[f64],
) -> ControlResult<Vec<FrequencySample>> {
    let tf = TransferFunction::new(numerator, denominator)?;
    Ok(tf.frequency_response(frequencies))
}
