use crate::{CoreError, CoreResult};

/// Largest sample count [`whole_steps`] will hand out.
pub const MAX_SAMPLES: usize = 10_000_000;

pub fn ensure_finite(v: f64, what: &'static str) -> CoreResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Number of whole periods of `step` that fit in `span`: `floor(span / step)`.
///
/// The quotient is floored as computed, so `0.3 / 0.1` (which is
/// `2.9999999999999996`) counts 2. Non-positive quotients count 0. A quotient
/// that is not finite or exceeds [`MAX_SAMPLES`] is rejected.
pub fn whole_steps(span: f64, step: f64) -> CoreResult<usize> {
    let ratio = (span / step).floor();
    if !ratio.is_finite() {
        return Err(CoreError::InvalidArg {
            what: "span / step must be finite",
        });
    }
    if ratio <= 0.0 {
        return Ok(0);
    }
    if ratio > MAX_SAMPLES as f64 {
        return Err(CoreError::InvalidArg {
            what: "span / step exceeds the sample limit",
        });
    }
    Ok(ratio as usize)
}
