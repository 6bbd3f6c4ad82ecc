//! Frequency grids for response sweeps.

use crate::error::{ControlError, ControlResult};

/// `n` evenly spaced points from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> ControlResult<Vec<f64>> {
    if n == 0 {
        return Err(ControlError::InvalidParameter {
            what: "sweep needs at least one point",
        });
    }
    if !start.is_finite() || !stop.is_finite() {
        return Err(ControlError::InvalidParameter {
            what: "sweep bounds must be finite",
        });
    }
    if n == 1 {
        return Ok(vec![start]);
    }
    let step = (stop - start) / (n - 1) as f64;
    Ok((0..n).map(|i| start + step * i as f64).collect())
}

/// `n` logarithmically spaced points from `start` to `stop` inclusive.
pub fn logspace(start: f64, stop: f64, n: usize) -> ControlResult<Vec<f64>> {
    if !(start > 0.0 && stop > 0.0) {
        return Err(ControlError::InvalidParameter {
            what: "log sweep bounds must be positive",
        });
    }
    Ok(linspace(start.log10(), stop.log10(), n)?
        .into_iter()
        .map(|e| 10f64.powf(e))
        .collect())
}
