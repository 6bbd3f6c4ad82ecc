//! PID controller step.
//!
//! Parallel-form PID evaluated one sample at a time:
//!
//! ```text
//! e      = sp - pv
//! I'     = I + e·dt
//! D      = (e - e_prev) / dt
//! output = kp·e + ki·I' + kd·D
//! ```
//!
//! The calculator holds no state. Callers carry [`PidState`] between steps and
//! replace it with [`PidOutput::next_state`] after each successful call.

use cs_core::ensure_finite;
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

/// PID gains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
}

impl PidGains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }

    /// Compute one controller step.
    ///
    /// # Arguments
    ///
    /// * `state` - Error and integral carried from the previous step
    /// * `setpoint` - Desired value
    /// * `process_value` - Measured value
    /// * `dt` - Time since last update (seconds), must be positive
    pub fn compute(
        &self,
        state: PidState,
        setpoint: f64,
        process_value: f64,
        dt: f64,
    ) -> ControlResult<PidOutput> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(ControlError::InvalidParameter {
                what: "dt must be positive and finite",
            });
        }
        let inputs = [
            self.kp,
            self.ki,
            self.kd,
            setpoint,
            process_value,
            state.previous_error,
            state.integral,
        ];
        if inputs.iter().any(|v| !v.is_finite()) {
            return Err(ControlError::InvalidParameter {
                what: "pid gains, signals and state must be finite",
            });
        }

        // Positive error means PV is below setpoint
        let error = setpoint - process_value;
        let integral = ensure_finite(state.integral + error * dt, "pid integral")?;
        let derivative = ensure_finite((error - state.previous_error) / dt, "pid derivative")?;
        let output = ensure_finite(
            self.kp * error + self.ki * integral + self.kd * derivative,
            "pid output",
        )?;

        Ok(PidOutput {
            output,
            error,
            integral,
            derivative,
        })
    }
}

impl Default for PidGains {
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.1,
            kd: 0.05,
        }
    }
}

/// State carried between PID steps.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PidState {
    /// Error seen on the previous step.
    pub previous_error: f64,
    /// Integral accumulator.
    pub integral: f64,
}

/// Result of one PID step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidOutput {
    pub output: f64,
    pub error: f64,
    /// Updated integral accumulator.
    pub integral: f64,
    pub derivative: f64,
}

impl PidOutput {
    /// State to pass into the next step.
    pub fn next_state(&self) -> PidState {
        PidState {
            previous_error: self.error,
            integral: self.integral,
        }
    }
}

/// Free-function form of [`PidGains::compute`].
pub fn pid(
    gains: &PidGains,
    setpoint: f64,
    process_value: f64,
    dt: f64,
    state: PidState,
) -> ControlResult<PidOutput> {
    gains.compute(state, setpoint, process_value, dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_only_reference_values() {
        let gains = PidGains::new(1.0, 0.0, 0.0);
        let out = pid(&gains, 1.0, 0.5, 0.01, PidState::default()).unwrap();
        assert!((out.output - 0.5).abs() < 1e-12);
        assert!((out.error - 0.5).abs() < 1e-12);
        assert!((out.integral - 0.005).abs() < 1e-12);
        assert!((out.derivative - 50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_dt_is_rejected() {
        let gains = PidGains::new(1.0, 0.0, 0.0);
        let err = pid(&gains, 1.0, 0.5, 0.0, PidState::default()).unwrap_err();
        assert!(matches!(err, ControlError::InvalidParameter { .. }));
    }

    #[test]
    fn negative_dt_is_rejected() {
        let gains = PidGains::default();
        assert!(pid(&gains, 1.0, 0.5, -0.01, PidState::default()).is_err());
        assert!(pid(&gains, 1.0, 0.5, f64::NAN, PidState::default()).is_err());
    }

    #[test]
    fn nan_signal_is_rejected() {
        let gains = PidGains::default();
        let err = pid(&gains, f64::NAN, 0.5, 0.01, PidState::default()).unwrap_err();
        assert!(matches!(err, ControlError::InvalidParameter { .. }));
    }

    #[test]
    fn overflowing_output_is_degenerate() {
        let gains = PidGains::new(0.0, 0.0, 1e308);
        let err = pid(&gains, 1.0, 0.5, 1e-10, PidState::default()).unwrap_err();
        match err {
            ControlError::NumericDegenerate { what } => assert!(what.contains("pid output")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn carried_state_feeds_next_step() {
        let gains = PidGains::new(0.0, 1.0, 1.0);
        let first = pid(&gains, 1.0, 0.0, 0.1, PidState::default()).unwrap();
        let second = pid(&gains, 1.0, 0.0, 0.1, first.next_state()).unwrap();

        // Constant error: derivative vanishes after the first step
        assert!((first.derivative - 10.0).abs() < 1e-12);
        assert!(second.derivative.abs() < 1e-12);
        assert!((second.integral - 0.2).abs() < 1e-12);
        assert!((second.output - 0.2).abs() < 1e-12);
    }

    #[test]
    fn identical_inputs_identical_outputs() {
        let gains = PidGains::default();
        let state = PidState {
            previous_error: 0.3,
            integral: -1.2,
        };
        let a = pid(&gains, 2.0, 1.5, 0.02, state).unwrap();
        let b = pid(&gains, 2.0, 1.5, 0.02, state).unwrap();
        assert_eq!(a, b);
    }
}
