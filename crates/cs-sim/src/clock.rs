//! Fixed-step simulation clock.

use cs_core::{Time, seconds};
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Tracks simulation time for one run.
///
/// Time is `steps · sample_time`, never a running sum. A run is finished
/// once `current_time >= duration`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationClock {
    steps: u64,
    current_time: f64,
    sample_time: f64,
    duration: f64,
}

impl SimulationClock {
    /// Create a clock at `t = 0`.
    ///
    /// # Arguments
    ///
    /// * `sample_time` - Step size in seconds (must be positive)
    /// * `duration` - Run length in seconds (must be positive)
    pub fn new(sample_time: f64, duration: f64) -> SimResult<Self> {
        if !(sample_time > 0.0 && sample_time.is_finite()) {
            return Err(SimError::InvalidArg {
                what: "sample_time must be positive",
            });
        }
        if !(duration > 0.0 && duration.is_finite()) {
            return Err(SimError::InvalidArg {
                what: "duration must be positive",
            });
        }
        Ok(Self {
            steps: 0,
            current_time: 0.0,
            sample_time,
            duration,
        })
    }

    /// Create a clock from unit-typed values.
    pub fn from_time(sample_time: Time, duration: Time) -> SimResult<Self> {
        Self::new(seconds(sample_time), seconds(duration))
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn sample_time(&self) -> f64 {
        self.sample_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Advance by one sample and return the new time.
    pub fn advance(&mut self) -> f64 {
        self.steps += 1;
        self.current_time = self.steps as f64 * self.sample_time;
        self.current_time
    }

    /// Number of samples advanced since the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_finished(&self) -> bool {
        self.current_time >= self.duration
    }

    /// Rewind to `t = 0`.
    pub fn reset(&mut self) {
        self.steps = 0;
        self.current_time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_core::s;

    #[test]
    fn clock_rejects_bad_timing() {
        assert!(SimulationClock::new(0.0, 1.0).is_err());
        assert!(SimulationClock::new(-0.1, 1.0).is_err());
        assert!(SimulationClock::new(0.1, 0.0).is_err());
        assert!(SimulationClock::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn clock_advances_and_finishes() {
        let mut clock = SimulationClock::new(0.25, 1.0).unwrap();
        assert_eq!(clock.advance(), 0.25);
        assert!(!clock.is_finished());
        clock.advance();
        clock.advance();
        assert!(!clock.is_finished());
        clock.advance();
        assert!(clock.is_finished());

        assert_eq!(clock.steps(), 4);

        clock.reset();
        assert_eq!(clock.current_time(), 0.0);
        assert_eq!(clock.steps(), 0);
    }

    #[test]
    fn clock_from_units() {
        let clock = SimulationClock::from_time(s(0.01), s(2.0)).unwrap();
        assert!((clock.sample_time() - 0.01).abs() < 1e-15);
        assert_eq!(clock.duration(), 2.0);
    }
}
