//! Signal sources evaluated directly at the current simulation time.

use std::f64::consts::PI;

/// `amplitude` once `t >= step_time`, zero before.
pub fn step_input(amplitude: f64, step_time: f64, t: f64) -> f64 {
    if t >= step_time { amplitude } else { 0.0 }
}

/// `amplitude · sin(2π·frequency·t + phase)`, phase in radians.
pub fn sine_wave(amplitude: f64, frequency: f64, phase: f64, t: f64) -> f64 {
    amplitude * (2.0 * PI * frequency * t + phase).sin()
}

/// Static gain.
pub fn gain(k: f64, input: f64) -> f64 {
    k * input
}
