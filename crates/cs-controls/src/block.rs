//! Block descriptors for the simulation diagram.
//!
//! Every block carries a closed, kind-specific parameter record:
//! - **Sources**: step input, sine wave, gain (evaluated inline each step)
//! - **Delegated**: PID controller, transfer function (sent across the
//!   computation boundary)
//!
//! Omitted parameters take the block editor's defaults.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};
use crate::pid::PidGains;
use crate::sources;

/// Unique identifier for a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub String);

impl BlockId {
    /// Create a new block ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn one() -> f64 {
    1.0
}

fn default_ki() -> f64 {
    0.1
}

fn default_kd() -> f64 {
    0.05
}

fn default_sample_time() -> f64 {
    0.01
}

fn default_numerator() -> Vec<f64> {
    vec![1.0]
}

fn default_denominator() -> Vec<f64> {
    vec![1.0, 1.0]
}

/// Block kind defines the type and parameters of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    /// PID controller.
    Pid {
        #[serde(default = "one")]
        kp: f64,
        #[serde(default = "default_ki")]
        ki: f64,
        #[serde(default = "default_kd")]
        kd: f64,
        /// Controller update period (seconds), used as the PID `dt`.
        #[serde(default = "default_sample_time")]
        sample_time: f64,
    },

    /// Discrete transfer function.
    TransferFunction {
        #[serde(default = "default_numerator")]
        numerator: Vec<f64>,
        #[serde(default = "default_denominator")]
        denominator: Vec<f64>,
    },

    /// Static gain.
    Gain {
        #[serde(default = "one")]
        gain: f64,
    },

    /// Step source.
    StepInput {
        #[serde(default = "one")]
        amplitude: f64,
        /// Switch-on time (seconds).
        #[serde(default)]
        step_time: f64,
    },

    /// Sine source.
    SineWave {
        #[serde(default = "one")]
        amplitude: f64,
        /// Frequency (Hz).
        #[serde(default = "one")]
        frequency: f64,
        /// Phase (radians).
        #[serde(default)]
        phase: f64,
    },
}

impl BlockKind {
    /// Stable name of the kind, matching the serialized tag.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pid { .. } => "pid",
            Self::TransferFunction { .. } => "transfer_function",
            Self::Gain { .. } => "gain",
            Self::StepInput { .. } => "step_input",
            Self::SineWave { .. } => "sine_wave",
        }
    }

    /// True for kinds evaluated inline from time alone (plus placeholder input).
    pub fn is_source(&self) -> bool {
        matches!(
            self,
            Self::Gain { .. } | Self::StepInput { .. } | Self::SineWave { .. }
        )
    }

    /// True for kinds dispatched to a calculator across the compute boundary.
    pub fn is_delegated(&self) -> bool {
        matches!(self, Self::Pid { .. } | Self::TransferFunction { .. })
    }

    /// PID gains, if this is a PID block.
    pub fn pid_gains(&self) -> Option<PidGains> {
        match self {
            Self::Pid { kp, ki, kd, .. } => Some(PidGains::new(*kp, *ki, *kd)),
            _ => None,
        }
    }

    /// Output of a source block at time `t`, `None` for delegated kinds.
    pub fn source_output(&self, t: f64, input: f64) -> Option<f64> {
        match self {
            Self::Gain { gain } => Some(sources::gain(*gain, input)),
            Self::StepInput {
                amplitude,
                step_time,
            } => Some(sources::step_input(*amplitude, *step_time, t)),
            Self::SineWave {
                amplitude,
                frequency,
                phase,
            } => Some(sources::sine_wave(*amplitude, *frequency, *phase, t)),
            Self::Pid { .. } | Self::TransferFunction { .. } => None,
        }
    }

    /// Check parameters that would be rejected by the calculators.
    pub fn validate(&self) -> ControlResult<()> {
        match self {
            Self::Pid {
                kp,
                ki,
                kd,
                sample_time,
            } => {
                if ![kp, ki, kd].iter().all(|v| v.is_finite()) {
                    return Err(ControlError::InvalidParameter {
                        what: "pid gains must be finite",
                    });
                }
                if !(*sample_time > 0.0 && sample_time.is_finite()) {
                    return Err(ControlError::InvalidParameter {
                        what: "pid sample_time must be positive",
                    });
                }
            }
            Self::TransferFunction {
                numerator,
                denominator,
            } => {
                if numerator.is_empty() || denominator.is_empty() {
                    return Err(ControlError::InvalidParameter {
                        what: "transfer function coefficients must not be empty",
                    });
                }
                if numerator.iter().chain(denominator).any(|c| !c.is_finite()) {
                    return Err(ControlError::InvalidParameter {
                        what: "transfer function coefficients must be finite",
                    });
                }
            }
            Self::Gain { gain } => {
                if !gain.is_finite() {
                    return Err(ControlError::InvalidParameter {
                        what: "gain must be finite",
                    });
                }
            }
            Self::StepInput {
                amplitude,
                step_time,
            } => {
                if !amplitude.is_finite() || !step_time.is_finite() {
                    return Err(ControlError::InvalidParameter {
                        what: "step parameters must be finite",
                    });
                }
            }
            Self::SineWave {
                amplitude,
                frequency,
                phase,
            } => {
                if ![amplitude, frequency, phase].iter().all(|v| v.is_finite()) {
                    return Err(ControlError::InvalidParameter {
                        what: "sine parameters must be finite",
                    });
                }
            }
        }
        Ok(())
    }
}

/// A block placed in the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
}

impl Block {
    /// Create a new block.
    pub fn new(id: impl Into<BlockId>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_block() {
        let block = Block::new(
            "step1",
            BlockKind::StepInput {
                amplitude: 2.0,
                step_time: 1.0,
            },
        );
        assert!(block.kind.is_source());
        assert!(!block.kind.is_delegated());
        assert_eq!(block.kind.source_output(1.5, 0.0), Some(2.0));
        assert_eq!(block.kind.source_output(0.5, 0.0), Some(0.0));
    }

    #[test]
    fn pid_block_is_delegated() {
        let kind = BlockKind::Pid {
            kp: 2.0,
            ki: 0.0,
            kd: 0.5,
            sample_time: 0.01,
        };
        assert!(kind.is_delegated());
        assert_eq!(kind.source_output(0.0, 1.0), None);
        assert_eq!(kind.pid_gains(), Some(PidGains::new(2.0, 0.0, 0.5)));
    }

    #[test]
    fn omitted_parameters_take_defaults() {
        let kind: BlockKind = serde_json::from_str(r#"{"type":"pid"}"#).unwrap();
        assert_eq!(
            kind,
            BlockKind::Pid {
                kp: 1.0,
                ki: 0.1,
                kd: 0.05,
                sample_time: 0.01
            }
        );

        let tf: BlockKind = serde_json::from_str(r#"{"type":"transfer_function"}"#).unwrap();
        assert_eq!(
            tf,
            BlockKind::TransferFunction {
                numerator: vec![1.0],
                denominator: vec![1.0, 1.0]
            }
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let res: Result<BlockKind, _> = serde_json::from_str(r#"{"type":"plant_model"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn validate_catches_bad_parameters() {
        let bad_pid = BlockKind::Pid {
            kp: 1.0,
            ki: 0.0,
            kd: 0.0,
            sample_time: 0.0,
        };
        assert!(bad_pid.validate().is_err());

        let empty_tf = BlockKind::TransferFunction {
            numerator: vec![],
            denominator: vec![1.0],
        };
        assert!(empty_tf.validate().is_err());

        let ok = BlockKind::SineWave {
            amplitude: 1.0,
            frequency: 2.0,
            phase: 0.0,
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn labels_match_serialized_tag() {
        let kind = BlockKind::Gain { gain: 3.0 };
        let json = serde_json::to_string(&kind).unwrap();
        assert!(json.contains(&format!(r#""type":"{}""#, kind.label())));
    }
}
