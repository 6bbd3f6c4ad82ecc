//! Diagram schema definitions.

use cs_controls::Block;
use cs_core::s;
use cs_sim::{SimResult, SimulationClock};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diagram {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Diagram {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: crate::validate::LATEST_VERSION,
            name: name.into(),
            simulation: SimulationSettings::default(),
            blocks: Vec::new(),
        }
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }
}

fn default_sample_time() -> f64 {
    0.01
}

fn default_duration() -> f64 {
    10.0
}

/// Run timing, in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimulationSettings {
    #[serde(default = "default_sample_time")]
    pub sample_time: f64,
    #[serde(default = "default_duration")]
    pub duration: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            sample_time: default_sample_time(),
            duration: default_duration(),
        }
    }
}

impl SimulationSettings {
    pub fn clock(&self) -> SimResult<SimulationClock> {
        SimulationClock::from_time(s(self.sample_time), s(self.duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_controls::BlockKind;

    #[test]
    fn settings_default_when_omitted() {
        let yaml = "version: 1\nname: bare\n";
        let diagram: Diagram = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(diagram.simulation, SimulationSettings::default());
        assert!(diagram.blocks.is_empty());
    }

    #[test]
    fn block_kinds_parse_from_yaml() {
        let yaml = r#"
version: 1
name: demo
simulation: { sample_time: 0.05, duration: 2.0 }
blocks:
  - id: pid1
    kind: { type: pid, kp: 2.0 }
  - id: plant
    kind: { type: transfer_function, numerator: [1.0], denominator: [1.0, -0.5] }
  - id: ref
    kind: { type: step_input, amplitude: 3.0 }
"#;
        let diagram: Diagram = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(diagram.simulation.sample_time, 0.05);
        assert_eq!(diagram.blocks.len(), 3);
        assert_eq!(
            diagram.blocks[0].kind,
            BlockKind::Pid {
                kp: 2.0,
                ki: 0.1,
                kd: 0.05,
                sample_time: 0.01
            }
        );
        assert_eq!(diagram.blocks[2].kind.label(), "step_input");
    }

    #[test]
    fn settings_build_a_clock() {
        let settings = SimulationSettings {
            sample_time: 0.5,
            duration: 2.0,
        };
        let clock = settings.clock().unwrap();
        assert!((clock.sample_time() - 0.5).abs() < 1e-12);
        assert!((clock.duration() - 2.0).abs() < 1e-12);

        let bad = SimulationSettings {
            sample_time: 0.0,
            duration: 2.0,
        };
        assert!(bad.clock().is_err());
    }
}
