//! Diagram validation.

use std::collections::HashSet;

use crate::schema::Diagram;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate block ID: {id}")]
    DuplicateId { id: String },

    #[error("Empty block ID at position {index}")]
    EmptyId { index: usize },

    #[error("Invalid block '{id}': {reason}")]
    InvalidBlock { id: String, reason: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_diagram(diagram: &Diagram) -> Result<(), ValidationError> {
    if diagram.version == 0 || diagram.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: diagram.version,
        });
    }

    let sim = &diagram.simulation;
    positive("simulation.sample_time", sim.sample_time)?;
    positive("simulation.duration", sim.duration)?;

    let mut ids = HashSet::new();
    for (index, block) in diagram.blocks.iter().enumerate() {
        if block.id.as_str().is_empty() {
            return Err(ValidationError::EmptyId { index });
        }
        if !ids.insert(&block.id) {
            return Err(ValidationError::DuplicateId {
                id: block.id.to_string(),
            });
        }
        block
            .kind
            .validate()
            .map_err(|e| ValidationError::InvalidBlock {
                id: block.id.to_string(),
                reason: e.to_string(),
            })?;
    }

    Ok(())
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_controls::{Block, BlockKind};

    fn gain(id: &str) -> Block {
        Block::new(id, BlockKind::Gain { gain: 1.0 })
    }

    #[test]
    fn duplicate_ids_rejected() {
        let diagram = Diagram::new("dup").with_block(gain("g")).with_block(gain("g"));
        assert!(matches!(
            validate_diagram(&diagram),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn empty_id_rejected() {
        let diagram = Diagram::new("empty").with_block(gain(""));
        assert!(matches!(
            validate_diagram(&diagram),
            Err(ValidationError::EmptyId { index: 0 })
        ));
    }

    #[test]
    fn bad_block_parameters_rejected() {
        let diagram = Diagram::new("bad").with_block(Block::new(
            "tf",
            BlockKind::TransferFunction {
                numerator: vec![],
                denominator: vec![1.0],
            },
        ));
        let err = validate_diagram(&diagram).unwrap_err();
        assert!(err.to_string().contains("tf"));
    }

    #[test]
    fn timing_must_be_positive() {
        let mut diagram = Diagram::new("timing");
        diagram.simulation.duration = -1.0;
        assert!(matches!(
            validate_diagram(&diagram),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn future_version_rejected() {
        let mut diagram = Diagram::new("future");
        diagram.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_diagram(&diagram),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn valid_diagram_passes() {
        let diagram = Diagram::new("ok")
            .with_block(gain("g1"))
            .with_block(Block::new("pid", BlockKind::Pid {
                kp: 1.0,
                ki: 0.1,
                kd: 0.05,
                sample_time: 0.01,
            }));
        validate_diagram(&diagram).unwrap();
    }
}
