use cs_controls::{Block, BlockKind};
use cs_project::{Diagram, ProjectError, load, load_yaml, save, save_yaml, validate_diagram};

fn temp(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("cs_project_{}_{}", std::process::id(), name))
}

fn sample_diagram() -> Diagram {
    Diagram::new("Roundtrip")
        .with_block(Block::new(
            "pid",
            BlockKind::Pid {
                kp: 2.0,
                ki: 0.5,
                kd: 0.0,
                sample_time: 0.02,
            },
        ))
        .with_block(Block::new(
            "plant",
            BlockKind::TransferFunction {
                numerator: vec![0.2, 0.1],
                denominator: vec![1.0, -0.7],
            },
        ))
        .with_block(Block::new(
            "sine",
            BlockKind::SineWave {
                amplitude: 1.0,
                frequency: 0.5,
                phase: 0.25,
            },
        ))
}

#[test]
fn roundtrip_yaml() {
    let diagram = sample_diagram();
    validate_diagram(&diagram).unwrap();

    let path = temp("roundtrip.yaml");
    save_yaml(&path, &diagram).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(diagram, loaded);
    let _ = std::fs::remove_file(path);
}

#[test]
fn roundtrip_json_by_extension() {
    let diagram = sample_diagram();
    let path = temp("roundtrip.json");
    save(&path, &diagram).unwrap();
    let loaded = load(&path).unwrap();
    assert_eq!(diagram, loaded);
    let _ = std::fs::remove_file(path);
}

#[test]
fn unknown_extension_rejected() {
    let path = temp("diagram.toml");
    let err = save(&path, &sample_diagram()).unwrap_err();
    assert!(matches!(err, ProjectError::UnknownFormat { .. }));
}

#[test]
fn invalid_diagram_not_saved() {
    let diagram = Diagram::new("dup")
        .with_block(Block::new("g", BlockKind::Gain { gain: 1.0 }))
        .with_block(Block::new("g", BlockKind::Gain { gain: 2.0 }));
    let path = temp("dup.yaml");
    let err = save(&path, &diagram).unwrap_err();
    assert!(matches!(err, ProjectError::Validation(_)));
    assert!(!path.exists());
}

#[test]
fn missing_file_is_io_error() {
    let err = load(&temp("does_not_exist.yaml")).unwrap_err();
    assert!(matches!(err, ProjectError::Io(_)));
}
