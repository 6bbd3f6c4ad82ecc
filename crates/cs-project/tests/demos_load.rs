use std::path::Path;

#[test]
fn demos_load_and_validate() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
    let demos = ["pid_loop.yaml", "lowpass.json"];

    for name in demos {
        let path = root.join(name);
        let diagram =
            cs_project::load(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        cs_project::validate_diagram(&diagram)
            .unwrap_or_else(|e| panic!("Failed to validate {}: {}", name, e));
        assert!(!diagram.blocks.is_empty());
        diagram.simulation.clock().unwrap();
    }
}
