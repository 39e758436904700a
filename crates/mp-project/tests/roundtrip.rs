use mp_controls::AngleRange;
use mp_core::Limits;
use mp_project::*;
use mp_sim::{BoilerPlant, SimulationConfig};

fn tuned_project() -> ProjectFile {
    let mut project = ProjectFile::new("Boiler A").with_simulation(SimulationConfig {
        dt_s: 0.5,
        steps: 120,
        initial_pressure: 0.3,
        initial_gear: 2,
        initial_angle: 50.0,
        plant: BoilerPlant::default(),
    });
    project.controller = project
        .controller
        .with_gains(40.0, 2.0, 0.5)
        .with_set_point(0.8)
        .with_thresholds(-4.0, 4.0)
        .with_throttle_limits(vec![AngleRange::new(20.0, 55.0), AngleRange::new(35.0, 70.0)])
        .with_output_limits(Limits::new(Some(-20.0), None).unwrap());
    project
}

#[test]
fn roundtrip_yaml_default_project() {
    let project = ProjectFile::new("Defaults");
    validate_project(&project).unwrap();

    let path = std::env::temp_dir().join("mp_project_roundtrip_default.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_yaml_tuned_project() {
    let project = tuned_project();

    let path = std::env::temp_dir().join("mp_project_roundtrip_tuned.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json_by_extension() {
    let project = tuned_project();

    let path = std::env::temp_dir().join("mp_project_roundtrip_tuned.json");
    save(&path, &project).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.trim_start().starts_with('{'));

    let loaded = load(&path).unwrap();
    assert_eq!(project, loaded);
}

#[test]
fn partial_yaml_fills_defaults() {
    let yaml = r#"
version: 1
name: Partial
controller:
  kp: 20.0
  set_point: 0.8
  output_limits:
    upper: 50.0
"#;
    let project: ProjectFile = serde_yaml::from_str(yaml).unwrap();
    validate_project(&project).unwrap();

    let cfg = &project.controller;
    assert_eq!(cfg.gains.kp, 20.0);
    assert_eq!(cfg.gains.ki, 0.0);
    assert_eq!(cfg.set_point, 0.8);
    assert_eq!(cfg.thresholds.upper, 10.0);
    assert_eq!(cfg.throttle_limits.len(), 3);
    assert_eq!(cfg.output_limits, Limits::new(None, Some(50.0)).unwrap());
    assert!(cfg.auto_mode);
    assert!(project.simulation.is_none());
}

#[test]
fn throttle_limits_are_a_plain_list() {
    let yaml = r#"
version: 1
name: Two gears
controller:
  throttle_limits:
    - { min: 10.0, max: 40.0 }
    - { min: 20.0, max: 50.0 }
"#;
    let project: ProjectFile = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(project.controller.throttle_limits.len(), 2);
    assert_eq!(
        project.controller.throttle_limits.range(2).unwrap(),
        AngleRange::new(20.0, 50.0)
    );
}

#[test]
fn load_rejects_invalid_file() {
    let path = std::env::temp_dir().join("mp_project_invalid.yaml");
    std::fs::write(
        &path,
        "version: 1\nname: Bad\ncontroller:\n  thresholds: { lower: 5.0, upper: -5.0 }\n",
    )
    .unwrap();
    assert!(matches!(load_yaml(&path), Err(ProjectError::Validation(_))));
}
