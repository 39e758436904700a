use mp_project::load;
use mp_sim::run_closed_loop;
use std::path::PathBuf;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

#[test]
fn boiler_demo_loads_and_runs() {
    let project = load(&demo("boiler.yaml")).unwrap();
    assert_eq!(project.name, "Boiler A");
    assert_eq!(project.controller.gains.kp, 100.0);

    let sim = project.simulation.expect("demo defines a simulation");
    let run = run_closed_loop(&project.controller, &sim).unwrap();
    let summary = run.summary().unwrap();
    assert_eq!(summary.final_command.gear, 1);
    assert!((summary.final_pressure - project.controller.set_point).abs() <= 0.05);
}
