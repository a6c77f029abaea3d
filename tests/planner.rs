use aco_pso_planner::config::PlannerConfig;
use aco_pso_planner::error::PlannerError;
use aco_pso_planner::planner::{AcoPso, AntStatus, Params, Supervisor};
use aco_pso_planner::tuner::{ParticleSwarmTuner, SwarmParams};
use aco_pso_planner::util::{path_length, Point};

use float_cmp::approx_eq;
use std::io::Sink;
use std::path::Path;

fn planner(params: Params) -> AcoPso<Sink> {
    let tuner = ParticleSwarmTuner::new(SwarmParams::new(30, 30, (0.0, 1.0)));
    AcoPso::new(params, Box::new(tuner), Supervisor::default()).unwrap()
}

#[test]
fn square_scenario_is_solvable() {
    let solved = (0..5u128).any(|seed| {
        let mut aco = planner(Params::new(
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            10,
            3,
            (2.0, 2.0),
            Some(seed),
        ));
        aco.run()
            .unwrap()
            .iter()
            .any(|ant| ant.status() == AntStatus::ReachedGoal)
    });

    assert!(solved, "Some ant should reach (2, 2) from (0, 0).");
}

#[test]
fn lab_scenario_works() {
    let mut aco = planner(Params::new(
        Point::new(0.0, 0.0),
        Point::new(2.0, 3.5),
        20,
        4,
        (2.0, 4.0),
        Some(2024),
    ));
    let ants = aco.run().unwrap();

    assert_eq!(ants.len(), 20);
    for ant in ants.iter() {
        assert!(approx_eq!(f64, ant.cost(), path_length(ant.path()), epsilon = 1e-9));
        assert_eq!(ant.path()[0], Point::new(0.0, 0.0));
        assert!(ant.steps() <= 250);
        if ant.status() == AntStatus::ReachedGoal {
            assert_eq!(ant.path()[ant.path().len() - 1], Point::new(2.0, 3.5));
        }
    }

    let best = aco.best_path().expect("a best path after four generations");
    // the straight line is the lower bound for any path
    assert!(aco.best_length() >= 2.0f64.hypot(3.5) - 1e-9);
    assert!(approx_eq!(f64, path_length(best), aco.best_length(), epsilon = 1e-9));
}

#[test]
fn config_files_load() {
    let yaml = PlannerConfig::from_file(Path::new("configs/lab.yaml")).unwrap();
    let ron = PlannerConfig::from_file(Path::new("configs/square.ron")).unwrap();

    assert_eq!(yaml.final_point, Point::new(2.0, 3.5));
    assert!(yaml.params().is_ok());
    assert_eq!(ron.params().unwrap().seed, 7);
}

#[test]
fn config_errors_abort_construction() {
    let params = Params::new(
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        0,
        3,
        (2.0, 2.0),
        Some(1),
    );
    let tuner = ParticleSwarmTuner::default();
    let result = AcoPso::new(params, Box::new(tuner), Supervisor::default());

    assert!(matches!(result, Err(PlannerError::Config(_))));
}
