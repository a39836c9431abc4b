use gravsim::simulation::units::ISS_ORBIT_RADIUS_KM;
use gravsim::*;

fn parse(yaml: &str) -> ScenarioConfig {
    serde_yaml::from_str(yaml).expect("scenario yaml should parse")
}

// ==================================================================================
// Scenario loading
// ==================================================================================

#[test]
fn five_body_cross_file_matches_builtin() {
    let cfg = parse(include_str!("../scenarios/five_body_cross.yaml"));
    let mut scenario = Scenario::build_scenario(cfg).unwrap();
    let mut builtin = five_body_cross(10, true);

    assert_eq!(scenario.engine.state().bodies(), builtin.state().bodies());
    assert_eq!(scenario.engine.state().scenario_name(), "5 Bodies Cross");

    for _ in 0..100 {
        scenario.engine.step(scenario.tick, false);
        builtin.step(1.0 / 32.0, false);
    }
    assert_eq!(scenario.engine.state().bodies(), builtin.state().bodies());
    assert_eq!(scenario.engine.diagnostics().symmetry_violations, 0);
}

#[test]
fn stage_positions_sit_halfway_to_the_edge() {
    let space = UnitSpace::toy();
    assert_eq!(StagePosition::StageLeft.resolve(&space), NVec2::new(-250.0, 0.0));
    assert_eq!(StagePosition::StageTop.resolve(&space), NVec2::new(0.0, 250.0));
    assert_eq!(StagePosition::StageBottomRight.resolve(&space), NVec2::new(250.0, -250.0));
    assert_eq!(StagePosition::Center.resolve(&space), NVec2::zeros());
}

#[test]
fn every_bundled_scenario_builds_and_runs() {
    let files = [
        include_str!("../scenarios/five_body_cross.yaml"),
        include_str!("../scenarios/four_bodies.yaml"),
        include_str!("../scenarios/nine_bodies.yaml"),
        include_str!("../scenarios/orbiting_bodies.yaml"),
        include_str!("../scenarios/low_earth_orbit.yaml"),
    ];

    for yaml in files {
        let mut scenario = Scenario::build_scenario(parse(yaml)).unwrap();
        for _ in 0..10 {
            scenario.engine.step(scenario.tick, false);
        }
        let frame = scenario.engine.frame();
        assert!(frame.elapsed > 0.0);
        assert!(frame.monitored.is_some());
        assert!(frame.bodies.iter().all(|b| b.x.x.is_finite() && b.x.y.is_finite()));
    }
}

#[test]
fn nine_bodies_applies_engine_options() {
    let scenario = Scenario::build_scenario(parse(include_str!("../scenarios/nine_bodies.yaml"))).unwrap();
    let state = scenario.engine.state();

    assert_eq!(state.bodies().len(), 9);
    assert_eq!(state.settings().substeps(), 4);
    assert_eq!(state.rounding_digits(), 2);
    assert_eq!(state.acceleration_limit(), Some(10.0));
    assert_eq!(state.min_separation_squared(), 100.0);
}

#[test]
fn low_earth_orbit_reads_velocity_in_km_per_hour() {
    let scenario = Scenario::build_scenario(parse(include_str!("../scenarios/low_earth_orbit.yaml"))).unwrap();
    let state = scenario.engine.state();

    assert_eq!(state.space().kind(), SpaceKind::Leo);
    assert_eq!(state.monitored_body_index(), 1);
    assert!((state.bodies()[1].v.y - 27570.2 / 60.0).abs() < 1e-9);
    assert!(!state.bodies()[1].is_gravity_source);
    assert!(state.settings().check_addition_precision);
}

#[test]
fn minimal_yaml_uses_defaults() {
    let cfg = parse(
        r#"
space: "null"
bodies:
  - { x: [1.0, 2.0], m: 3.0, size: 1.0 }
"#,
    );
    assert_eq!(cfg.calculation.substeps, 1);
    assert_eq!(cfg.engine.tick, 1.0 / 32.0);
    assert!(cfg.bodies[0].gravity_source);

    let scenario = Scenario::build_scenario(cfg).unwrap();
    let b = &scenario.engine.state().bodies()[0];
    assert_eq!(b.x, NVec2::new(1.0, 2.0));
    assert_eq!(b.v, NVec2::zeros());
    assert_eq!(b.mass, 3.0);
}

#[test]
fn bad_scenarios_are_rejected() {
    let no_position = parse("space: toy\nbodies:\n  - { m: 1.0, size: 1.0 }\n");
    assert_eq!(Scenario::build_scenario(no_position).unwrap_err(), SimError::MissingPosition(0));

    let bad_vector = parse("space: toy\nbodies:\n  - { x: [1.0, 2.0, 3.0], m: 1.0, size: 1.0 }\n");
    assert_eq!(
        Scenario::build_scenario(bad_vector).unwrap_err(),
        SimError::InvalidVector { field: "x", len: 3 }
    );

    let no_substeps = parse("space: toy\ncalculation: { substeps: 0 }\nbodies: []\n");
    assert_eq!(Scenario::build_scenario(no_substeps).unwrap_err(), SimError::InvalidSubsteps(0));

    let galaxy = parse("space: micro_galaxy\nbodies: []\n");
    assert_eq!(
        Scenario::build_scenario(galaxy).unwrap_err(),
        SimError::UnimplementedSpace(SpaceKind::MicroGalaxy)
    );

    let bad_monitor = parse("space: toy\nengine: { monitored_body: 2 }\nbodies:\n  - { start: center, m: 1.0, size: 1.0 }\n");
    assert_eq!(
        Scenario::build_scenario(bad_monitor).unwrap_err(),
        SimError::NoSuchBody { index: 2, count: 1 }
    );
}

// ==================================================================================
// Orbit quality
// ==================================================================================

#[test]
fn orbit_counter_needs_both_crossings() {
    let mut counter = OrbitCounter::new();

    assert!(!counter.update(5.0));
    assert!(!counter.update(-1.0)); // half orbit
    assert!(!counter.update(-3.0));
    assert!(counter.update(0.0)); // full orbit
    assert!(!counter.update(1.0));
    assert!(!counter.update(0.0)); // next half
    assert!(counter.update(2.0));
}

#[test]
fn orbit_harness_starts_on_a_circular_orbit() {
    let harness = OrbitQualityHarness::default();
    let engine = harness.build_engine();
    let bodies = engine.state().bodies();

    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[1].x, NVec2::new(-ISS_ORBIT_RADIUS_KM, 0.0));
    assert!(bodies[1].v.y > 0.0);
    assert!(!bodies[1].is_gravity_source);

    let display = engine.state().space().to_display_velocity(bodies[1].speed());
    assert!((display - 27_570.0).abs() < 300.0, "got {display} km/h");
}

#[test]
fn drift_shrinks_as_substeps_grow() {
    let harness = OrbitQualityHarness::default();
    let reports = harness.run_ladder(&[1, 10, 100, 1_000], 1);

    for report in &reports {
        assert_eq!(report.completed_orbits(), 1, "{} substeps/min", report.substeps_per_minute);
    }

    let drifts: Vec<f64> = reports.iter().map(|r| r.drift_per_orbit().unwrap()).collect();
    for pair in drifts.windows(2) {
        assert!(pair[1] < pair[0], "drift did not shrink: {:?}", drifts);
    }

    // About 92 minutes per orbit at the ISS radius
    let last = reports[3].samples[0];
    assert!((last.elapsed - 92.9).abs() < 0.5, "orbit took {} min", last.elapsed);
}

#[test]
fn report_without_orbits_has_no_drift() {
    let report = OrbitQualityReport {
        substeps_per_minute: 1,
        start_radius: 7000.0,
        samples: Vec::new(),
        precision_warnings: 0,
        wall_seconds: 0.0,
    };
    assert_eq!(report.drift_per_orbit(), None);
    assert_eq!(report.completed_orbits(), 0);
}
