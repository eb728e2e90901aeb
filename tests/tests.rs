use std::fs;
use std::path::PathBuf;

use nbsim::simulation::forces::{Acceleration, NewtonianGravity};
use nbsim::simulation::integrator::advance_body;
use nbsim::simulation::params::Parameters;
use nbsim::simulation::states::{Body, NVec3, System};
use nbsim::io::trajectory::{parse_trajectory, TrajectoryWriter};
use nbsim::{
    generate, load_initial, load_trajectory, run_scenario, save_initial, Engine, RecordPos,
    RunConfig, RunState, SimError, Simulation, UpdateMode,
};

/// Two bodies at rest on the x axis, `dist` apart, the first at the origin
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> System {
    System::new(vec![
        Body::at_rest([0.0, 0.0, 0.0].into(), m1),
        Body::at_rest([dist, 0.0, 0.0].into(), m2),
    ])
}

/// Default physics parameters for tests
pub fn test_params() -> Parameters {
    Parameters {
        G: 1e5,
        eps2: 1e-8,
        dt: 1.0,
    }
}

pub fn gravity(p: &Parameters) -> NewtonianGravity {
    NewtonianGravity::from_params(p)
}

pub fn simulation(sys: System, turns: usize, mode: UpdateMode) -> Simulation<NewtonianGravity> {
    let p = test_params();
    let force = gravity(&p);
    Simulation::new(Engine { mode, turns }, p, sys, force)
}

/// Run to completion into memory, return the trajectory text
pub fn run_to_string(sim: &mut Simulation<NewtonianGravity>) -> String {
    let mut out = TrajectoryWriter::new(Vec::new());
    sim.run(&mut out).unwrap();
    String::from_utf8(out.into_inner().unwrap()).unwrap()
}

/// Fresh scratch directory per test
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("nbsim-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

// ==================================================================================
// Force model
// ==================================================================================

#[test]
fn self_force_is_zero() {
    let g = gravity(&test_params());
    let cases = [
        Body::at_rest([0.0, 0.0, 0.0].into(), 1.0),
        Body::at_rest([1e-9, -3.0, 7.5].into(), 16.0),
        Body::new([32767.0, 49151.0, -16384.0].into(), [3.0, 0.0, 15.0].into(), 1e6),
        Body::at_rest([-1e12, 1e-12, 0.5].into(), 1e-6),
    ];
    for b in &cases {
        assert_eq!(g.acceleration(b, b), NVec3::zeros(), "self force for {:?}", b);
    }
}

#[test]
fn gravity_points_toward_other_body() {
    let sys = two_body_system(2.0, 1.0, 1.0);
    let g = gravity(&test_params());

    let dx = sys.bodies[1].x - sys.bodies[0].x;
    let a = g.acceleration(&sys.bodies[0], &sys.bodies[1]);
    assert!(a.dot(&dx) > 0.0, "Acceleration is not toward second body");

    let back = g.acceleration(&sys.bodies[1], &sys.bodies[0]);
    assert!(back.dot(&dx) < 0.0);
}

#[test]
fn gravity_inverse_square_law() {
    let g = gravity(&test_params());
    let r = two_body_system(100.0, 1.0, 1.0);
    let r2 = two_body_system(200.0, 1.0, 1.0);

    let a_r = g.acceleration(&r.bodies[0], &r.bodies[1]).norm();
    let a_2r = g.acceleration(&r2.bodies[0], &r2.bodies[1]).norm();

    let ratio = a_r / a_2r;
    assert!((ratio - 4.0).abs() < 1e-9, "Expected ~4x, got {}", ratio);
}

#[test]
fn gravity_scales_with_other_mass_only() {
    let g = gravity(&test_params());
    let light = two_body_system(10.0, 1.0, 10.0);
    let heavy = two_body_system(10.0, 500.0, 10.0);

    // mass of the attracted body does not matter
    assert_eq!(
        g.acceleration(&light.bodies[0], &light.bodies[1]),
        g.acceleration(&heavy.bodies[0], &heavy.bodies[1])
    );
}

#[test]
fn softening_bounds_magnitude() {
    let p = test_params();
    let g = gravity(&p);
    let m = 16.0;
    let peak = g.peak_magnitude(m);
    let a = Body::at_rest(NVec3::zeros(), 1.0);

    let mut seps = vec![1e-2, 1e-3, 1e-4, 1e-5, 1e-6, 1e-8, 1e-10, 1e-12, 1e-300, 0.0];
    seps.push((p.eps2 / 2.0).sqrt());

    for d in seps {
        let b = Body::at_rest([d, 0.0, 0.0].into(), m);
        let acc = g.acceleration(&a, &b);
        assert!(acc.norm().is_finite());
        assert!(
            acc.norm_squared() <= peak * peak * (1.0 + 1e-9),
            "|a| = {} exceeds bound {} at separation {}",
            acc.norm(),
            peak,
            d
        );
    }

    // the bound is attained where |r|^2 = eps2 / 2
    let b = Body::at_rest([(p.eps2 / 2.0).sqrt(), 0.0, 0.0].into(), m);
    let at_peak = g.acceleration(&a, &b).norm();
    assert!(close(at_peak / peak, 1.0, 1e-9), "peak ratio {}", at_peak / peak);
}

// ==================================================================================
// Integrator and turn loop
// ==================================================================================

#[test]
fn two_body_reference_numbers() {
    let p = test_params();
    let g = gravity(&p);
    let sys = two_body_system(10.0, 10.0, 10.0);

    // r = (10, 0, 0), |r|^2 = 100, factor = 10 * 100^-1.5 * 1e5 = 1000
    let a = g.acceleration(&sys.bodies[0], &sys.bodies[1]);
    assert!(close(a.x, 10000.0, 1e-5), "a = {:?}", a);
    assert_eq!(a.y, 0.0);
    assert_eq!(a.z, 0.0);

    let mut sim = simulation(sys, 2, UpdateMode::Sequential);
    let mut out = TrajectoryWriter::new(Vec::new());

    assert_eq!(sim.step(&mut out).unwrap(), RunState::Running { turn: 1 });
    // turn 0: A did not move, velocity picked up the pull toward B
    assert_eq!(sim.system.bodies[0].x, NVec3::zeros());
    assert!(close(sim.system.bodies[0].v.x, 10000.0, 1e-5));
    assert_eq!(sim.system.bodies[1].x, NVec3::new(10.0, 0.0, 0.0));
    assert!(close(sim.system.bodies[1].v.x, -10000.0, 1e-5));

    assert_eq!(sim.step(&mut out).unwrap(), RunState::Finished);
    let text = String::from_utf8(out.into_inner().unwrap()).unwrap();
    let t = parse_trajectory(&text).unwrap();

    let turn0 = t.frame(0).unwrap();
    assert_eq!(turn0[0], NVec3::zeros());
    assert_eq!(turn0[1], NVec3::new(10.0, 0.0, 0.0));
    // turn 1: A moves with the velocity gained in turn 0
    let turn1 = t.frame(1).unwrap();
    assert!(close(turn1[0].x, 10000.0, 1e-5));
    assert!(close(turn1[1].x, 10.0 - 10000.0, 1e-5));

    // eps2 pulls the factor just below 1000, which shows in the last digit
    assert_eq!(
        text,
        "2 2\n\
         0.000000 0.000000 0.000000\n\
         10.000000 0.000000 0.000000\n\
         9999.999999 0.000000 0.000000\n\
         -9989.999999 0.000000 0.000000\n"
    );
}

#[test]
fn first_turn_keeps_positions_when_at_rest() {
    let bodies: Vec<Body> = generate(40, 11)
        .into_iter()
        .map(|b| Body::at_rest(b.x, b.m))
        .collect();
    let initial = bodies.clone();

    for mode in [UpdateMode::Sequential, UpdateMode::Synchronized] {
        let mut sim = simulation(System::new(bodies.clone()), 3, mode);
        let t = parse_trajectory(&run_to_string(&mut sim)).unwrap();

        for (p, b) in t.frame(0).unwrap().iter().zip(initial.iter()) {
            // integer-valued inputs print exactly
            assert_eq!(*p, b.x, "{:?}", mode);
        }
    }
}

#[test]
fn sequential_turn_sees_already_advanced_bodies() {
    let p = test_params();
    let g = gravity(&p);
    let initial = vec![
        Body::new([0.0, 0.0, 0.0].into(), [5.0, 0.0, 0.0].into(), 10.0),
        Body::new([10.0, 0.0, 0.0].into(), [0.0, 2.0, 0.0].into(), 10.0),
        Body::at_rest([0.0, 10.0, 0.0].into(), 10.0),
    ];

    let mut seq = simulation(System::new(initial.clone()), 1, UpdateMode::Sequential);
    let mut sync = simulation(System::new(initial.clone()), 1, UpdateMode::Synchronized);
    run_to_string(&mut seq);
    run_to_string(&mut sync);

    // replay the turn by hand, in place
    let mut manual = initial.clone();
    for i in 0..manual.len() {
        advance_body(&mut manual, i, &g, p.dt);
    }
    assert_eq!(seq.system.bodies, manual);

    // body 2 is pulled by bodies 0 and 1 at their post-turn positions
    let b2 = &initial[2];
    let expected = g.acceleration(b2, &manual[0]) + g.acceleration(b2, &manual[1]);
    let got = seq.system.bodies[2].v;
    assert!((got - expected).norm() < 1e-9 * expected.norm());

    // the synchronized pass uses turn-start positions instead
    let snapshot = g.acceleration(b2, &initial[0]) + g.acceleration(b2, &initial[1]);
    assert!((sync.system.bodies[2].v - snapshot).norm() < 1e-9 * snapshot.norm());
    assert!((got - snapshot).norm() > 1.0, "modes should diverge");

    // body 0 goes first, both modes agree on it
    assert_eq!(seq.system.bodies[0], sync.system.bodies[0]);
}

#[test]
fn net_acceleration_includes_self_harmlessly() {
    let g = gravity(&test_params());
    let sys = two_body_system(10.0, 3.0, 4.0);
    let net = g.net_acceleration(&sys.bodies[0], &sys.bodies);
    assert_eq!(net, g.acceleration(&sys.bodies[0], &sys.bodies[1]));
}

// ==================================================================================
// Run state and output
// ==================================================================================

#[test]
fn state_machine_runs_counted_turns() {
    let mut sim = simulation(two_body_system(10.0, 1.0, 1.0), 3, UpdateMode::Sequential);
    let mut out = TrajectoryWriter::new(Vec::new());

    assert_eq!(sim.state(), RunState::NotStarted);
    assert_eq!(sim.step(&mut out).unwrap(), RunState::Running { turn: 1 });
    assert_eq!(sim.step(&mut out).unwrap(), RunState::Running { turn: 2 });
    assert_eq!(sim.step(&mut out).unwrap(), RunState::Finished);
    assert_eq!(sim.step(&mut out).unwrap(), RunState::Finished);

    assert_eq!(sim.system.turn, 3);
    assert_eq!(out.records(), 6);
    assert_eq!(sim.stopwatch().laps(), 6);
}

#[test]
fn zero_turns_writes_header_only() {
    let mut sim = simulation(two_body_system(1.0, 1.0, 1.0), 0, UpdateMode::Sequential);
    assert_eq!(run_to_string(&mut sim), "2 0\n");
    assert_eq!(sim.report().usecs, 0);
}

#[test]
fn output_shape() {
    let (n, turns) = (5, 7);
    for mode in [UpdateMode::Sequential, UpdateMode::Synchronized] {
        let mut sim = simulation(System::new(generate(n, 1)), turns, mode);
        let text = run_to_string(&mut sim);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + turns * n);
        assert_eq!(lines[0], "5 7");
        assert!(lines[1..].iter().all(|l| l.split_whitespace().count() == 3));

        let report = sim.report();
        assert_eq!((report.n, report.turns), (n, turns));
    }
}

#[test]
fn runs_are_deterministic() {
    let bodies = generate(30, 5);
    for mode in [UpdateMode::Sequential, UpdateMode::Synchronized] {
        let a = run_to_string(&mut simulation(System::new(bodies.clone()), 20, mode));
        let b = run_to_string(&mut simulation(System::new(bodies.clone()), 20, mode));
        assert_eq!(a, b);
    }
}

#[test]
fn report_line_format() {
    let mut sim = simulation(two_body_system(1.0, 1.0, 1.0), 4, UpdateMode::Sequential);
    run_to_string(&mut sim);
    let report = sim.report();
    assert_eq!(
        report.to_string(),
        format!("time: {} usecs (with n = 2 and turns = 4)", report.usecs)
    );
}

// ==================================================================================
// Files end to end
// ==================================================================================

#[test]
fn run_scenario_from_files() {
    let dir = scratch_dir("e2e");
    let input = dir.join("data.in");
    let output = dir.join("data.out");

    let bodies = generate(12, 42);
    save_initial(&input, &bodies).unwrap();
    assert_eq!(load_initial(&input).unwrap(), bodies);

    let mut cfg = RunConfig::default();
    cfg.input = input;
    cfg.output = output.clone();
    cfg.engine.turns = 4;

    let report = run_scenario(&cfg).unwrap();
    assert_eq!((report.n, report.turns), (12, 4));

    let first = fs::read(&output).unwrap();
    let t = load_trajectory(&output).unwrap();
    assert_eq!((t.n, t.turns, t.positions.len()), (12, 4, 48));

    run_scenario(&cfg).unwrap();
    assert_eq!(fs::read(&output).unwrap(), first);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_source_is_reported() {
    let dir = scratch_dir("missing");
    let mut cfg = RunConfig::default();
    cfg.input = dir.join("nope.in");
    cfg.output = dir.join("data.out");

    match run_scenario(&cfg) {
        Err(SimError::SourceUnavailable { path, .. }) => assert_eq!(path, cfg.input),
        other => panic!("unexpected {other:?}"),
    }
    // nothing is written when loading fails
    assert!(!cfg.output.exists());
}

#[test]
fn malformed_source_is_reported_with_index() {
    let dir = scratch_dir("malformed");
    let mut cfg = RunConfig::default();
    cfg.input = dir.join("data.in");
    cfg.output = dir.join("data.out");
    fs::write(&cfg.input, "2\n0 0 0 0 0 0 1\n1 x 1 0 0 0 1\n").unwrap();

    match run_scenario(&cfg) {
        Err(SimError::MalformedRecord { record, .. }) => assert_eq!(record, RecordPos::Record(1)),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn unwritable_sink_is_reported() {
    let dir = scratch_dir("sink");
    let mut cfg = RunConfig::default();
    cfg.input = dir.join("data.in");
    cfg.output = dir.join("no-such-dir").join("data.out");
    save_initial(&cfg.input, &generate(2, 0)).unwrap();

    match run_scenario(&cfg) {
        Err(SimError::SinkUnavailable { path, .. }) => assert_eq!(path, cfg.output),
        other => panic!("unexpected {other:?}"),
    }
}
