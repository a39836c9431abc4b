use std::hint::black_box;
use std::time::Instant;

use crate::simulation::engine::{SimulationEngine, SimulationState};
use crate::simulation::forces::{accumulate_accels, NewtonianGravity};
use crate::simulation::params::CalculationSettings;
use crate::simulation::precision::{
    check_addition_precision, check_addition_precision_by_ratio, check_addition_precision_exact,
};
use crate::simulation::states::{Body, NVec2};
use crate::simulation::units::UnitSpace;

/// Deterministic positions for `n` bodies, no rand needed
fn cloud_positions(n: usize) -> Vec<NVec2> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            NVec2::new((i_f * 0.37).sin() * 400.0, (i_f * 0.13).cos() * 400.0)
        })
        .collect()
}

/// Helper to build a toy-space cloud of `n` bodies
fn make_bodies(n: usize) -> Vec<Body> {
    let space = UnitSpace::toy();
    cloud_positions(n)
        .into_iter()
        .map(|x| Body::new(&space, 1.0, 3.0, x, NVec2::zeros(), true))
        .collect()
}

/// Helper to build an engine over the same cloud
fn make_engine(n: usize, parallel: bool) -> SimulationEngine {
    let mut state = SimulationState::new(UnitSpace::toy());
    for x in cloud_positions(n) {
        state.add_body(1.0, 3.0, x, NVec2::zeros(), true);
    }
    state.set_acceleration_limits(true, 50.0, 10.0);

    let mut settings = CalculationSettings::default();
    settings.use_parallel_calculations = parallel;
    state.set_calculation_settings(settings);
    SimulationEngine::new(state)
}

/// Time the acceleration pass, serial vs parallel
pub fn bench_gravity() {
    // Different system sizes to test
    let ns = [200, 400, 800, 1600, 3200];

    for n in ns {
        let bodies = make_bodies(n);
        let mut out = vec![NVec2::zeros(); n];

        let serial = NewtonianGravity { g: 1.0, min_separation_squared: 100.0, parallel: false };
        let parallel = NewtonianGravity { parallel: true, ..serial };

        // Warm up
        accumulate_accels(&serial, &bodies, &mut out);
        accumulate_accels(&parallel, &bodies, &mut out);

        let t0 = Instant::now();
        accumulate_accels(&serial, &bodies, &mut out);
        let dt_serial = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        accumulate_accels(&parallel, &bodies, &mut out);
        let dt_parallel = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, serial = {:8.6} s, parallel = {:8.6} s", dt_serial, dt_parallel);
    }
}

/// Time full engine steps, serial vs parallel.
/// Paste output directly into a spreadsheet to graph
pub fn bench_step_curve() {
    println!("N,serial_ms,parallel_ms");

    for n in (200..=3200).step_by(200) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 800 { 5 } else { 1 };

        let mut serial = make_engine(n, false);
        let mut parallel = make_engine(n, true);

        let t0 = Instant::now();
        for _ in 0..steps {
            serial.step(1.0 / 32.0, false);
        }
        let ms_serial = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let t1 = Instant::now();
        for _ in 0..steps {
            parallel.step(1.0 / 32.0, false);
        }
        let ms_parallel = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, ms_serial, ms_parallel);
    }
}

/// Cost of each precision check relative to the addition it guards
pub fn bench_precision_checks(iterations: u64) {
    // Operands spread over many orders of magnitude
    let operand = |i: u64| {
        let i_f = i as f64;
        let large = 42000.0 + (i_f * 0.37).sin() * 1000.0;
        let small = 10f64.powf(-((i % 16) as f64)) * (1.0 + (i_f * 0.13).cos().abs());
        (large, small)
    };

    let time = |label: &str, f: &dyn Fn(f64, f64) -> bool| -> f64 {
        let t = Instant::now();
        let mut hits = 0u64;
        for i in 0..iterations {
            let (a, b) = operand(i);
            if f(black_box(a), black_box(b)) {
                hits += 1;
            }
        }
        let ms = t.elapsed().as_secs_f64() * 1000.0;
        println!("   {label}: {ms:10.2} ms ({hits} flagged)");
        ms
    };

    println!("Precision check cost over {iterations} iterations, times in ms:");
    let empty = time("empty loop", &|_, _| false);
    let add = time("addition", &|a, b| a + b == a);
    let log10 = time("log10 check", &check_addition_precision);
    let ratio = time("ratio check", &check_addition_precision_by_ratio);
    let exact = time("exact check", &check_addition_precision_exact);

    let net_add = (add - empty).max(f64::EPSILON);
    println!("log10 check takes {:.2} times longer than addition", (log10 - empty) / net_add);
    println!("ratio check takes {:.2} times longer than addition", (ratio - empty) / net_add);
    println!("exact check takes {:.2} times longer than addition", (exact - empty) / net_add);
}
