//! Orbit quality harness
//!
//! Measures how integration accuracy trades against cost. An orbiter is put
//! on a circular low Earth orbit and the engine is run, one substep per tick,
//! for a fixed number of orbits at a chosen substep density (substeps per
//! simulated minute). A perfect integrator would return to the starting
//! radius every orbit; the difference is the drift.
//!
//! Orbits are counted with a sign-crossing state machine on y, so no angle
//! unwrapping is needed: starting at (-r, 0) and moving clockwise, y first
//! goes positive, crosses to <= 0 at the half orbit, and back to >= 0 when the
//! orbit completes.

use std::time::Instant;

use tracing::{info, warn};

use crate::simulation::engine::{SimulationEngine, SimulationState};
use crate::simulation::orbit::internal_circular_speed;
use crate::simulation::params::CalculationSettings;
use crate::simulation::states::NVec2;
use crate::simulation::time_display::{format_elapsed_time, BaseUnits};
use crate::simulation::units::{UnitSpace, EARTH_MASS_KG, EARTH_RADIUS_KM, ISS_ORBIT_RADIUS_KM};

/// Substeps per simulated minute, coarse to fine
pub const SUBSTEP_LADDER: [u32; 6] = [1, 10, 100, 1_000, 10_000, 100_000];

const ORBITER_INDEX: usize = 1;

/// Two-phase orbit completion detector on the y coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrbitCounter {
    watching_half_orbit: bool,
}

impl OrbitCounter {
    pub fn new() -> Self {
        Self { watching_half_orbit: true }
    }

    /// Feed the latest y; true exactly when a full orbit has just completed
    pub fn update(&mut self, y: f64) -> bool {
        let crossed = if self.watching_half_orbit { y <= 0.0 } else { y >= 0.0 };
        if crossed {
            // Half orbit: start watching for the full one. Full orbit: count it.
            self.watching_half_orbit = !self.watching_half_orbit;
            return self.watching_half_orbit;
        }
        false
    }
}

impl Default for OrbitCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// State of the orbiter at one orbit completion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSample {
    pub orbit: u64,
    pub elapsed: f64, // minutes
    pub cycles: u64,  // substeps taken so far
    pub radius: f64,  // km
    pub speed: f64,   // km/h
}

/// Result of one harness run
#[derive(Debug, Clone)]
pub struct OrbitQualityReport {
    pub substeps_per_minute: u32,
    pub start_radius: f64,
    pub samples: Vec<OrbitSample>,
    pub precision_warnings: u64,
    pub wall_seconds: f64,
}

impl OrbitQualityReport {
    /// |r_last - r_start| / orbits completed, km per orbit
    pub fn drift_per_orbit(&self) -> Option<f64> {
        let last = self.samples.last()?;
        Some((last.radius - self.start_radius).abs() / last.orbit as f64)
    }

    pub fn completed_orbits(&self) -> u64 {
        self.samples.last().map_or(0, |s| s.orbit)
    }
}

/// Two-body accuracy-vs-cost driver
#[derive(Debug, Clone)]
pub struct OrbitQualityHarness {
    pub central_mass: f64,        // kg
    pub orbit_radius: f64,        // km
    pub check_precision: bool,    // run the checked integrator
    pub report_every: u64,        // log a line every this many orbits
}

impl Default for OrbitQualityHarness {
    fn default() -> Self {
        Self {
            central_mass: EARTH_MASS_KG,
            orbit_radius: ISS_ORBIT_RADIUS_KM,
            check_precision: false,
            report_every: 10,
        }
    }
}

impl OrbitQualityHarness {
    /// Central body at the origin, orbiter at (-r, 0) moving clockwise
    pub fn build_engine(&self) -> SimulationEngine {
        let space = UnitSpace::leo();
        let speed = internal_circular_speed(&space, self.central_mass, self.orbit_radius);

        let mut state = SimulationState::new(space);
        state.set_scenario_name("Orbit quality");

        let mut settings = CalculationSettings::default();
        settings.check_addition_precision = self.check_precision;
        state.set_calculation_settings(settings);

        state.add_body(self.central_mass, EARTH_RADIUS_KM * 2.0, NVec2::zeros(), NVec2::zeros(), true);
        state.add_body(0.0, 150.0, NVec2::new(-self.orbit_radius, 0.0), NVec2::new(0.0, speed), false);

        SimulationEngine::new(state)
    }

    /// Run `orbits` orbits at `substeps_per_minute`
    pub fn run(&self, substeps_per_minute: u32, orbits: u64) -> OrbitQualityReport {
        let mut engine = self.build_engine();
        let space = engine.state().space().clone();

        let dt = 1.0 / substeps_per_minute.max(1) as f64;
        let start_speed = engine.state().bodies()[ORBITER_INDEX].speed();

        // Give up well past the expected duration in case the orbit escapes
        let period = std::f64::consts::TAU * self.orbit_radius / start_speed;
        let max_cycles = (period / dt * 4.0 * orbits as f64).ceil() as u64 + 1;

        let mut counter = OrbitCounter::new();
        let mut samples = Vec::with_capacity(orbits as usize);
        let started = Instant::now();

        let mut cycles = 0u64;
        while cycles < max_cycles && (samples.len() as u64) < orbits {
            let frame = engine.step(dt, false);
            cycles += 1;

            let orbiter = &frame.bodies[ORBITER_INDEX];
            if counter.update(orbiter.x.y) {
                let sample = OrbitSample {
                    orbit: samples.len() as u64 + 1,
                    elapsed: frame.elapsed,
                    cycles,
                    radius: orbiter.x.magnitude(),
                    speed: space.to_display_velocity(orbiter.speed()),
                };
                if self.report_every > 0 && sample.orbit % self.report_every == 0 {
                    info!(
                        "Orbit {} completed at time {} in {} calc cycles. R = {:.6} km, V = {:.3} km/h",
                        sample.orbit,
                        format_elapsed_time(sample.elapsed, BaseUnits::Minutes),
                        sample.cycles,
                        sample.radius,
                        sample.speed
                    );
                }
                samples.push(sample);
            }
        }

        if (samples.len() as u64) < orbits {
            warn!(
                "Gave up after {} calc cycles with {} of {} orbits completed",
                cycles,
                samples.len(),
                orbits
            );
        }

        OrbitQualityReport {
            substeps_per_minute,
            start_radius: self.orbit_radius,
            samples,
            precision_warnings: engine.diagnostics().precision.detected(),
            wall_seconds: started.elapsed().as_secs_f64(),
        }
    }

    /// Run each rung of `ladder` and log one summary line per rung
    pub fn run_ladder(&self, ladder: &[u32], orbits: u64) -> Vec<OrbitQualityReport> {
        ladder
            .iter()
            .map(|&n| {
                let report = self.run(n, orbits);
                info!(
                    "{:>7} substeps/min: {} orbits, drift {:.9} km/orbit, {} precision warnings, {:.3} s",
                    n,
                    report.completed_orbits(),
                    report.drift_per_orbit().unwrap_or(f64::NAN),
                    report.precision_warnings,
                    report.wall_seconds
                );
                report
            })
            .collect()
    }
}
