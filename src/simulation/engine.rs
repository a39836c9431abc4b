//! Simulation state and the stepping engine
//!
//! `SimulationState` owns the bodies and every setting that shapes a run.
//! `SimulationEngine` wraps it with the scratch acceleration buffer and the
//! diagnostics context, and advances it one external tick at a time with
//! [`SimulationEngine::step`].
//!
//! Nothing here is global: two engines never share a separation floor, a
//! warning counter or a scenario name.

use std::time::Instant;

use tracing::{debug, error, info};

use crate::configuration::config::StagePosition;
use crate::error::{SimError, SimResult};
use crate::simulation::forces::{accumulate_accels, enforce_acceleration_limit, round_accelerations, NewtonianGravity};
use crate::simulation::integrator::{integrate_bodies, NoCheck};
use crate::simulation::params::CalculationSettings;
use crate::simulation::precision::PrecisionMonitor;
use crate::simulation::states::{Body, NVec2};
use crate::simulation::symmetry::check_five_body_cross;
use crate::simulation::units::UnitSpace;

/// Cube root of 2: three steps double or halve the simulation speed
pub const SPEED_INCREMENT: f64 = 1.25992105;

pub const DEFAULT_MIN_SEPARATION_SQUARED: f64 = 1.0;

/// Everything that defines a run: the bodies plus the knobs applied while
/// stepping them
#[derive(Debug, Clone)]
pub struct SimulationState {
    space: UnitSpace,
    settings: CalculationSettings,
    bodies: Vec<Body>,
    elapsed: f64,
    acceleration_limit: Option<f64>,
    min_separation_squared: f64,
    rounding_digits: u32,
    symmetry_check: bool,
    monitored_body: usize,
    speed_factor: f64, // 1.0 = scenario's own speed
    scenario_name: String,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            space: UnitSpace::null(),
            settings: CalculationSettings::default(),
            bodies: Vec::new(),
            elapsed: 0.0,
            acceleration_limit: None,
            min_separation_squared: DEFAULT_MIN_SEPARATION_SQUARED,
            rounding_digits: 0,
            symmetry_check: false,
            monitored_body: 0,
            speed_factor: 1.0,
            scenario_name: String::new(),
        }
    }
}

impl SimulationState {
    pub fn new(space: UnitSpace) -> Self {
        Self {
            space,
            ..Self::default()
        }
    }

    pub fn space(&self) -> &UnitSpace { &self.space }
    pub fn settings(&self) -> &CalculationSettings { &self.settings }
    pub fn bodies(&self) -> &[Body] { &self.bodies }
    pub fn elapsed(&self) -> f64 { self.elapsed }
    pub fn acceleration_limit(&self) -> Option<f64> { self.acceleration_limit }
    pub fn min_separation_squared(&self) -> f64 { self.min_separation_squared }
    pub fn rounding_digits(&self) -> u32 { self.rounding_digits }
    pub fn symmetry_check(&self) -> bool { self.symmetry_check }
    pub fn monitored_body_index(&self) -> usize { self.monitored_body }
    pub fn speed_factor(&self) -> f64 { self.speed_factor }
    pub fn scenario_name(&self) -> &str { &self.scenario_name }

    /// The monitored body, if the index points at one
    pub fn monitored_body(&self) -> Option<&Body> {
        self.bodies.get(self.monitored_body)
    }

    /// Body by index
    pub fn body(&self, index: usize) -> SimResult<&Body> {
        self.bodies.get(index).ok_or(SimError::NoSuchBody {
            index,
            count: self.bodies.len(),
        })
    }

    /// Switch unit systems. Bodies already added keep the mass scale they
    /// were built with, so set the space before adding bodies.
    pub fn set_space(&mut self, space: UnitSpace) {
        self.space = space;
    }

    pub fn set_calculation_settings(&mut self, settings: CalculationSettings) {
        self.settings = settings;
    }

    /// Append a body given in this space's internal units; returns its index
    pub fn add_body(&mut self, mass: f64, size: f64, x: NVec2, v: NVec2, is_gravity_source: bool) -> usize {
        self.bodies.push(Body::new(&self.space, mass, size, x, v, is_gravity_source));
        self.bodies.len() - 1
    }

    /// Append a body at a named stage position
    pub fn add_body_at(&mut self, start: StagePosition, mass: f64, size: f64, v: NVec2, is_gravity_source: bool) -> usize {
        let x = start.resolve(&self.space);
        self.add_body(mass, size, x, v, is_gravity_source)
    }

    /// Append a body whose velocity is given in display units (e.g. km/h)
    pub fn add_body_actual(&mut self, mass: f64, is_gravity_source: bool, size: f64, x: NVec2, display_v: NVec2) -> usize {
        let factor = self.space.velocity_conversion_factor();
        let v = NVec2::new(display_v.x / factor, display_v.y / factor);
        self.add_body(mass, size, x, v, is_gravity_source)
    }

    /// Configure acceleration limiting and the separation floor.
    ///
    /// A `minimum_separation` of 0 falls back to 1. The floor applies whether
    /// or not limiting is on.
    pub fn set_acceleration_limits(&mut self, limit_on: bool, limit: f64, minimum_separation: f64) {
        self.acceleration_limit = if limit_on { Some(limit) } else { None };

        let minimum_separation = if minimum_separation == 0.0 { 1.0 } else { minimum_separation };
        self.min_separation_squared = minimum_separation * minimum_separation;
    }

    /// Round accelerations to `digits` decimal places each substep; 0 disables
    pub fn set_rounding(&mut self, digits: u32) {
        self.rounding_digits = digits;
    }

    /// Validate 5-body cross symmetry every substep
    pub fn set_symmetry_check(&mut self, check: bool) {
        self.symmetry_check = check;
    }

    pub fn set_monitored_body(&mut self, index: usize) -> SimResult<()> {
        self.body(index)?;
        self.monitored_body = index;
        Ok(())
    }

    pub fn set_speed_factor(&mut self, factor: f64) {
        self.speed_factor = factor;
    }

    pub fn run_faster(&mut self) {
        self.speed_factor *= SPEED_INCREMENT;
    }

    pub fn run_slower(&mut self) {
        self.speed_factor *= 1.0 / SPEED_INCREMENT;
    }

    pub fn set_scenario_name(&mut self, name: impl Into<String>) {
        self.scenario_name = name.into();
    }
}

/// Per-engine diagnostic counters
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    pub precision: PrecisionMonitor,
    pub symmetry_violations: u64,
    pub clamped_accelerations: u64,
}

/// What the renderer gets after each step
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub bodies: &'a [Body],
    pub elapsed: f64,
    pub monitored: Option<&'a Body>,
}

/// Owns a `SimulationState` and advances it.
///
/// `step` takes `&mut self`, so a state can never be stepped re-entrantly.
#[derive(Debug, Clone, Default)]
pub struct SimulationEngine {
    state: SimulationState,
    accelerations: Vec<NVec2>,
    diagnostics: Diagnostics,
}

impl SimulationEngine {
    pub fn new(state: SimulationState) -> Self {
        Self {
            state,
            accelerations: Vec::new(),
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Mutable access for setup between runs
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Accelerations applied in the most recent substep, after limiting and
    /// rounding
    pub fn last_accelerations(&self) -> &[NVec2] {
        &self.accelerations
    }

    /// Drop all bodies and return every setting to its default
    pub fn clear_sim(&mut self) {
        self.state = SimulationState::default();
        self.accelerations.clear();
        self.diagnostics = Diagnostics::default();
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            bodies: &self.state.bodies,
            elapsed: self.state.elapsed,
            monitored: self.state.monitored_body(),
        }
    }

    /// Advance the simulation by one external tick of `external_dt`.
    ///
    /// The tick is scaled by the speed factor and split into
    /// `settings.substeps()` equal substeps. Each substep computes all
    /// accelerations from the current positions, shapes them (limit, then
    /// rounding), optionally checks symmetry, then integrates every body.
    /// `single_stepping` turns on timing and monitored-body logging.
    pub fn step(&mut self, external_dt: f64, single_stepping: bool) -> Frame<'_> {
        let started = single_stepping.then(Instant::now);

        let n = self.state.bodies.len();
        self.accelerations.resize(n, NVec2::zeros());

        let substeps = self.state.settings.substeps();
        let scaled_dt = external_dt * self.state.speed_factor;
        let sub_dt = scaled_dt / substeps as f64;

        let gravity = NewtonianGravity {
            g: self.state.space.big_g(),
            min_separation_squared: self.state.min_separation_squared,
            parallel: self.state.settings.use_parallel_calculations,
        };
        let check_symmetry = self.state.symmetry_check;
        let check_precision = self.state.settings.check_addition_precision;

        if check_symmetry {
            self.validate_motion(false);
        }

        for _ in 0..substeps {
            accumulate_accels(&gravity, &self.state.bodies, &mut self.accelerations);

            if let Some(limit) = self.state.acceleration_limit {
                self.diagnostics.clamped_accelerations +=
                    enforce_acceleration_limit(&mut self.accelerations, limit) as u64;
            }

            if self.state.rounding_digits > 0 {
                round_accelerations(&mut self.accelerations, self.state.rounding_digits);
            }

            if check_symmetry {
                validate(&mut self.diagnostics, &self.accelerations, "accelerations after limit and rounding");
            }

            if check_precision {
                integrate_bodies(&mut self.state.bodies, &self.accelerations, sub_dt, &mut self.diagnostics.precision);
            } else {
                integrate_bodies(&mut self.state.bodies, &self.accelerations, sub_dt, &mut NoCheck);
            }

            if check_symmetry {
                self.validate_motion(true);
            }

            self.state.elapsed += sub_dt;
        }

        if let Some(started) = started {
            debug!(
                "Compute N-body accelerations, update positions & velocities for {} bodies ({} iterations) took {:.2} ms",
                n,
                substeps,
                started.elapsed().as_secs_f64() * 1000.0
            );
            if let Some(b) = self.state.monitored_body() {
                info!(
                    "time = {:.3}, position = ({:.3}, {:.3}), velocity = ({:.3}, {:.3})",
                    self.state.elapsed, b.x.x, b.x.y, b.v.x, b.v.y
                );
            }
        }

        self.frame()
    }

    fn validate_motion(&mut self, after_update: bool) {
        let positions: Vec<NVec2> = self.state.bodies.iter().map(|b| b.x).collect();
        let velocities: Vec<NVec2> = self.state.bodies.iter().map(|b| b.v).collect();

        let (what_x, what_v) = if after_update {
            ("positions after update", "velocities after update")
        } else {
            ("positions before update", "velocities before update")
        };
        validate(&mut self.diagnostics, &positions, what_x);
        validate(&mut self.diagnostics, &velocities, what_v);
    }
}

/// Symmetry violations are fatal in debug builds and a logged anomaly in
/// release builds
fn validate(diagnostics: &mut Diagnostics, points: &[NVec2], what: &'static str) {
    if let Err(violation) = check_five_body_cross(points, what) {
        diagnostics.symmetry_violations += 1;
        error!("symmetry violation: {violation}");
        if cfg!(debug_assertions) {
            panic!("symmetry violation: {violation}");
        }
    }
}
