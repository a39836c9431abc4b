//! Build fully-initialized simulation engines from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime
//! `Scenario`: a `SimulationEngine` with its space, settings and bodies in
//! place, plus the tick length and count the driver should run it for.

use tracing::info;

use crate::configuration::config::{BodyConfig, ScenarioConfig, StagePosition};
use crate::error::{SimError, SimResult};
use crate::simulation::engine::{SimulationEngine, SimulationState};
use crate::simulation::params::CalculationSettings;
use crate::simulation::states::NVec2;
use crate::simulation::units::UnitSpace;

/// Stage positions sit this far from the center toward the box edge
pub const STAGE_PORTION: f64 = 0.5;

impl StagePosition {
    /// Position in `space` units
    pub fn resolve(self, space: &UnitSpace) -> NVec2 {
        let s = space.sim_box_half_extent() * STAGE_PORTION;

        match self {
            StagePosition::StageLeft => NVec2::new(-s, 0.0),
            StagePosition::StageRight => NVec2::new(s, 0.0),
            StagePosition::StageTop => NVec2::new(0.0, s),
            StagePosition::StageBottom => NVec2::new(0.0, -s),
            StagePosition::StageTopLeft => NVec2::new(-s, s),
            StagePosition::StageTopRight => NVec2::new(s, s),
            StagePosition::StageBottomRight => NVec2::new(s, -s),
            StagePosition::StageBottomLeft => NVec2::new(-s, -s),
            StagePosition::Center => NVec2::new(0.0, 0.0),
        }
    }
}

/// A runnable scenario
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: SimulationEngine,
    pub tick: f64,  // external dt per step
    pub ticks: u64, // steps to run
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        let space = UnitSpace::new(cfg.space)?;
        let mut state = SimulationState::new(space);
        state.set_scenario_name(cfg.name.clone());

        // Calculation settings
        let c_cfg = &cfg.calculation;
        state.set_calculation_settings(CalculationSettings::new(
            c_cfg.substeps,
            c_cfg.parallel,
            c_cfg.check_addition_precision,
        )?);

        // Bodies: map `BodyConfig` -> runtime `Body`
        for (i, bc) in cfg.bodies.iter().enumerate() {
            add_configured_body(&mut state, i, bc)?;
        }

        // Engine options
        let e_cfg = &cfg.engine;
        if let Some(limit) = &e_cfg.acceleration_limit {
            state.set_acceleration_limits(limit.enabled, limit.ceiling, limit.minimum_separation);
        }
        state.set_rounding(e_cfg.rounding_digits);
        state.set_symmetry_check(e_cfg.symmetry_check);
        state.set_speed_factor(e_cfg.speed_factor);
        if !cfg.bodies.is_empty() {
            state.set_monitored_body(e_cfg.monitored_body)?;
        }

        info!("Loaded {} scenario with {} bodies in {:?} space", cfg.name, cfg.bodies.len(), cfg.space);

        Ok(Self {
            engine: SimulationEngine::new(state),
            tick: e_cfg.tick,
            ticks: e_cfg.ticks,
        })
    }
}

fn add_configured_body(state: &mut SimulationState, index: usize, bc: &BodyConfig) -> SimResult<usize> {
    let x = match (&bc.x, bc.start) {
        (Some(x), _) => vec2(x, "x")?,
        (None, Some(start)) => start.resolve(state.space()),
        (None, None) => return Err(SimError::MissingPosition(index)),
    };
    let v = match &bc.v {
        Some(v) => vec2(v, "v")?,
        None => NVec2::zeros(),
    };

    if bc.actual {
        Ok(state.add_body_actual(bc.m, bc.gravity_source, bc.size, x, v))
    } else {
        Ok(state.add_body(bc.m, bc.size, x, v, bc.gravity_source))
    }
}

fn vec2(values: &[f64], field: &'static str) -> SimResult<NVec2> {
    match values {
        [x, y] => Ok(NVec2::new(*x, *y)),
        _ => Err(SimError::InvalidVector { field, len: values.len() }),
    }
}

/// The 5-body cross in toy space: four equal bodies at the stage cardinal
/// points (left, top, right, bottom) around a fifth at the center
pub fn five_body_cross(rounding_digits: u32, symmetry_check: bool) -> SimulationEngine {
    let mut state = SimulationState::new(UnitSpace::toy());
    state.set_scenario_name("5 Bodies Cross");

    let cross = [
        (StagePosition::StageLeft, 3.0),
        (StagePosition::StageTop, 3.0),
        (StagePosition::StageRight, 3.0),
        (StagePosition::StageBottom, 3.0),
        (StagePosition::Center, 10.0),
    ];
    for (start, size) in cross {
        state.add_body_at(start, 1.0, size, NVec2::zeros(), true);
    }

    state.set_rounding(rounding_digits);
    state.set_symmetry_check(symmetry_check);
    SimulationEngine::new(state)
}
