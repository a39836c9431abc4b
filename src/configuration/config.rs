//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`SpaceKind`]          – the unit system the scenario runs in
//! - [`CalculationConfig`]  – substeps, parallel pass, precision checking
//! - [`EngineConfig`]       – acceleration shaping, speed, monitored body, tick
//! - [`BodyConfig`]         – initial state for each body
//! - [`ScenarioConfig`]     – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! The 5-body cross:
//!
//! ```yaml
//! name: "5 Bodies Cross"
//! space: toy                 # "null", toy, leo, geo
//!
//! calculation:
//!   substeps: 1
//!   parallel: false
//!   check_addition_precision: false
//!
//! engine:
//!   rounding_digits: 10      # 0 -> off
//!   symmetry_check: true
//!   monitored_body: 0
//!   tick: 0.03125            # external dt per tick
//!   ticks: 320
//!
//! bodies:
//!   - { start: stage_left,   m: 1.0, size: 3.0 }
//!   - { start: stage_top,    m: 1.0, size: 3.0 }
//!   - { start: stage_right,  m: 1.0, size: 3.0 }
//!   - { start: stage_bottom, m: 1.0, size: 3.0 }
//!   - { start: center,       m: 1.0, size: 10.0 }
//! ```
//!
//! Bodies give either an explicit `x: [x, y]` or a named `start` position.
//! With `actual: true`, `v` is read in the space's display velocity units
//! (km/h in the Earth orbit spaces).

use serde::Deserialize;

use crate::simulation::units::SpaceKind;

/// Named starting positions on the stage
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StagePosition {
    StageLeft,
    StageRight,
    StageTop,
    StageBottom,
    StageTopLeft,
    StageTopRight,
    StageBottomRight,
    StageBottomLeft,
    Center,
}

/// Calculation settings
#[derive(Deserialize, Debug, Clone)]
pub struct CalculationConfig {
    #[serde(default = "default_substeps")]
    pub substeps: u32, // integration substeps per tick
    #[serde(default)]
    pub parallel: bool, // parallel acceleration pass
    #[serde(default)]
    pub check_addition_precision: bool, // diagnostic precision checks in the integrator
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            substeps: default_substeps(),
            parallel: false,
            check_addition_precision: false,
        }
    }
}

/// Acceleration limiting and separation floor
#[derive(Deserialize, Debug, Clone)]
pub struct AccelerationLimitConfig {
    pub enabled: bool,
    pub ceiling: f64,
    #[serde(default = "default_minimum_separation")]
    pub minimum_separation: f64,
}

/// Engine-level options applied while stepping
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub acceleration_limit: Option<AccelerationLimitConfig>,
    #[serde(default)]
    pub rounding_digits: u32, // 0 -> no rounding
    #[serde(default)]
    pub symmetry_check: bool, // 5-body cross only
    #[serde(default)]
    pub monitored_body: usize,
    #[serde(default = "default_speed_factor")]
    pub speed_factor: f64,
    #[serde(default = "default_tick")]
    pub tick: f64, // external dt handed to each step
    #[serde(default = "default_ticks")]
    pub ticks: u64, // ticks to run from the CLI
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            acceleration_limit: None,
            rounding_digits: 0,
            symmetry_check: false,
            monitored_body: 0,
            speed_factor: default_speed_factor(),
            tick: default_tick(),
            ticks: default_ticks(),
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Option<Vec<f64>>,           // explicit position, space units
    pub start: Option<StagePosition>,  // named position, used when `x` is absent
    pub v: Option<Vec<f64>>,           // starting velocity, defaults to rest
    pub m: f64,                        // requested mass, scaled by the space
    pub size: f64,                     // rendered diameter
    #[serde(default = "default_gravity_source")]
    pub gravity_source: bool,
    #[serde(default)]
    pub actual: bool, // `v` is in display velocity units
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub name: String,
    pub space: SpaceKind,
    #[serde(default)]
    pub calculation: CalculationConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    pub bodies: Vec<BodyConfig>,
}

fn default_substeps() -> u32 { 1 }
fn default_minimum_separation() -> f64 { 1.0 }
fn default_speed_factor() -> f64 { 1.0 }
fn default_tick() -> f64 { 1.0 / 32.0 }
fn default_ticks() -> u64 { 320 }
fn default_gravity_source() -> bool { true }
