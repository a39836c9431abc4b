pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{SimError, SimResult};

pub use simulation::states::{Body, NVec2, VectorExt, round_to_digits};
pub use simulation::units::{SpaceKind, UnitSpace};
pub use simulation::params::CalculationSettings;
pub use simulation::precision::{
    addition_magnitude_difference, check_addition_precision, check_addition_precision_by_ratio,
    check_addition_precision_exact, decimal_addition_precision, PrecisionMonitor,
};
pub use simulation::integrator::{trapezoidal_move, AdditionHook, NoCheck};
pub use simulation::forces::{Acceleration, NewtonianGravity, enforce_acceleration_limit, round_accelerations};
pub use simulation::symmetry::{check_five_body_cross, SymmetryRule, SymmetryViolation};
pub use simulation::engine::{Diagnostics, Frame, SimulationEngine, SimulationState};
pub use simulation::orbit::{circular_orbit_velocity, initialize_circular_orbit};
pub use simulation::scenario::{five_body_cross, Scenario};
pub use simulation::time_display::{format_elapsed_time, BaseUnits};

pub use configuration::config::{BodyConfig, CalculationConfig, EngineConfig, ScenarioConfig, StagePosition};

pub use benchmark::benchmark::{bench_gravity, bench_precision_checks, bench_step_curve};
pub use benchmark::orbit_quality::{OrbitCounter, OrbitQualityHarness, OrbitQualityReport, SUBSTEP_LADDER};
