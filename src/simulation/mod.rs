pub mod states;
pub mod units;
pub mod params;
pub mod precision;
pub mod integrator;
pub mod forces;
pub mod symmetry;
pub mod engine;
pub mod orbit;
pub mod scenario;
pub mod time_display;
