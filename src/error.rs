//! Error types for the simulation library

use thiserror::Error;

use crate::simulation::units::SpaceKind;

/// Result type for simulation setup operations
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while configuring a simulation.
///
/// Stepping never fails; these only come out of setup and scenario loading.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("simulation space not implemented: {0:?}")]
    UnimplementedSpace(SpaceKind),

    #[error("no body with index {index} (simulation has {count} bodies)")]
    NoSuchBody { index: usize, count: usize },

    #[error("substeps per tick must be at least 1, got {0}")]
    InvalidSubsteps(u32),

    #[error("expected a 2-component vector for {field}, got {len} components")]
    InvalidVector { field: &'static str, len: usize },

    #[error("body {0} needs either an `x` position or a `start` position")]
    MissingPosition(usize),
}
