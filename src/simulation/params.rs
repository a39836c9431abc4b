//! Calculation settings for the physics engine
//!
//! Set per scenario to suit its scale and accuracy needs:
//! - substeps per external tick,
//! - whether the acceleration pass runs in parallel,
//! - whether every addition in the integrator is precision-checked

use crate::error::{SimError, SimResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationSettings {
    substeps: u32,                  // integration substeps per external tick, >= 1
    pub use_parallel_calculations: bool, // partition the acceleration pass across rayon workers
    pub check_addition_precision: bool,  // diagnostic only, slows integration considerably
}

impl CalculationSettings {
    pub fn new(substeps: u32, use_parallel_calculations: bool, check_addition_precision: bool) -> SimResult<Self> {
        if substeps == 0 {
            return Err(SimError::InvalidSubsteps(substeps));
        }
        Ok(Self {
            substeps,
            use_parallel_calculations,
            check_addition_precision,
        })
    }

    pub fn substeps(&self) -> u32 {
        self.substeps
    }
}

impl Default for CalculationSettings {
    fn default() -> Self {
        Self {
            substeps: 1,
            use_parallel_calculations: false,
            check_addition_precision: false,
        }
    }
}
