//! Acceleration pass and acceleration shaping
//!
//! - [`NewtonianGravity`] sums pairwise gravity into one acceleration per body
//! - [`enforce_acceleration_limit`] clamps runaway accelerations
//! - [`round_accelerations`] snaps accelerations to a fixed decimal
//!   resolution so hand-built symmetric scenarios stay symmetric

use rayon::prelude::*;

use crate::simulation::states::{Body, NVec2, VectorExt};

/// Trait for acceleration sources.
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, bodies: &[Body], out: &mut [NVec2]);
}

/// Direct O(n^2) Newtonian gravity with a separation floor.
///
/// Only gravity sources pull; every body is pulled. Each body's
/// contributions are summed in index order, so the parallel pass gives
/// bit-identical results to the serial one.
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub g: f64,                      // gravitational constant, space units
    pub min_separation_squared: f64, // floor on r^2
    pub parallel: bool,              // split the outer body loop across rayon workers
}

impl NewtonianGravity {
    fn sum_for(&self, i: usize, bodies: &[Body]) -> NVec2 {
        let bi = &bodies[i];
        let mut sum = NVec2::zeros();

        for (j, bj) in bodies.iter().enumerate() {
            if i != j && bj.is_gravity_source {
                let a = bi.acceleration_from(bj, self.g, self.min_separation_squared);
                sum.x += a.x;
                sum.y += a.y;
            }
        }
        sum
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, bodies: &[Body], out: &mut [NVec2]) {
        let n = bodies.len();
        if n < 2 { // nothing to pull on
            return;
        }

        if self.parallel {
            // Each worker owns a disjoint slice of `out`
            out.par_iter_mut().enumerate().for_each(|(i, a)| {
                *a += self.sum_for(i, bodies);
            });
        } else {
            for (i, a) in out.iter_mut().enumerate() {
                *a += self.sum_for(i, bodies);
            }
        }
    }
}

/// Compute gravity for all bodies into a zeroed `out`
pub fn accumulate_accels(gravity: &NewtonianGravity, bodies: &[Body], out: &mut [NVec2]) {
    // Zero buffer
    for a in out.iter_mut() {
        *a = NVec2::zeros();
    }
    gravity.acceleration(bodies, out);
}

/// Rescale any acceleration longer than `limit` down to exactly `limit`,
/// keeping its direction. Returns how many were clamped.
pub fn enforce_acceleration_limit(accels: &mut [NVec2], limit: f64) -> usize {
    let mut clamped = 0;
    for a in accels.iter_mut() {
        if a.magnitude() > limit {
            *a = a.cap_magnitude(limit);
            clamped += 1;
        }
    }
    clamped
}

/// Round every component to `digits` decimal places.
///
/// In exactly symmetric scenarios the summation order leaves sub-ulp
/// differences between bodies that should match; rounding snaps them back
/// to a common value.
pub fn round_accelerations(accels: &mut [NVec2], digits: u32) {
    for a in accels.iter_mut() {
        *a = a.rounded(digits);
    }
}
