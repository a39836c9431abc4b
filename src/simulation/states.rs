//! Core state types for the N-body simulation.
//!
//! - `NVec2` is the 2D double vector used for positions, velocities and
//!   accelerations. Equality is exact component comparison, which the
//!   symmetry checks depend on.
//! - `Body` holds one body's mass, size and kinematic state.

use nalgebra::Vector2;

use super::integrator::AdditionHook;
use super::units::UnitSpace;

pub type NVec2 = Vector2<f64>;

/// Helpers nalgebra doesn't provide, used by the acceleration shaping passes
pub trait VectorExt {
    /// True only for an exact (0, 0)
    fn is_zero(&self) -> bool;

    /// Each component rounded to `digits` decimal places, half away from zero
    fn rounded(&self, digits: u32) -> Self;
}

impl VectorExt for NVec2 {
    fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    fn rounded(&self, digits: u32) -> Self {
        NVec2::new(round_to_digits(self.x, digits), round_to_digits(self.y, digits))
    }
}

/// Round `value` to `digits` decimal places.
///
/// `f64::round` rounds half away from zero. Values too large to carry any
/// fractional digits come back unchanged.
pub fn round_to_digits(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// A body in the simulation.
///
/// Mass is stored already multiplied by the space's mass scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub mass: f64,              // internal mass
    pub size: f64,              // rendered diameter, space units
    pub x: NVec2,               // position
    pub v: NVec2,               // velocity, internal units
    pub is_gravity_source: bool, // false -> accelerated, but pulls on nobody
}

impl Body {
    /// Build a body from a requested mass, scaling it into `space`'s mass units
    pub fn new(space: &UnitSpace, mass: f64, size: f64, x: NVec2, v: NVec2, is_gravity_source: bool) -> Self {
        Self {
            mass: mass * space.mass_scale(),
            size,
            x,
            v,
            is_gravity_source,
        }
    }

    /// Acceleration this body feels from `other`.
    ///
    /// The squared separation is floored at `min_separation_squared` since
    /// collisions are not modeled.
    pub fn acceleration_from(&self, other: &Body, g: f64, min_separation_squared: f64) -> NVec2 {
        let rx = other.x.x - self.x.x;
        let ry = other.x.y - self.x.y;

        let r_squared = (rx * rx + ry * ry).max(min_separation_squared);
        let r = r_squared.sqrt();

        // a = G * m_other / r^2, the body's own mass cancels
        let a = g * other.mass / r_squared;

        NVec2::new(a * rx / r, a * ry / r)
    }

    /// Advance this body by `dt` under constant `accel`.
    ///
    /// Position moves by the average of the old and new velocity, which is
    /// exact for constant acceleration over the interval. `hook` sees the
    /// operands of every addition before it happens.
    pub fn move_by<H: AdditionHook>(&mut self, accel: NVec2, dt: f64, index: usize, hook: &mut H) {
        super::integrator::trapezoidal_move(&mut self.x, &mut self.v, accel, dt, index, hook);
    }

    /// Current speed in internal velocity units
    pub fn speed(&self) -> f64 {
        self.v.magnitude()
    }
}
