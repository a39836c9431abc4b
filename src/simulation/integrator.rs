//! Fixed-step trapezoidal integrator
//!
//! Each body moves under its acceleration held constant over the substep:
//!
//!   v_n+1 = v_n + a dt
//!   x_n+1 = x_n + (v_n + v_n+1) / 2 * dt
//!
//! Averaging the old and new velocity gives x_n+1 = x_n + v dt + a dt^2 / 2,
//! exact under constant acceleration, with a single force evaluation per
//! substep.
//!
//! The checked and unchecked paths are one routine. An [`AdditionHook`] is
//! shown the operands of every addition; [`NoCheck`] compiles away and
//! `PrecisionMonitor` runs the precision diagnostic.

use super::states::{Body, NVec2, VectorExt};

/// Observer called before each floating-point addition in the integrator
pub trait AdditionHook {
    fn before_add(&mut self, a: f64, b: f64, what: &'static str, body: usize);
}

/// Hook for normal operation, does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCheck;

impl AdditionHook for NoCheck {
    #[inline(always)]
    fn before_add(&mut self, _a: f64, _b: f64, _what: &'static str, _body: usize) {}
}

/// Move one position/velocity pair by `dt` under constant `accel`.
///
/// An exact (0, 0) acceleration leaves the state untouched, bit for bit.
pub fn trapezoidal_move<H: AdditionHook>(
    x: &mut NVec2,
    v: &mut NVec2,
    accel: NVec2,
    dt: f64,
    body: usize,
    hook: &mut H,
) {
    if accel.is_zero() {
        return;
    }

    // X
    let dvx = accel.x * dt;
    hook.before_add(v.x, dvx, "adding delta-v to v.x", body);
    let new_vx = v.x + dvx;

    let dpx = (v.x + new_vx) / 2.0 * dt;
    hook.before_add(x.x, dpx, "adding to x.x", body);
    x.x += dpx;
    v.x = new_vx;

    // Y
    let dvy = accel.y * dt;
    hook.before_add(v.y, dvy, "adding delta-v to v.y", body);
    let new_vy = v.y + dvy;

    let dpy = (v.y + new_vy) / 2.0 * dt;
    hook.before_add(x.y, dpy, "adding to x.y", body);
    x.y += dpy;
    v.y = new_vy;
}

/// Integrate every body with its matching acceleration
pub fn integrate_bodies<H: AdditionHook>(bodies: &mut [Body], accels: &[NVec2], dt: f64, hook: &mut H) {
    for (i, (b, a)) in bodies.iter_mut().zip(accels.iter()).enumerate() {
        b.move_by(*a, dt, i, hook);
    }
}
