//! Circular orbit placement
//!
//! Seeds an orbiter on a circular, clockwise orbit around a central mass at
//! the origin. Angle 0 is straight up (+y); angles grow clockwise.

use super::states::NVec2;
use super::units::UnitSpace;

/// Circular orbit speed sqrt(G M / r), in the space's display velocity units
pub fn circular_orbit_velocity(space: &UnitSpace, central_mass: f64, radius: f64) -> f64 {
    space.to_display_velocity(internal_circular_speed(space, central_mass, radius))
}

/// Same speed in internal velocity units
pub fn internal_circular_speed(space: &UnitSpace, central_mass: f64, radius: f64) -> f64 {
    (space.big_g() * central_mass / radius).sqrt()
}

/// Position and internal velocity for a clockwise circular orbit.
///
/// position = r (sin t, cos t), velocity = speed (cos t, -sin t)
pub fn initialize_circular_orbit(space: &UnitSpace, angle_deg: f64, radius: f64, central_mass: f64) -> (NVec2, NVec2) {
    let theta = angle_deg.to_radians();
    let (sin_t, cos_t) = theta.sin_cos();
    let speed = internal_circular_speed(space, central_mass, radius);

    let position = NVec2::new(radius * sin_t, radius * cos_t);
    let velocity = NVec2::new(speed * cos_t, -speed * sin_t);

    (position, velocity)
}
