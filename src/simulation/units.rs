//! Unit systems the simulation can run in
//!
//! A `UnitSpace` fixes the gravitational constant, unit labels, the size of
//! the simulation box and the conversion factors for one scale of
//! simulation: toy units for sandbox scenarios, or km / kg / minutes for
//! real Earth orbits. Every simulation runs in exactly one space.

use serde::Deserialize;

use crate::error::{SimError, SimResult};

// ========== GRAVITY and MASS ==========
pub const BIG_G_M3_PER_KG_SEC2: f64 = 6.6743e-11;
pub const EARTH_SURFACE_ACCELERATION_M_PER_SEC2: f64 = 9.80665;
pub const EARTH_MASS_KG: f64 = 5.97220e24;

// ========== SPACE ==========
pub const KM_PER_METER: f64 = 1.0 / 1000.0;
pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const LEO_ORBIT_MAX_ALTITUDE_KM: f64 = 2000.0;

// ========== TIME ==========
pub const MINUTES_PER_HOUR: f64 = 60.0;
pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = SECONDS_PER_MINUTE * MINUTES_PER_HOUR;

// ========== SPACECRAFT ==========
// ISS: averaged across one orbit, 2020-06-19
pub const ISS_ORBIT_RADIUS_KM: f64 = 424.72 + EARTH_RADIUS_KM;
pub const ISS_ORBIT_VELOCITY_KM_H: f64 = 27570.2;
pub const STARLINK_ORBIT_RADIUS_KM: f64 = 550.0 + EARTH_RADIUS_KM;
pub const GPS_ORBIT_RADIUS_KM: f64 = 20180.0 + EARTH_RADIUS_KM;
pub const GEOSYNCHRONOUS_ORBIT_RADIUS_KM: f64 = 42164.2;

/// Toy masses are scaled so a requested mass of 1.0 gives interesting
/// accelerations at toy distances
const TOY_MASS_SCALE: f64 = 100_000.0;

/// Smallest rendered body as a fraction of the starting box width
const SMALLEST_BODY_SIZE_PORTION: f64 = 0.005;

/// Named unit systems
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpaceKind {
    #[default]
    Null,
    Toy,
    Leo,
    Geo,
    EarthMoon,
    SolarSystem,
    BinaryOrTrinarySystem,
    StarCluster,
    MicroGalaxy,
}

/// Immutable description of one unit system
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSpace {
    kind: SpaceKind,
    big_g: f64,
    mass_scale: f64,
    mass_units: &'static str,
    distance_units: &'static str,
    sim_box_half_extent: f64,
    distance_offset: f64,
    time_units: &'static str,
    time_units_per_ui_second: f64,
    velocity_units: &'static str,
    velocity_conversion_factor: f64,
    smallest_body_size: f64,
}

impl UnitSpace {
    /// Build the space named by `kind`.
    ///
    /// Only Null, Toy, LEO and GEO are defined; anything else is
    /// `SimError::UnimplementedSpace`.
    pub fn new(kind: SpaceKind) -> SimResult<Self> {
        match kind {
            SpaceKind::Null => Ok(Self::null()),
            SpaceKind::Toy => Ok(Self::toy()),
            SpaceKind::Leo => Ok(Self::leo()),
            SpaceKind::Geo => Ok(Self::geo()),
            other => Err(SimError::UnimplementedSpace(other)),
        }
    }

    /// Unitless space, 100 x 100
    pub fn null() -> Self {
        let box_width = 100.0;
        Self {
            kind: SpaceKind::Null,
            big_g: 1.0,
            mass_scale: 1.0,
            mass_units: "",
            distance_units: "",
            sim_box_half_extent: box_width / 2.0,
            distance_offset: 0.0,
            time_units: "sec.",
            time_units_per_ui_second: 1.0,
            velocity_units: "",
            velocity_conversion_factor: 1.0,
            smallest_body_size: box_width * SMALLEST_BODY_SIZE_PORTION,
        }
    }

    /// Sandbox space, 1000 x 1000 simunits with scaled masses
    pub fn toy() -> Self {
        let box_width = 1000.0;
        Self {
            kind: SpaceKind::Toy,
            big_g: 1.0,
            mass_scale: TOY_MASS_SCALE,
            mass_units: "simass",
            distance_units: "simunits",
            sim_box_half_extent: box_width / 2.0,
            distance_offset: 0.0,
            time_units: "sec.",
            time_units_per_ui_second: 1.0,
            velocity_units: "simunits/sec.",
            velocity_conversion_factor: 1.0,
            smallest_body_size: box_width * SMALLEST_BODY_SIZE_PORTION,
        }
    }

    /// Low Earth orbit: km, kg, minutes; velocities shown in km/h
    pub fn leo() -> Self {
        Self::earth_orbit(SpaceKind::Leo, 4.0 * EARTH_RADIUS_KM)
    }

    /// Geosynchronous orbit: same units as LEO, larger box
    pub fn geo() -> Self {
        Self::earth_orbit(SpaceKind::Geo, 10.0 * EARTH_RADIUS_KM)
    }

    fn earth_orbit(kind: SpaceKind, box_width: f64) -> Self {
        // G in km^3 / (kg * min^2)
        let big_g = BIG_G_M3_PER_KG_SEC2
            * KM_PER_METER * KM_PER_METER * KM_PER_METER
            * SECONDS_PER_MINUTE * SECONDS_PER_MINUTE;

        Self {
            kind,
            big_g,
            mass_scale: 1.0,
            mass_units: "kg",
            distance_units: "km",
            sim_box_half_extent: box_width / 2.0,
            distance_offset: EARTH_RADIUS_KM,
            time_units: "min.",
            time_units_per_ui_second: 1.0,
            velocity_units: "km/h",
            // internal km/min -> km/h
            velocity_conversion_factor: MINUTES_PER_HOUR,
            smallest_body_size: box_width * SMALLEST_BODY_SIZE_PORTION,
        }
    }

    pub fn kind(&self) -> SpaceKind { self.kind }
    pub fn big_g(&self) -> f64 { self.big_g }
    pub fn mass_scale(&self) -> f64 { self.mass_scale }
    pub fn mass_units(&self) -> &'static str { self.mass_units }
    pub fn distance_units(&self) -> &'static str { self.distance_units }
    pub fn sim_box_half_extent(&self) -> f64 { self.sim_box_half_extent }
    pub fn distance_offset(&self) -> f64 { self.distance_offset }
    pub fn time_units(&self) -> &'static str { self.time_units }
    pub fn time_units_per_ui_second(&self) -> f64 { self.time_units_per_ui_second }
    pub fn velocity_units(&self) -> &'static str { self.velocity_units }
    pub fn velocity_conversion_factor(&self) -> f64 { self.velocity_conversion_factor }
    pub fn smallest_body_size(&self) -> f64 { self.smallest_body_size }

    /// Internal velocity -> display velocity (e.g. km/min -> km/h)
    pub fn to_display_velocity(&self, internal: f64) -> f64 {
        internal * self.velocity_conversion_factor
    }

    /// Display velocity -> internal velocity
    pub fn from_display_velocity(&self, display: f64) -> f64 {
        display / self.velocity_conversion_factor
    }

    /// Distance from the reference surface, e.g. altitude above Earth
    pub fn display_distance(&self, distance: f64) -> f64 {
        distance - self.distance_offset
    }
}

impl Default for UnitSpace {
    fn default() -> Self {
        Self::null()
    }
}
