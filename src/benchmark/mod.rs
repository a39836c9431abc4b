pub mod benchmark;
pub mod orbit_quality;
