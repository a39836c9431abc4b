//! Human-readable elapsed simulation time
//!
//! Starting from a base unit, the value is promoted to the next larger unit
//! once it passes that unit's cut-over point (90 sec., 90 min., 24 hrs.,
//! 365.25 days).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseUnits {
    Seconds,
    Minutes,
    Hours,
    Days,
    Years,
}

const UNIT_ABBREVIATIONS: [&str; 5] = ["sec.", "min.", "hrs.", "days", "years"];
const DECIMALS: [usize; 5] = [1, 2, 2, 3, 3];
const UNITS_PER_UNIT: [f64; 4] = [60.0, 60.0, 24.0, 365.25];
const CUTOVER_POINT: [f64; 4] = [90.0, 90.0, 24.0, 365.25];

/// Format `elapsed`, given in `base` units, in the largest sensible unit
pub fn format_elapsed_time(elapsed: f64, base: BaseUnits) -> String {
    let mut value = elapsed;
    let mut unit = base as usize;

    while unit < UNITS_PER_UNIT.len() && value > CUTOVER_POINT[unit] {
        value /= UNITS_PER_UNIT[unit];
        unit += 1;
    }

    format!("{:.*} {}", DECIMALS[unit], value, UNIT_ABBREVIATIONS[unit])
}

/// Base units matching a space's time label
pub fn base_units_for_label(label: &str) -> BaseUnits {
    match label {
        "min." => BaseUnits::Minutes,
        "hrs." => BaseUnits::Hours,
        "days" => BaseUnits::Days,
        "years" => BaseUnits::Years,
        _ => BaseUnits::Seconds,
    }
}
