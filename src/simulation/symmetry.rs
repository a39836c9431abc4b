//! Symmetry validation for the 5-body cross scenario
//!
//! Four equal bodies sit at stage left, top, right and bottom (indices 0..=3,
//! in that order) around a fifth at the center (index 4). By symmetry every
//! per-body quantity (position, velocity, acceleration) must satisfy:
//!
//!   q[0].x == -q[1].y == -q[2].x == q[3].y
//!   q[0].y ==  q[1].x ==  q[2].y == q[3].x == 0
//!   q[4] == (0, 0)
//!
//! All comparisons are exact. Any mismatch means floating-point drift has
//! broken the symmetry.

use std::fmt;

use super::states::NVec2;

pub const FIVE_BODY_CROSS_LEN: usize = 5;

/// Which relationship failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymmetryRule {
    WrongBodyCount,
    CardinalMismatch,
    OffAxisNotZero,
    CenterNotZero,
}

/// A failed symmetry check
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetryViolation {
    pub rule: SymmetryRule,
    pub what: &'static str,
    pub values: Vec<NVec2>,
}

impl fmt::Display for SymmetryViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "5-body cross {:?} in {}:", self.rule, self.what)?;
        for (i, q) in self.values.iter().enumerate() {
            write!(f, " #{i}=({:e}, {:e})", q.x, q.y)?;
        }
        Ok(())
    }
}

/// Check one per-body quantity of a 5-body cross
pub fn check_five_body_cross(points: &[NVec2], what: &'static str) -> Result<(), SymmetryViolation> {
    let violation = |rule| SymmetryViolation {
        rule,
        what,
        values: points.to_vec(),
    };

    if points.len() != FIVE_BODY_CROSS_LEN {
        return Err(violation(SymmetryRule::WrongBodyCount));
    }

    if !four_way_match(points[0].x, -points[1].y, -points[2].x, points[3].y) {
        return Err(violation(SymmetryRule::CardinalMismatch));
    }
    if !all_zero(&[points[0].y, points[1].x, points[2].y, points[3].x]) {
        return Err(violation(SymmetryRule::OffAxisNotZero));
    }
    if !all_zero(&[points[4].x, points[4].y]) {
        return Err(violation(SymmetryRule::CenterNotZero));
    }
    Ok(())
}

fn four_way_match(a: f64, b: f64, c: f64, d: f64) -> bool {
    a == b && b == c && c == d
}

fn all_zero(values: &[f64]) -> bool {
    values.iter().all(|v| *v == 0.0)
}
