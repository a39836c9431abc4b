//! Floating-point addition precision diagnostics
//!
//! Adding a small double to a much larger one keeps only the leading digits
//! of the small operand. Once the gap between the operands' orders of
//! magnitude nears the ~17 significant decimal digits a double carries, the
//! addition contributes few digits or none, and integration error starts to
//! pile up.
//!
//! Several checks live here:
//! - [`check_addition_precision`] is the log10 heuristic the integrator uses.
//! - [`check_addition_precision_by_ratio`] is a cheaper ratio test.
//! - [`decimal_addition_precision`] is the exact, slow method: keep scaling
//!   the smaller operand by 0.1 until it no longer changes the sum.
//!
//! The heuristic and the exact method agree on the ranges that have been
//! measured, but the heuristic can be off by one digit right at a digit-count
//! boundary. That is a known limitation of rounding a log difference.

use tracing::warn;

use super::integrator::AdditionHook;

/// Significant decimal digits a double carries (sometimes 16 in practice)
pub const DOUBLE_SIGNIFICANT_DECIMAL_DIGITS: i32 = 17;

/// Fewest digits of the smaller operand an addition should keep
pub const MINIMUM_DIGITS_PRECISION: i32 = 3;

/// Largest order-of-magnitude gap tolerated between two addends
pub const MAX_ALLOWED_MAGNITUDE_DIFFERENCE: i32 =
    DOUBLE_SIGNIFICANT_DECIMAL_DIGITS - MINIMUM_DIGITS_PRECISION - 1;

const DOUBLE_MANTISSA_BINARY_DIGITS: i32 = 53;

/// Smallest |small / large| ratio accepted by the ratio check
pub fn min_allowed_ratio() -> f64 {
    let machine_precision = 2f64.powi(-(DOUBLE_MANTISSA_BINARY_DIGITS - 1));
    machine_precision * 10f64.powi(MINIMUM_DIGITS_PRECISION - 1)
}

/// True when adding `a` and `b` keeps fewer than the minimum digits of the
/// smaller operand.
///
/// Adding to or from zero never loses precision. Roughly 20-40x the cost of
/// the addition it checks.
///
/// ```
/// use gravsim::check_addition_precision;
/// assert!(check_addition_precision(42000.0, 1e-9));
/// assert!(!check_addition_precision(42000.0, 1e-2));
/// ```
pub fn check_addition_precision(a: f64, b: f64) -> bool {
    if a == 0.0 || b == 0.0 {
        return false;
    }
    addition_magnitude_difference(a, b) > MAX_ALLOWED_MAGNITUDE_DIFFERENCE
}

/// Gap between the decimal orders of magnitude of `a` and `b`, rounded half
/// away from zero
pub fn addition_magnitude_difference(a: f64, b: f64) -> i32 {
    let magnitude_a = a.abs().log10();
    let magnitude_b = b.abs().log10();

    (magnitude_a - magnitude_b).abs().round() as i32
}

/// Ratio form of the precision check: |smaller / larger| below
/// [`min_allowed_ratio`]
pub fn check_addition_precision_by_ratio(a: f64, b: f64) -> bool {
    if a == 0.0 || b == 0.0 {
        return false;
    }

    let (larger, smaller) = if a.abs() > b.abs() { (a, b) } else { (b, a) };

    (smaller / larger).abs() < min_allowed_ratio()
}

/// Exact count of decimal digits of the smaller operand that survive the
/// addition.
///
/// Repeatedly scales the smaller operand by 0.1 until it stops changing the
/// sum. Slow; kept to cross-check the heuristics. NaN or infinite operands
/// carry no digits and give 0.
pub fn decimal_addition_precision(a: f64, b: f64) -> u32 {
    if !a.is_finite() || !b.is_finite() {
        return 0;
    }
    let (larger, mut smaller) = if a.abs() > b.abs() { (a, b) } else { (b, a) };

    let mut significant_digits = 0;
    while larger + smaller != larger {
        smaller *= 0.1;
        significant_digits += 1;
    }
    significant_digits
}

/// Exact counterpart of [`check_addition_precision`]
pub fn check_addition_precision_exact(a: f64, b: f64) -> bool {
    if a == 0.0 || b == 0.0 {
        return false;
    }
    decimal_addition_precision(a, b) <= MINIMUM_DIGITS_PRECISION as u32
}

/// Default cap on precision warnings logged per simulation
pub const PRECISION_WARNING_LIMIT: u64 = 1000;

/// Addition hook that flags lossy additions and logs a bounded number of
/// warnings.
///
/// Counting continues after the log limit is reached so the total stays
/// available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecisionMonitor {
    detected: u64,
    logged: u64,
    limit: u64,
}

impl PrecisionMonitor {
    pub fn new(limit: u64) -> Self {
        Self {
            detected: 0,
            logged: 0,
            limit,
        }
    }

    /// Lossy additions seen so far
    pub fn detected(&self) -> u64 {
        self.detected
    }

    /// Warnings actually written to the log
    pub fn logged(&self) -> u64 {
        self.logged
    }

    pub fn reset(&mut self) {
        self.detected = 0;
        self.logged = 0;
    }
}

impl Default for PrecisionMonitor {
    fn default() -> Self {
        Self::new(PRECISION_WARNING_LIMIT)
    }
}

impl AdditionHook for PrecisionMonitor {
    fn before_add(&mut self, a: f64, b: f64, what: &'static str, body: usize) {
        if !check_addition_precision(a, b) {
            return;
        }
        self.detected += 1;

        if self.logged < self.limit {
            self.logged += 1;
            warn!(
                "Body #{body} {what}: a = {a:e}, b = {b:e}, mag diff = {}",
                addition_magnitude_difference(a, b)
            );
            if self.logged == self.limit {
                warn!("Reached limit of {} precision warning messages. No more will be displayed.", self.limit);
            }
        }
    }
}
