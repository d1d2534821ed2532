//! Numeric helpers.

/// Round to two decimal places (cents).
///
/// Halves round away from zero (`f64::round`), so a similarity ratio of
/// exactly `0.125` becomes `0.13`, not the banker's-rounding `0.12`.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
