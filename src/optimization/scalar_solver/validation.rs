//! Validation helpers for scalar root finding and minimization.
//!
//! - **Option checks**: [`verify_tolerance`], [`verify_max_iter`],
//!   [`verify_tolerance_bits`].
//! - **Interval checks**: [`verify_interval`] enforces finite, ordered
//!   brackets and bounds; [`verify_sign_change`] checks that a bracket
//!   encloses a root.
//! - **Outcome checks**: [`validate_position`] ensures a solver reported a
//!   finite best position.
use crate::optimization::{
    errors::{OptError, OptResult},
    scalar_solver::types::MAX_TOLERANCE_BITS,
};

/// Validate a solver tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolerance`] if the value is non-finite or ≤ 0.0.
pub fn verify_tolerance(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolerance { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidTolerance { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate an iteration cap.
///
/// # Errors
/// Returns [`OptError::InvalidMaxIter`] if `max_iter == 0`.
pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate a precision given in binary digits.
///
/// # Errors
/// Returns [`OptError::InvalidToleranceBits`] unless `1 <= bits <= 52`.
pub fn verify_tolerance_bits(bits: u32) -> OptResult<()> {
    if bits == 0 || bits > MAX_TOLERANCE_BITS {
        return Err(OptError::InvalidToleranceBits { bits });
    }
    Ok(())
}

/// Validate a search interval `[lower, upper]`.
///
/// # Errors
/// Returns [`OptError::InvalidBounds`] if either end is non-finite or
/// `lower >= upper`.
pub fn verify_interval(lower: f64, upper: f64) -> OptResult<()> {
    if !lower.is_finite() || !upper.is_finite() {
        return Err(OptError::InvalidBounds {
            lower,
            upper,
            reason: "Interval ends must be finite.",
        });
    }
    if lower >= upper {
        return Err(OptError::InvalidBounds {
            lower,
            upper,
            reason: "Lower end must be strictly below upper end.",
        });
    }
    Ok(())
}

/// Validate that `f` changes sign over `[lower, upper]`.
///
/// A zero at either end counts as a sign change.
///
/// # Errors
/// - [`OptError::NonFiniteCost`] if `f` is non-finite at an end.
/// - [`OptError::InvalidParameter`] if both ends have the same sign.
pub fn verify_sign_change<F>(f: &F, lower: f64, upper: f64) -> OptResult<()>
where
    F: Fn(f64) -> f64,
{
    let (f_lower, f_upper) = (f(lower), f(upper));
    for (x, value) in [(lower, f_lower), (upper, f_upper)] {
        if !value.is_finite() {
            return Err(OptError::NonFiniteCost { x, value });
        }
    }
    if f_lower * f_upper > 0.0 {
        return Err(OptError::InvalidParameter {
            text: format!("f({lower}) = {f_lower} and f({upper}) = {f_upper} have the same sign"),
        });
    }
    Ok(())
}

/// Validate and unwrap the best position reported by a solver.
///
/// # Errors
/// - [`OptError::MissingPosition`] if no position was recorded.
/// - [`OptError::InvalidPosition`] if it is non-finite.
pub fn validate_position(position: Option<f64>) -> OptResult<f64> {
    match position {
        Some(value) if value.is_finite() => Ok(value),
        Some(value) => Err(OptError::InvalidPosition { value }),
        None => Err(OptError::MissingPosition),
    }
}
