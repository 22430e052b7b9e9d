//! optimization::regression — ordinary least-squares line fit.
//!
//! Purpose
//! -------
//! Fit `y = intercept + slope·x` by ordinary least squares and report the
//! coefficient standard errors together with the correlation coefficient and
//! the two-sided p-value of the slope, as a `linregress`-style result.
//!
//! Key behaviors
//! -------------
//! - Solves the 2×2 normal equations with `nalgebra`; the inverse Gram
//!   matrix scaled by `s² = RSS/(n − 2)` is the coefficient covariance.
//! - The p-value tests `slope = 0` against a Student-t with `n − 2` degrees
//!   of freedom (`statrs`).
//!
//! Invariants & assumptions
//! ------------------------
//! - `len(x) == len(y) ≥ 3`, all samples finite, `x` not constant.
use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::optimization::errors::{OptError, OptResult};

/// Minimum number of points for a line with error estimates.
pub const MIN_REGRESSION_POINTS: usize = 3;

/// LinearFit — OLS line with diagnostics.
///
/// Fields
/// ------
/// - `slope`, `intercept`: fitted coefficients.
/// - `slope_error`, `intercept_error`: standard errors.
/// - `r_value`: Pearson correlation of `x` and `y` (0 for constant `y`).
/// - `p_value`: two-sided p-value of `slope = 0`.
/// - `n`: number of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub slope_error: f64,
    pub intercept_error: f64,
    pub r_value: f64,
    pub p_value: f64,
    pub n: usize,
}

/// linear_fit — ordinary least squares of `y` on `x`.
///
/// Errors
/// ------
/// - [`OptError::SampleLengthMismatch`] if lengths differ.
/// - [`OptError::TooFewPoints`] if fewer than [`MIN_REGRESSION_POINTS`].
/// - [`OptError::NonFiniteSample`] for the first NaN/±∞ (x first, then y).
/// - [`OptError::DegenerateRegressor`] if `x` is constant.
/// - [`OptError::Distribution`] if the t distribution cannot be built.
pub fn linear_fit(x: &[f64], y: &[f64]) -> OptResult<LinearFit> {
    validate_samples(x, y)?;
    let n = x.len();

    let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { x[i] });
    let response = DVector::from_column_slice(y);
    let gram = design.transpose() * &design;
    let gram_inv = gram.try_inverse().ok_or(OptError::DegenerateRegressor)?;
    let beta = &gram_inv * (design.transpose() * &response);
    let residuals = &response - &design * &beta;

    let dof = (n - 2) as f64;
    let s2 = residuals.norm_squared() / dof;
    let intercept_error = (s2 * gram_inv[(0, 0)]).max(0.0).sqrt();
    let slope_error = (s2 * gram_inv[(1, 1)]).max(0.0).sqrt();
    let (intercept, slope) = (beta[0], beta[1]);

    let r_value = pearson(x, y);
    let p_value = if slope_error > 0.0 {
        let dist = StudentsT::new(0.0, 1.0, dof)
            .map_err(|e| OptError::Distribution { text: e.to_string() })?;
        2.0 * dist.sf((slope / slope_error).abs())
    } else {
        0.0
    };

    Ok(LinearFit { slope, intercept, slope_error, intercept_error, r_value, p_value, n })
}

fn validate_samples(x: &[f64], y: &[f64]) -> OptResult<()> {
    if x.len() != y.len() {
        return Err(OptError::SampleLengthMismatch { x_len: x.len(), y_len: y.len() });
    }
    if x.len() < MIN_REGRESSION_POINTS {
        return Err(OptError::TooFewPoints { n: x.len(), min: MIN_REGRESSION_POINTS });
    }
    for (index, &value) in x.iter().chain(y).enumerate() {
        if !value.is_finite() {
            return Err(OptError::NonFiniteSample { index: index % x.len(), value });
        }
    }
    if x.iter().all(|&v| v == x[0]) {
        return Err(OptError::DegenerateRegressor);
    }
    Ok(())
}

fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let (dx, dy) = (xi - x_mean, yi - y_mean);
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if syy == 0.0 { 0.0 } else { sxy / (sxx * syy).sqrt() }
}
