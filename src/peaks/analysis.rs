//! peaks::analysis — weight extraction from a resolvent peak.
//!
//! The analysis runs `raw position → refined position → fitted real part`:
//! the refinement step is optional and retried once with a narrower window,
//! and the fit yields the weight `exp(intercept)`. Weights whose exponent
//! would exceed [`WEIGHT_EXPONENT_LIMIT`] are clamped to [`WEIGHT_CLAMP`].
use num_complex::Complex64;
use tracing::warn;

use crate::optimization::errors::OptError;
use crate::peaks::{
    errors::{PeakAnalysisResult, PeakError},
    options::PeakOptions,
    peak::{Peak, RealPartFit, Refinement},
    stats::inverse_variance_mean,
};

/// Sentinel for weights and weight errors that would overflow.
pub const WEIGHT_CLAMP: f64 = 1e16;

/// `ln(1e16)`; intercepts above it are clamped.
pub const WEIGHT_EXPONENT_LIMIT: f64 = 36.841_361_487_904_734;

/// PeakResult — refined position and extracted weight.
///
/// Fields
/// ------
/// - `position`: refined position (the raw one when refinement is off).
/// - `weight`, `weight_error`: `exp(intercept)` and
///   `exp(intercept)·intercept_error`, both clamped to [`WEIGHT_CLAMP`].
/// - `slope`, `slope_error`: fitted slope; `−1` for a delta peak.
/// - `refined`: whether the position came from a converged refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakResult {
    pub position: f64,
    pub weight: f64,
    pub weight_error: f64,
    pub slope: f64,
    pub slope_error: f64,
    pub refined: bool,
}

/// Peak measured on both sides, combined by inverse variance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoSidedPeak {
    pub above: PeakResult,
    pub below: PeakResult,
    pub weight: f64,
    pub weight_error: f64,
}

/// analyze_peak — refine (optionally), fit and extract the weight.
///
/// Errors
/// ------
/// - Invalid options (see [`PeakOptions::validate`]).
/// - [`PeakError::RefinementFailed`] if refinement fails at `offset` and
///   again at `offset · retry_offset_factor`.
/// - [`PeakError::Opt`] from the minimizer or the regression.
pub fn analyze_peak<F>(peak: &Peak<F>, opts: &PeakOptions) -> PeakAnalysisResult<PeakResult>
where
    F: Fn(f64) -> Complex64,
{
    opts.validate()?;
    let (position, refined) = refined_position(peak, opts)?;
    let sampled = peak.fit_real_part(position, opts.range, opts.begin_offset, opts.reversed, opts.n_points)?;
    Ok(extract_weight(position, refined, &sampled, opts))
}

/// analyze_peak_both_sides — [`analyze_peak`] above and below the peak,
/// with the weights combined by [`inverse_variance_mean`].
///
/// The position is refined once and shared by both fits.
///
/// Errors
/// ------
/// - As [`analyze_peak`].
/// - [`PeakError::InvalidStdDev`] when a side has a zero or clamped-to-
///   infinite weight error.
pub fn analyze_peak_both_sides<F>(peak: &Peak<F>, opts: &PeakOptions) -> PeakAnalysisResult<TwoSidedPeak>
where
    F: Fn(f64) -> Complex64,
{
    opts.validate()?;
    let (position, refined) = refined_position(peak, opts)?;
    let side = |reversed: bool| -> PeakAnalysisResult<PeakResult> {
        let sampled = peak.fit_real_part(position, opts.range, opts.begin_offset, reversed, opts.n_points)?;
        Ok(extract_weight(position, refined, &sampled, opts))
    };
    let above = side(false)?;
    let below = side(true)?;

    let (weight, weight_error) = inverse_variance_mean(
        &[above.weight, below.weight],
        &[above.weight_error, below.weight_error],
    )?;
    Ok(TwoSidedPeak { above, below, weight, weight_error })
}

fn refined_position<F>(peak: &Peak<F>, opts: &PeakOptions) -> PeakAnalysisResult<(f64, bool)>
where
    F: Fn(f64) -> Complex64,
{
    if !opts.improve_position {
        return Ok((peak.position(), false));
    }
    let first = recoverable_refinement(peak, opts, opts.offset)?;
    if first.success {
        return Ok((first.position, true));
    }

    let retry_offset = opts.offset * opts.retry_offset_factor;
    warn!(
        position = peak.position(),
        offset = opts.offset,
        retry_offset,
        "peak refinement failed, retrying: {}",
        first.message
    );
    let second = recoverable_refinement(peak, opts, retry_offset)?;
    if second.success {
        return Ok((second.position, true));
    }
    Err(PeakError::RefinementFailed { position: peak.position(), message: second.message })
}

/// One refinement attempt; a search the minimizer could not carry out
/// (a non-finite `Im f` or an empty window) counts as unsuccessful.
fn recoverable_refinement<F>(peak: &Peak<F>, opts: &PeakOptions, offset: f64) -> PeakAnalysisResult<Refinement>
where
    F: Fn(f64) -> Complex64,
{
    match peak.improved_position(opts.xtol, offset, opts.max_iter) {
        Err(PeakError::Opt(err @ (OptError::NonFiniteCost { .. } | OptError::InvalidBounds { .. }))) => {
            Ok(Refinement { position: peak.position(), success: false, message: err.to_string() })
        }
        other => other,
    }
}

fn extract_weight(position: f64, refined: bool, sampled: &RealPartFit, opts: &PeakOptions) -> PeakResult {
    let fit = &sampled.fit;
    if (fit.slope - opts.expected_slope).abs() > opts.slope_tolerance {
        warn!(
            position,
            slope = fit.slope,
            expected = opts.expected_slope,
            "fitted slope deviates from the expected value; weight may be meaningless"
        );
    }

    let (weight, weight_error) = if fit.intercept > WEIGHT_EXPONENT_LIMIT {
        (WEIGHT_CLAMP, WEIGHT_CLAMP)
    } else {
        let weight = fit.intercept.exp();
        (weight, weight * fit.intercept_error)
    };
    PeakResult { position, weight, weight_error, slope: fit.slope, slope_error: fit.slope_error, refined }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Weight recovery from delta peaks with and without refinement.
    // - Clamping of overflowing weights.
    // - Warnings (not failures) on slope mismatch.
    // - The refinement retry, including retries after a minimizer error,
    //   and its failure path.
    // - Two-sided combination.
    // -------------------------------------------------------------------------

    fn lorentzian(weight: f64, center: f64, eta: f64) -> impl Fn(f64) -> Complex64 {
        move |omega| Complex64::new(weight, 0.0) / Complex64::new(omega - center, eta)
    }

    #[test]
    // Purpose
    // -------
    // Recover slope and weight of an ideal delta peak.
    //
    // Given
    // -----
    // - f = 0.7/(ω − 1.2) on the real axis, refinement off.
    //
    // Expect
    // ------
    // - Slope −1 ± 0.01 and weight 0.7 ± 1%.
    fn delta_peak_weight_is_recovered() {
        // Arrange
        let f = |omega: f64| Complex64::new(0.7 / (omega - 1.2), 0.0);
        let peak = Peak::new(f, 1.2, None, 1.0).unwrap();
        let opts = PeakOptions { improve_position: false, begin_offset: 1e-6, ..PeakOptions::default() };

        // Act
        let result = analyze_peak(&peak, &opts).unwrap();

        // Assert
        assert!(!result.refined);
        assert_abs_diff_eq!(result.slope, -1.0, epsilon = 0.01);
        assert_relative_eq!(result.weight, 0.7, max_relative = 0.01);
    }

    #[test]
    // Purpose
    // -------
    // Refine a displaced position before fitting a narrow Lorentzian.
    //
    // Given
    // -----
    // - f = 0.3/(ω − 0.8 + 1e-7 i), raw position 0.802, fit window
    //   [1e-4, 1.1e-3].
    //
    // Expect
    // ------
    // - Refined position near 0.8, slope ≈ −1, weight 0.3 ± 1%.
    fn refined_lorentzian_weight_is_recovered() {
        let peak = Peak::new(lorentzian(0.3, 0.8, 1e-7), 0.802, Some(1.5), 1.0).unwrap();
        let opts = PeakOptions { begin_offset: 1e-4, ..PeakOptions::default() };

        let result = analyze_peak(&peak, &opts).unwrap();

        assert!(result.refined);
        assert_abs_diff_eq!(result.position, 0.8, epsilon = 1e-6);
        assert_abs_diff_eq!(result.slope, -1.0, epsilon = 0.01);
        assert_relative_eq!(result.weight, 0.3, max_relative = 0.01);
    }

    #[test]
    // Purpose
    // -------
    // Clamp weights that would overflow.
    //
    // Given
    // -----
    // - f = 1e17/(ω − 1), intercept ln(1e17) > ln(1e16).
    //
    // Expect
    // ------
    // - weight == weight_error == 1e16.
    fn overflowing_weight_is_clamped() {
        let peak = Peak::new(|omega: f64| Complex64::new(1e17 / (omega - 1.0), 0.0), 1.0, None, 1.0).unwrap();
        let opts = PeakOptions { improve_position: false, begin_offset: 1e-6, ..PeakOptions::default() };

        let result = analyze_peak(&peak, &opts).unwrap();

        assert_eq!(result.weight, WEIGHT_CLAMP);
        assert_eq!(result.weight_error, WEIGHT_CLAMP);
    }

    #[test]
    // Purpose
    // -------
    // A derivative-type peak is reported, not rejected.
    //
    // Given
    // -----
    // - f = 1/(ω − 1)², expected slope −1.
    //
    // Expect
    // ------
    // - Ok result with slope ≈ −2.
    fn slope_mismatch_only_warns() {
        let peak = Peak::new(|omega: f64| Complex64::new((omega - 1.0).powi(-2), 0.0), 1.0, None, 1.0).unwrap();
        let opts = PeakOptions { improve_position: false, begin_offset: 1e-6, ..PeakOptions::default() };

        let result = analyze_peak(&peak, &opts).unwrap();

        assert_abs_diff_eq!(result.slope, -2.0, epsilon = 0.01);
    }

    #[test]
    // Purpose
    // -------
    // Exhausting the retry is a refinement failure.
    //
    // Given
    // -----
    // - A Lorentzian refined with a single minimizer iteration.
    //
    // Expect
    // ------
    // - PeakError::RefinementFailed carrying the raw position.
    fn refinement_failure_after_retry_is_an_error() {
        let peak = Peak::new(lorentzian(1.0, 0.5, 1e-3), 0.505, None, 1.0).unwrap();
        let opts = PeakOptions { max_iter: 1, ..PeakOptions::default() };

        let err = analyze_peak(&peak, &opts).unwrap_err();

        assert!(matches!(err, PeakError::RefinementFailed { position, .. } if position == 0.505));
    }

    #[test]
    // Purpose
    // -------
    // A non-finite Im f in the first window triggers the narrower retry
    // instead of aborting.
    //
    // Given
    // -----
    // - Im f = (ω − 1.0005)² within 1.5e-3 of 1 and +∞ elsewhere, raw
    //   position 1; the first window [0.99, 1.01] is evaluated at ≈ 0.9976.
    //
    // Expect
    // ------
    // - The retry on [0.999, 1.001] converges near 1.0005.
    fn non_finite_first_window_is_retried() {
        // Arrange
        let f = |omega: f64| {
            let im = if (omega - 1.0).abs() < 1.5e-3 { (omega - 1.0005).powi(2) } else { f64::INFINITY };
            Complex64::new(1.0, im)
        };
        let peak = Peak::new(f, 1.0, None, 1.0).unwrap();
        let opts = PeakOptions::default();

        // Act
        let (position, refined) = refined_position(&peak, &opts).unwrap();

        // Assert
        assert!(refined);
        assert_abs_diff_eq!(position, 1.0005, epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Combine the two sides of a symmetric peak.
    //
    // Given
    // -----
    // - f = 1.5/(ω − 1 + 1e-4 i), fit window [1e-2, 0.11], refinement off.
    //
    // Expect
    // ------
    // - Equal side weights, combined weight 1.5 ± 1% with a positive error.
    fn both_sides_are_combined() {
        let peak = Peak::new(lorentzian(1.5, 1.0, 1e-4), 1.0, None, 1.0).unwrap();
        let opts = PeakOptions {
            improve_position: false,
            begin_offset: 1e-2,
            range: 0.1,
            ..PeakOptions::default()
        };

        let combined = analyze_peak_both_sides(&peak, &opts).unwrap();

        assert_relative_eq!(combined.above.weight, combined.below.weight, max_relative = 1e-6);
        assert_relative_eq!(combined.weight, 1.5, max_relative = 0.01);
        assert!(combined.weight_error > 0.0);
    }
}
