//! peaks::peak — a resolvent peak and its two measurement steps.
//!
//! A [`Peak`] wraps the resolvent on the real axis, `f(ω)`, together with a
//! raw position estimate. [`Peak::improved_position`] sharpens the position
//! by minimizing `Im f`, and [`Peak::fit_real_part`] regresses
//! `ln|Re f(position ± e^t)|` on `t`, whose intercept carries the weight of a
//! delta peak.
use ndarray::Array1;
use num_complex::Complex64;

use crate::optimization::{
    regression::{LinearFit, linear_fit},
    scalar_solver::{ScalarSolverOptions, bounded_minimize},
};
use crate::peaks::errors::{PeakAnalysisResult, PeakError};

/// Fraction of the distance to the continuum edge kept free of the search
/// window.
pub const EDGE_MARGIN: f64 = 0.01;

/// Peak — resolvent on the real axis plus a raw position.
///
/// Fields
/// ------
/// - `f`: `ω ↦ f(ω)`, typically the resolvent a small distance above the
///   real axis.
/// - `position`: raw peak position.
/// - `continuum_edge`: nearest continuum edge, if any; the search window
///   never reaches it.
/// - `scale`: unit of the search window half-width and of the fit window
///   offsets.
pub struct Peak<F> {
    f: F,
    position: f64,
    continuum_edge: Option<f64>,
    scale: f64,
}

/// Outcome of a position refinement.
#[derive(Debug, Clone, PartialEq)]
pub struct Refinement {
    pub position: f64,
    pub success: bool,
    pub message: String,
}

/// RealPartFit — regression of `ln|Re f|` on `t` with its samples.
///
/// `t` and `y` are kept for plotting the data next to the fitted line.
#[derive(Debug, Clone, PartialEq)]
pub struct RealPartFit {
    pub fit: LinearFit,
    pub t: Array1<f64>,
    pub y: Array1<f64>,
}

impl<F> Peak<F>
where
    F: Fn(f64) -> Complex64,
{
    /// Errors
    /// ------
    /// - [`PeakError::InvalidPosition`], [`PeakError::InvalidContinuumEdge`]
    ///   for non-finite values.
    /// - [`PeakError::InvalidScale`] unless `scale` is finite and positive.
    pub fn new(f: F, position: f64, continuum_edge: Option<f64>, scale: f64) -> PeakAnalysisResult<Self> {
        if !position.is_finite() {
            return Err(PeakError::InvalidPosition { value: position });
        }
        if let Some(edge) = continuum_edge {
            if !edge.is_finite() {
                return Err(PeakError::InvalidContinuumEdge { value: edge });
            }
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(PeakError::InvalidScale { value: scale });
        }
        Ok(Self { f, position, continuum_edge, scale })
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn continuum_edge(&self) -> Option<f64> {
        self.continuum_edge
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn evaluate(&self, omega: f64) -> Complex64 {
        (self.f)(omega)
    }

    /// Search window `[max(0, p − offset·scale), p + offset·scale]`, cut at
    /// `edge − 0.01·(edge − p)` on the side facing the continuum edge.
    pub fn search_bounds(&self, offset: f64) -> (f64, f64) {
        let half_width = offset * self.scale;
        let mut lower = (self.position - half_width).max(0.0);
        let mut upper = self.position + half_width;
        if let Some(edge) = self.continuum_edge {
            let cut = edge - EDGE_MARGIN * (edge - self.position);
            if edge > self.position {
                upper = upper.min(cut);
            } else {
                lower = lower.max(cut);
            }
        }
        (lower, upper)
    }

    /// improved_position — minimize `Im f` over [`Peak::search_bounds`].
    ///
    /// A run that does not converge is returned with `success == false`;
    /// the caller decides whether to retry.
    ///
    /// Errors
    /// ------
    /// - [`PeakError::Opt`] for an empty search window, an invalid `xtol`
    ///   or `max_iter`, or a non-finite `Im f`.
    pub fn improved_position(&self, xtol: f64, offset: f64, max_iter: usize) -> PeakAnalysisResult<Refinement> {
        let opts = ScalarSolverOptions::new(xtol, max_iter, false)?;
        let im_f = |omega: f64| self.evaluate(omega).im;
        let outcome = bounded_minimize(&im_f, self.search_bounds(offset), &opts)?;
        Ok(Refinement { position: outcome.position, success: outcome.success, message: outcome.message })
    }

    /// fit_real_part — OLS of `ln|Re f(position ± e^t)|` on `t`.
    ///
    /// `begin_offset` and `range` are in units of `scale`: `t` runs over
    /// `n_points` equally spaced values in
    /// `[ln(begin_offset·scale), ln((begin_offset + range)·scale)]`; the sign
    /// is `−` when `reversed`. A delta peak `W/(ω − position)` gives slope `−1` and
    /// intercept `ln W`.
    ///
    /// Errors
    /// ------
    /// - [`PeakError::InvalidOption`] for non-positive `range` or
    ///   `begin_offset`; [`PeakError::InvalidPointCount`] below 3 points.
    /// - [`PeakError::Opt`] from the regression, e.g. when `Re f` vanishes at
    ///   a sample.
    pub fn fit_real_part(
        &self, position: f64, range: f64, begin_offset: f64, reversed: bool, n_points: usize,
    ) -> PeakAnalysisResult<RealPartFit> {
        for (name, value) in [("range", range), ("begin_offset", begin_offset)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PeakError::InvalidOption { name, value, reason: "must be finite and > 0" });
            }
        }
        if n_points < 3 {
            return Err(PeakError::InvalidPointCount { n_points });
        }

        let sign = if reversed { -1.0 } else { 1.0 };
        let (begin, end) = (begin_offset * self.scale, (begin_offset + range) * self.scale);
        let t = Array1::linspace(begin.ln(), end.ln(), n_points);
        let y = t.mapv(|ti| self.evaluate(position + sign * ti.exp()).re.abs().ln());
        let fit = linear_fit(&t.to_vec(), &y.to_vec())?;
        Ok(RealPartFit { fit, t, y })
    }
}

impl<F> std::fmt::Debug for Peak<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Peak")
            .field("position", &self.position)
            .field("continuum_edge", &self.continuum_edge)
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Search-window construction near the origin and the continuum edge.
    // - Refinement of a Lorentzian peak.
    // - Slope and intercept of the real-part fit for delta and derivative
    //   peaks.
    // -------------------------------------------------------------------------

    fn lorentzian(weight: f64, center: f64, eta: f64) -> impl Fn(f64) -> Complex64 {
        move |omega| Complex64::new(weight, 0.0) / Complex64::new(omega - center, eta)
    }

    #[test]
    // Purpose
    // -------
    // Verify the window clipping rules.
    //
    // Given
    // -----
    // - A peak at 1 with scale 1 and offset 0.01, edge at 1.005 or 0.996.
    // - A peak at 0.001 with no edge.
    //
    // Expect
    // ------
    // - The window end facing the edge stops short of it; the lower end is
    //   clipped at zero.
    fn search_bounds_respect_edge_and_origin() {
        let near_edge = Peak::new(lorentzian(1.0, 1.0, 1e-3), 1.0, Some(1.005), 1.0).unwrap();
        let (lower, upper) = near_edge.search_bounds(0.01);
        assert_abs_diff_eq!(lower, 0.99, epsilon = 1e-15);
        assert_abs_diff_eq!(upper, 1.005 - 0.01 * 0.005, epsilon = 1e-15);

        let above_edge = Peak::new(lorentzian(1.0, 1.0, 1e-3), 1.0, Some(0.996), 1.0).unwrap();
        let (lower, upper) = above_edge.search_bounds(0.01);
        assert_abs_diff_eq!(lower, 0.996 + 0.01 * 0.004, epsilon = 1e-15);
        assert_abs_diff_eq!(upper, 1.01, epsilon = 1e-15);

        let near_origin = Peak::new(lorentzian(1.0, 0.001, 1e-3), 0.001, None, 1.0).unwrap();
        assert_eq!(near_origin.search_bounds(0.01).0, 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Refine a displaced raw position onto the Lorentzian center.
    //
    // Given
    // -----
    // - f = 1/(ω − 0.5 + 1e-3 i), raw position 0.503, scale 1.
    //
    // Expect
    // ------
    // - Converged refinement within 1e-6 of 0.5.
    fn improved_position_finds_lorentzian_center() {
        // Arrange
        let peak = Peak::new(lorentzian(1.0, 0.5, 1e-3), 0.503, Some(2.0), 1.0).unwrap();

        // Act
        let refinement = peak.improved_position(2e-12, 0.01, 500).unwrap();

        // Assert
        assert!(refinement.success, "{}", refinement.message);
        assert_abs_diff_eq!(refinement.position, 0.5, epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Check the fit of a delta peak on both sides.
    //
    // Given
    // -----
    // - f = 2.5/(ω − 1) on the real axis, default fit window.
    //
    // Expect
    // ------
    // - Slope −1 and intercept ln 2.5 on each side.
    fn delta_peak_fit_has_unit_slope() {
        let peak = Peak::new(|omega: f64| Complex64::new(2.5 / (omega - 1.0), 0.0), 1.0, None, 1.0).unwrap();

        for reversed in [false, true] {
            let sampled = peak.fit_real_part(1.0, 1e-3, 1e-6, reversed, 200).unwrap();

            assert_eq!(sampled.t.len(), 200);
            assert_abs_diff_eq!(sampled.fit.slope, -1.0, epsilon = 1e-6);
            assert_abs_diff_eq!(sampled.fit.intercept, 2.5_f64.ln(), epsilon = 1e-5);
        }
    }

    #[test]
    // Purpose
    // -------
    // The fit window is measured in units of the peak scale.
    //
    // Given
    // -----
    // - f = 2/(ω − 1) with scale 1e-3, begin_offset 1e-6, range 1e-3.
    //
    // Expect
    // ------
    // - t spans [ln 1e-9, ln 1.001e-6]; slope −1 and intercept ln 2.
    fn fit_window_follows_scale() {
        // Arrange
        let peak = Peak::new(|omega: f64| Complex64::new(2.0 / (omega - 1.0), 0.0), 1.0, None, 1e-3).unwrap();

        // Act
        let sampled = peak.fit_real_part(1.0, 1e-3, 1e-6, false, 200).unwrap();

        // Assert
        assert_abs_diff_eq!(sampled.t[0], 1e-9_f64.ln(), epsilon = 1e-12);
        assert_abs_diff_eq!(sampled.t[199], 1.001e-6_f64.ln(), epsilon = 1e-12);
        assert_abs_diff_eq!(sampled.fit.slope, -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(sampled.fit.intercept, 2.0_f64.ln(), epsilon = 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // A derivative-type peak has slope −2.
    //
    // Given
    // -----
    // - f = 1/(ω − 1)².
    //
    // Expect
    // ------
    // - Fitted slope ≈ −2.
    fn derivative_peak_fit_has_slope_two() {
        let peak = Peak::new(|omega: f64| Complex64::new((omega - 1.0).powi(-2), 0.0), 1.0, None, 1.0).unwrap();

        let sampled = peak.fit_real_part(1.0, 1e-3, 1e-6, false, 200).unwrap();

        assert_abs_diff_eq!(sampled.fit.slope, -2.0, epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Reject invalid peak descriptions.
    //
    // Given
    // -----
    // - NaN position, zero scale.
    //
    // Expect
    // ------
    // - InvalidPosition and InvalidScale.
    fn invalid_peak_is_rejected() {
        assert!(matches!(
            Peak::new(lorentzian(1.0, 0.0, 1.0), f64::NAN, None, 1.0),
            Err(PeakError::InvalidPosition { .. })
        ));
        assert!(matches!(
            Peak::new(lorentzian(1.0, 0.0, 1.0), 1.0, None, 0.0),
            Err(PeakError::InvalidScale { .. })
        ));
    }
}
