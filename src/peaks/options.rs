//! peaks::options — peak refinement and fit settings.
use crate::peaks::errors::{PeakAnalysisResult, PeakError};

/// Peak analysis configuration.
///
/// Fields
/// ------
/// - `xtol`: absolute position tolerance of the minimizer.
/// - `offset`: half-width of the search window, in units of the peak scale.
/// - `retry_offset_factor`: factor in `(0, 1)` applied to `offset` for the
///   single retry after a failed refinement.
/// - `max_iter`: iteration cap of each minimizer run.
/// - `range`, `begin_offset`: the fit samples `e^t` over
///   `[begin_offset, begin_offset + range]` away from the peak, in units of
///   the peak scale.
/// - `reversed`: sample below the peak (`ω = position − e^t`) instead of
///   above it.
/// - `n_points`: number of fit samples (`≥ 3`).
/// - `improve_position`: refine the position before fitting.
/// - `expected_slope`, `slope_tolerance`: a fitted slope further than
///   `slope_tolerance` from `expected_slope` is reported with `warn!`.
///
/// Default
/// -------
/// `xtol = 2e-12`, `offset = 0.01`, `retry_offset_factor = 0.1`,
/// `max_iter = 500`, `range = 1e-3`, `begin_offset = 1e-10`,
/// `reversed = false`, `n_points = 200`, `improve_position = true`,
/// `expected_slope = -1`, `slope_tolerance = 0.05`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakOptions {
    pub xtol: f64,
    pub offset: f64,
    pub retry_offset_factor: f64,
    pub max_iter: usize,
    pub range: f64,
    pub begin_offset: f64,
    pub reversed: bool,
    pub n_points: usize,
    pub improve_position: bool,
    pub expected_slope: f64,
    pub slope_tolerance: f64,
}

impl PeakOptions {
    /// Validate every numeric field.
    ///
    /// Errors
    /// ------
    /// - [`PeakError::InvalidOption`] for the first offending field.
    /// - [`PeakError::InvalidPointCount`] if `n_points < 3`.
    pub fn validate(&self) -> PeakAnalysisResult<()> {
        positive("xtol", self.xtol)?;
        positive("offset", self.offset)?;
        positive("range", self.range)?;
        positive("begin_offset", self.begin_offset)?;
        if !(self.retry_offset_factor > 0.0 && self.retry_offset_factor < 1.0) {
            return Err(PeakError::InvalidOption {
                name: "retry_offset_factor",
                value: self.retry_offset_factor,
                reason: "must lie in (0, 1)",
            });
        }
        if self.max_iter == 0 {
            return Err(PeakError::InvalidOption {
                name: "max_iter",
                value: 0.0,
                reason: "must be > 0",
            });
        }
        if !self.expected_slope.is_finite() {
            return Err(PeakError::InvalidOption {
                name: "expected_slope",
                value: self.expected_slope,
                reason: "must be finite",
            });
        }
        if !self.slope_tolerance.is_finite() || self.slope_tolerance < 0.0 {
            return Err(PeakError::InvalidOption {
                name: "slope_tolerance",
                value: self.slope_tolerance,
                reason: "must be finite and >= 0",
            });
        }
        if self.n_points < 3 {
            return Err(PeakError::InvalidPointCount { n_points: self.n_points });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> PeakAnalysisResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PeakError::InvalidOption { name, value, reason: "must be finite and > 0" });
    }
    Ok(())
}

impl Default for PeakOptions {
    fn default() -> Self {
        Self {
            xtol: 2e-12,
            offset: 0.01,
            retry_offset_factor: 0.1,
            max_iter: 500,
            range: 1e-3,
            begin_offset: 1e-10,
            reversed: false,
            n_points: 200,
            improve_position: true,
            expected_slope: -1.0,
            slope_tolerance: 0.05,
        }
    }
}
