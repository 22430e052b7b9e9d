//! bound_states::options — scan windows and classifier settings.
use crate::bound_states::errors::{BoundStateError, BoundStateResult};
use crate::continuum::boundaries::ContinuumBoundaries;
use crate::optimization::scalar_solver::validation::{verify_max_iter, verify_tolerance_bits};

/// ScanWindow — real-frequency interval scanned for sign changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanWindow {
    lower: f64,
    upper: f64,
}

impl ScanWindow {
    /// Errors
    /// ------
    /// - [`BoundStateError::InvalidWindow`] unless both ends are finite and
    ///   `lower < upper`.
    pub fn new(lower: f64, upper: f64) -> BoundStateResult<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(BoundStateError::InvalidWindow { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// `count` equally spaced points from `lower` to `upper` inclusive.
    pub fn grid(&self, count: usize) -> Vec<f64> {
        let step = (self.upper - self.lower) / (count - 1) as f64;
        (0..count)
            .map(|i| if i + 1 == count { self.upper } else { self.lower + step * i as f64 })
            .collect()
    }
}

/// Classifier configuration.
///
/// Fields
/// ------
/// - `windows`: real-frequency intervals to scan, normally outside the
///   continuum.
/// - `scan_count`: grid points per window (`≥ 2`).
/// - `weight_eps`: central-difference step for the residue.
/// - `tolerance_bits`: binary precision of each refined root (`1..=52`).
/// - `max_iter`: iteration cap per root refinement.
/// - `verbose`: attach the solver observer (feature `obs_slog`).
///
/// Default
/// -------
/// One window `[0, 1]`, `scan_count = 1000`, `weight_eps = 1e-6`,
/// `tolerance_bits = 40`, `max_iter = 200`, `verbose = false`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOptions {
    pub windows: Vec<ScanWindow>,
    pub scan_count: usize,
    pub weight_eps: f64,
    pub tolerance_bits: u32,
    pub max_iter: usize,
    pub verbose: bool,
}

impl ClassifierOptions {
    /// Construct validated options.
    ///
    /// Errors
    /// ------
    /// - [`BoundStateError::NoWindows`], [`BoundStateError::InvalidScanCount`],
    ///   [`BoundStateError::InvalidWeightEps`].
    /// - [`BoundStateError::Solver`] for invalid tolerance bits or iteration
    ///   cap.
    pub fn new(
        windows: Vec<ScanWindow>, scan_count: usize, weight_eps: f64, tolerance_bits: u32,
        max_iter: usize,
    ) -> BoundStateResult<Self> {
        if windows.is_empty() {
            return Err(BoundStateError::NoWindows);
        }
        if scan_count < 2 {
            return Err(BoundStateError::InvalidScanCount { scan_count });
        }
        if !weight_eps.is_finite() || weight_eps <= 0.0 {
            return Err(BoundStateError::InvalidWeightEps { weight_eps });
        }
        verify_tolerance_bits(tolerance_bits)?;
        verify_max_iter(max_iter)?;
        Ok(Self { windows, scan_count, weight_eps, tolerance_bits, max_iter, verbose: false })
    }

    /// Windows of width `extent` directly below and above the continuum.
    ///
    /// The lower window is clipped at zero energy; it is omitted when the
    /// continuum starts at or below zero. Other settings are defaults.
    ///
    /// Errors
    /// ------
    /// - [`BoundStateError::InvalidExtent`] for a non-finite or non-positive
    ///   `extent`.
    pub fn outside_continuum(
        boundaries: &ContinuumBoundaries, extent: f64,
    ) -> BoundStateResult<Self> {
        if !extent.is_finite() || extent <= 0.0 {
            return Err(BoundStateError::InvalidExtent { extent });
        }
        let (lower, upper) = boundaries.edges();
        let mut windows = Vec::with_capacity(2);
        if lower > 0.0 {
            windows.push(ScanWindow::new((lower - extent).max(0.0), lower)?);
        }
        windows.push(ScanWindow::new(upper, upper + extent)?);
        Ok(Self { windows, ..Self::default() })
    }
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            windows: vec![ScanWindow { lower: 0.0, upper: 1.0 }],
            scan_count: 1000,
            weight_eps: 1e-6,
            tolerance_bits: 40,
            max_iter: 200,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Check grid construction and option validation.
    //
    // Given
    // -----
    // - A window [1, 2] with 5 points; invalid windows and settings.
    //
    // Expect
    // ------
    // - Grid [1, 1.25, 1.5, 1.75, 2]; each invalid input rejected.
    fn grid_and_validation() {
        let window = ScanWindow::new(1.0, 2.0).unwrap();
        assert_eq!(window.grid(5), vec![1.0, 1.25, 1.5, 1.75, 2.0]);

        assert!(ScanWindow::new(2.0, 1.0).is_err());
        assert!(matches!(
            ClassifierOptions::new(vec![], 10, 1e-6, 40, 100),
            Err(BoundStateError::NoWindows)
        ));
        assert!(matches!(
            ClassifierOptions::new(vec![window], 1, 1e-6, 40, 100),
            Err(BoundStateError::InvalidScanCount { scan_count: 1 })
        ));
        assert!(matches!(
            ClassifierOptions::new(vec![window], 10, 0.0, 40, 100),
            Err(BoundStateError::InvalidWeightEps { .. })
        ));
        assert!(matches!(
            ClassifierOptions::new(vec![window], 10, 1e-6, 0, 100),
            Err(BoundStateError::Solver(_))
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify the windows placed around a continuum.
    //
    // Given
    // -----
    // - Continuum [1, 3] with extent 2; continuum [0, 4] with extent 1.
    //
    // Expect
    // ------
    // - [0, 1] and [3, 5]; only [4, 5] when the band starts at zero.
    fn outside_continuum_windows_flank_the_band() {
        let gapped = ContinuumBoundaries::new(1.0, 3.0, true).unwrap();
        let opts = ClassifierOptions::outside_continuum(&gapped, 2.0).unwrap();
        let ends: Vec<(f64, f64)> = opts.windows.iter().map(|w| (w.lower(), w.upper())).collect();
        assert_eq!(ends, vec![(0.0, 1.0), (3.0, 5.0)]);

        let gapless = ContinuumBoundaries::new(0.0, 4.0, false).unwrap();
        let opts = ClassifierOptions::outside_continuum(&gapless, 1.0).unwrap();
        assert_eq!(opts.windows.len(), 1);
        assert_eq!(opts.windows[0].lower(), 4.0);
    }
}
