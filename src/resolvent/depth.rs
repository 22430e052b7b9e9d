//! resolvent::depth — termination-depth selection and its per-key cache.
//!
//! Purpose
//! -------
//! Decide, per resolvent instance, how many recursion levels to evaluate
//! explicitly before handing over to the terminator. The chosen level is the
//! one where the finite coefficients sit closest to their asymptotic limits.
//!
//! Key behaviors
//! -------------
//! - [`deviations`] computes
//!   `dev[i] = |A[i] − a_∞|/|a_∞| + |sqrt(B[i+1]) − b_∞|/|b_∞|` for
//!   `i ∈ [0, ignore_last)`.
//! - [`select_termination_index`] takes the first minimum of `dev` over
//!   `[ignore_first, ignore_last)`; the depth is `len(A) − index`.
//! - [`TerminationDepthSelector`] memoizes depths per `(name, index)` for the
//!   lifetime of the owning solver. Computation happens under the cache lock,
//!   so concurrent first queries for the same key compute exactly once.
//!
//! Invariants & assumptions
//! ------------------------
//! - `1 ≤ ignore_first < ignore_last ≤ len(A) − 1` after clamping, so the
//!   selected depth always lies in `[2, len(A) − 1]`.
//! - Cached depths are never invalidated.
use std::collections::HashMap;
use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

use tracing::debug;

use crate::continuum::boundaries::Asymptotics;
use crate::resolvent::{
    coefficients::RecursionCoefficients,
    errors::{ResolventError, ResolventResult},
};

/// deviations — distance of each recursion level from the asymptotic limits.
///
/// `ignore_last` is clamped to `len(A) − 1`. Non-finite values appear only
/// for degenerate asymptotics, which [`select_termination_index`] rejects.
pub fn deviations(
    coeffs: &RecursionCoefficients, asymptotics: Asymptotics, ignore_last: Option<usize>,
) -> Vec<f64> {
    let Asymptotics { a_inf, b_inf } = asymptotics;
    let last = clamp_ignore_last(coeffs, ignore_last);
    let (a, b) = (coeffs.a(), coeffs.b());
    (0..last)
        .map(|i| {
            ((a[i] - a_inf) / a_inf).abs() + ((b[i + 1].sqrt() - b_inf) / b_inf).abs()
        })
        .collect()
}

/// select_termination_index — level at which the recursion is terminated.
///
/// Parameters
/// ----------
/// - `coeffs`: validated recursion coefficients.
/// - `asymptotics`: limits derived from the continuum boundaries.
/// - `ignore_first`: leading levels excluded from the search (`≥ 1`).
/// - `ignore_last`: exclusive end of the search window, clamped to
///   `len(A) − 1`; `None` means no explicit limit.
///
/// Returns
/// -------
/// The first index minimizing [`deviations`] over the window.
///
/// Errors
/// ------
/// - [`ResolventError::DegenerateAsymptotics`] if `a_∞ == 0` or `b_∞ == 0`.
/// - [`ResolventError::InvalidIgnoreWindow`] if the clamped window is empty
///   or `ignore_first == 0`.
pub fn select_termination_index(
    coeffs: &RecursionCoefficients, asymptotics: Asymptotics, ignore_first: usize,
    ignore_last: Option<usize>,
) -> ResolventResult<usize> {
    if asymptotics.a_inf == 0.0 || asymptotics.b_inf == 0.0 {
        return Err(ResolventError::DegenerateAsymptotics {
            a_inf: asymptotics.a_inf,
            b_inf: asymptotics.b_inf,
        });
    }
    if coeffs.len() < 2 {
        return Err(ResolventError::TooFewCoefficients { len: coeffs.len() });
    }
    let last = clamp_ignore_last(coeffs, ignore_last);
    if ignore_first == 0 || ignore_first >= last {
        return Err(ResolventError::InvalidIgnoreWindow { ignore_first, ignore_last: last });
    }

    let dev = deviations(coeffs, asymptotics, Some(last));
    let offset = dev[ignore_first..]
        .iter()
        .enumerate()
        .min_by(|(_, x), (_, y)| x.total_cmp(y))
        .map(|(i, _)| i)
        .unwrap_or(0);
    Ok(ignore_first + offset)
}

fn clamp_ignore_last(coeffs: &RecursionCoefficients, ignore_last: Option<usize>) -> usize {
    let max = coeffs.len().saturating_sub(1);
    ignore_last.map_or(max, |last| last.min(max))
}

/// TerminationDepthSelector — memoized `depth_for(name, index)`.
///
/// Fields
/// ------
/// - `asymptotics`: limits shared by every resolvent of one solver.
/// - `ignore_first`, `ignore_last`: selection window.
/// - `report`: emit the chosen index as a `debug!` event.
/// - `depths`: cache keyed by `(name, index)`; an absent key means
///   "not yet computed".
/// - `selections`: number of depth computations performed, for diagnostics.
#[derive(Debug)]
pub struct TerminationDepthSelector {
    asymptotics: Asymptotics,
    ignore_first: usize,
    ignore_last: Option<usize>,
    report: bool,
    depths: Mutex<HashMap<(String, usize), usize>>,
    selections: AtomicUsize,
}

impl TerminationDepthSelector {
    pub fn new(
        asymptotics: Asymptotics, ignore_first: usize, ignore_last: Option<usize>, report: bool,
    ) -> Self {
        Self {
            asymptotics,
            ignore_first,
            ignore_last,
            report,
            depths: Mutex::new(HashMap::new()),
            selections: AtomicUsize::new(0),
        }
    }

    /// depth_for — cached termination depth of `(name, index)`.
    ///
    /// On first query the depth is computed from `coeffs` and stored; later
    /// queries return the stored value without touching `coeffs`.
    ///
    /// Errors
    /// ------
    /// Propagates [`select_termination_index`] errors. Failed selections are
    /// not cached.
    pub fn depth_for(
        &self, name: &str, index: usize, coeffs: &RecursionCoefficients,
    ) -> ResolventResult<usize> {
        let mut depths = self.depths.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(&depth) = depths.get(&(name.to_owned(), index)) {
            return Ok(depth);
        }

        let best = select_termination_index(
            coeffs,
            self.asymptotics,
            self.ignore_first,
            self.ignore_last,
        )?;
        let depth = coeffs.len() - best;
        self.selections.fetch_add(1, Ordering::Relaxed);
        if self.report {
            debug!(resolvent = name, index, termination_index = best, depth, "Terminating at i = {best}");
        }
        depths.insert((name.to_owned(), index), depth);
        Ok(depth)
    }

    /// Cached depth of `(name, index)`, if already selected.
    pub fn cached(&self, name: &str, index: usize) -> Option<usize> {
        let depths = self.depths.lock().unwrap_or_else(PoisonError::into_inner);
        depths.get(&(name.to_owned(), index)).copied()
    }

    /// Number of depth computations performed so far.
    pub fn selections(&self) -> usize {
        self.selections.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The deviation measure and the windowed argmin.
    // - Clamping of `ignore_last` and window validation.
    // - Memoization of `depth_for` (idempotence, one computation per key).
    // -------------------------------------------------------------------------

    fn asym() -> Asymptotics {
        Asymptotics { a_inf: 2.0, b_inf: 1.0 }
    }

    // A[i] → 2 and B[i] → 1 exactly at level 4, drifting away elsewhere.
    fn converging_coeffs() -> RecursionCoefficients {
        let a = vec![5.0, 3.0, 2.5, 2.2, 2.0, 2.3, 2.6, 3.0];
        let b = vec![1.0, 0.2, 0.5, 0.8, 0.9, 1.0, 1.4, 2.0];
        RecursionCoefficients::new(a, b).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Check the deviation formula on a hand-computable level.
    //
    // Given
    // -----
    // - a_inf = 2, b_inf = 1, A[4] = 2, B[5] = 1.
    //
    // Expect
    // ------
    // - dev[4] = 0 and dev has len(A) − 1 entries by default.
    fn deviation_vanishes_where_coefficients_hit_their_limits() {
        // Arrange
        let coeffs = converging_coeffs();

        // Act
        let dev = deviations(&coeffs, asym(), None);

        // Assert
        assert_eq!(dev.len(), 7);
        assert_eq!(dev[4], 0.0);
        assert!(dev.iter().all(|d| *d >= 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Verify the windowed argmin and the resulting depth.
    //
    // Given
    // -----
    // - The converging coefficients with ignore_first = 1; and again with a
    //   window [5, 7) that excludes the exact match.
    //
    // Expect
    // ------
    // - Index 4 (depth 4) for the full window; index 5 for the later window.
    fn argmin_respects_the_selection_window() {
        let coeffs = converging_coeffs();

        assert_eq!(select_termination_index(&coeffs, asym(), 1, None).unwrap(), 4);
        assert_eq!(select_termination_index(&coeffs, asym(), 5, Some(100)).unwrap(), 5);
    }

    #[test]
    // Purpose
    // -------
    // Ensure invalid windows and degenerate limits are configuration errors.
    //
    // Given
    // -----
    // - ignore_first = 0, ignore_first ≥ clamped ignore_last, a_inf = 0.
    //
    // Expect
    // ------
    // - InvalidIgnoreWindow twice, DegenerateAsymptotics once.
    fn invalid_windows_are_rejected() {
        let coeffs = converging_coeffs();

        assert!(matches!(
            select_termination_index(&coeffs, asym(), 0, None),
            Err(ResolventError::InvalidIgnoreWindow { .. })
        ));
        assert!(matches!(
            select_termination_index(&coeffs, asym(), 7, None),
            Err(ResolventError::InvalidIgnoreWindow { ignore_first: 7, ignore_last: 7 })
        ));
        assert!(matches!(
            select_termination_index(&coeffs, Asymptotics { a_inf: 0.0, b_inf: 1.0 }, 1, None),
            Err(ResolventError::DegenerateAsymptotics { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify memoization: repeated queries return the cached depth without
    // recomputation, and distinct keys are computed separately.
    //
    // Given
    // -----
    // - A selector queried twice for ("phase", 0) and once for ("phase", 1).
    //
    // Expect
    // ------
    // - Identical depths for the repeated key; exactly two selections.
    fn depth_for_is_idempotent_per_key() {
        // Arrange
        let coeffs = converging_coeffs();
        let selector = TerminationDepthSelector::new(asym(), 1, None, false);

        // Act
        let first = selector.depth_for("phase", 0, &coeffs).unwrap();
        let second = selector.depth_for("phase", 0, &coeffs).unwrap();
        let other = selector.depth_for("phase", 1, &coeffs).unwrap();

        // Assert
        assert_eq!(first, 4);
        assert_eq!(first, second);
        assert_eq!(other, 4);
        assert_eq!(selector.selections(), 2);
        assert_eq!(selector.cached("phase", 0), Some(4));
        assert_eq!(selector.cached("higgs", 0), None);
    }
}
