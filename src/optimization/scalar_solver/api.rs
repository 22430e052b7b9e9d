//! High-level entry points for one-dimensional root finding and bounded
//! minimization.
use crate::optimization::{
    errors::OptResult,
    scalar_solver::{
        adapter::ScalarAdapter,
        builders::{build_minimizer, build_root_finder},
        run::run_scalar,
        traits::{ScalarOutcome, ScalarSolverOptions},
        types::ReportedIterate,
        validation::{verify_interval, verify_sign_change, verify_tolerance_bits},
    },
};

/// tolerance_from_bits — absolute tolerance for `bits` binary digits.
///
/// The precision is relative to the larger magnitude of the bracket ends,
/// `2^(1 − bits) · max(|lower|, |upper|)`, floored at the smallest positive
/// normal `f64` so a bracket touching zero still has a usable tolerance.
///
/// # Errors
/// - `OptError::InvalidToleranceBits` unless `1 <= bits <= 52`.
/// - `OptError::InvalidBounds` for an invalid bracket.
pub fn tolerance_from_bits(bits: u32, bracket: (f64, f64)) -> OptResult<f64> {
    verify_tolerance_bits(bits)?;
    verify_interval(bracket.0, bracket.1)?;
    let scale = bracket.0.abs().max(bracket.1.abs());
    let relative = 2.0_f64.powi(1 - bits as i32);
    Ok((relative * scale).max(f64::MIN_POSITIVE))
}

/// Find a root of `f` inside `bracket` with Brent's method.
///
/// # Behavior
/// - Builds a `BrentRoot` solver with `opts.tolerance` and runs it for at
///   most `opts.max_iter` iterations.
/// - A run that stops at the iteration cap returns `Ok` with
///   `success == false`; callers decide whether to keep the estimate.
/// - The reported position is the last iterate, which stays inside the
///   shrinking sign-change bracket. Near a pole of `f` it therefore sits at
///   the pole with a large `value`.
///
/// # Errors
/// - Configuration errors from the builder.
/// - `OptError::InvalidParameter` if `f` has the same sign at both ends.
/// - `OptError::NonFiniteCost` if `f` is non-finite at an evaluated point.
///
/// # Example
/// ```
/// use rust_resolvents::optimization::scalar_solver::{ScalarSolverOptions, find_root};
///
/// let f = |x: f64| x * x - 2.0;
/// let out = find_root(&f, (0.0, 2.0), &ScalarSolverOptions::default())?;
/// assert!(out.success);
/// assert!((out.position - 2.0_f64.sqrt()).abs() < 1e-10);
/// # Ok::<(), rust_resolvents::optimization::errors::OptError>(())
/// ```
pub fn find_root<F>(f: &F, bracket: (f64, f64), opts: &ScalarSolverOptions) -> OptResult<ScalarOutcome>
where
    F: Fn(f64) -> f64,
{
    let solver = build_root_finder(bracket, opts.tolerance)?;
    verify_sign_change(f, bracket.0, bracket.1)?;
    run_scalar(ScalarAdapter::new(f), solver, opts, ReportedIterate::Last)
}

/// Minimize `f` over `bounds` with Brent's bounded method.
///
/// # Behavior
/// - `opts.tolerance` is the absolute position tolerance (`xtol`).
/// - The returned outcome carries `{position, success, message}`; a run
///   that hits the iteration cap is reported with `success == false`
///   rather than as an error.
///
/// # Errors
/// - Configuration errors from the builder.
/// - `OptError::NonFiniteCost` if `f` is non-finite at an evaluated point.
pub fn bounded_minimize<F>(
    f: &F, bounds: (f64, f64), opts: &ScalarSolverOptions,
) -> OptResult<ScalarOutcome>
where
    F: Fn(f64) -> f64,
{
    let solver = build_minimizer(bounds, opts.tolerance)?;
    run_scalar(ScalarAdapter::new(f), solver, opts, ReportedIterate::Best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use approx::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Root finding on brackets with a known root.
    // - Bounded minimization of smooth unimodal functions.
    // - Error and non-success reporting.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify Brent root finding on a cubic.
    //
    // Given
    // -----
    // - f(x) = x³ − x − 2 on [1, 2] (root ≈ 1.5213797068).
    //
    // Expect
    // ------
    // - Converged outcome within 1e-10 of the root.
    fn find_root_recovers_cubic_root() {
        // Arrange
        let f = |x: f64| x * x * x - x - 2.0;
        let opts = ScalarSolverOptions::new(1e-12, 100, false).unwrap();

        // Act
        let out = find_root(&f, (1.0, 2.0), &opts).unwrap();

        // Assert
        assert!(out.success, "{}", out.message);
        assert_abs_diff_eq!(out.position, 1.521_379_706_804_567_6, epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Check that a bracket without a sign change is an error.
    //
    // Given
    // -----
    // - f(x) = x² + 1 on [−1, 1].
    //
    // Expect
    // ------
    // - `OptError::InvalidParameter` from the backend.
    fn find_root_rejects_bracket_without_sign_change() {
        let f = |x: f64| x * x + 1.0;
        let err = find_root(&f, (-1.0, 1.0), &ScalarSolverOptions::default()).unwrap_err();
        assert!(matches!(err, OptError::InvalidParameter { .. }), "got {err}");
    }

    #[test]
    // Purpose
    // -------
    // A bracket around a pole reports the last iterate at the pole, not the
    // bracket end with the smallest |f|.
    //
    // Given
    // -----
    // - f(x) = 1/(x − 1) on [0.9, 1.2]; the sign change is the pole at 1.
    //
    // Expect
    // ------
    // - Position strictly inside the bracket, near 1, with a large value.
    fn find_root_on_pole_reports_last_iterate() {
        let f = |x: f64| 1.0 / (x - 1.0);
        let opts = ScalarSolverOptions::new(1e-10, 200, false).unwrap();

        let out = find_root(&f, (0.9, 1.2), &opts).unwrap();

        assert!(out.position > 0.9 && out.position < 1.2);
        assert_abs_diff_eq!(out.position, 1.0, epsilon = 1e-6);
        assert!(out.value > 1e5, "{}", out.value);
    }

    #[test]
    // Purpose
    // -------
    // Verify bounded minimization of a parabola with an interior minimum.
    //
    // Given
    // -----
    // - f(x) = (x − 0.3)² on [0, 1], xtol = 1e-10.
    //
    // Expect
    // ------
    // - success with position within 1e-6 of 0.3.
    fn bounded_minimize_finds_interior_minimum() {
        // Arrange
        let f = |x: f64| (x - 0.3) * (x - 0.3);
        let opts = ScalarSolverOptions::new(1e-10, 200, false).unwrap();

        // Act
        let out = bounded_minimize(&f, (0.0, 1.0), &opts).unwrap();

        // Assert
        assert!(out.success, "{}", out.message);
        assert_abs_diff_eq!(out.position, 0.3, epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Ensure hitting the iteration cap is reported as non-success, not as an
    // error.
    //
    // Given
    // -----
    // - The same parabola with max_iter = 1.
    //
    // Expect
    // ------
    // - `Ok` outcome with `success == false` and a finite position.
    fn iteration_cap_is_not_success() {
        let f = |x: f64| (x - 0.3) * (x - 0.3);
        let opts = ScalarSolverOptions::new(1e-14, 1, false).unwrap();

        let out = bounded_minimize(&f, (0.0, 1.0), &opts).unwrap();

        assert!(!out.success);
        assert!(out.position.is_finite());
    }

    #[test]
    // Purpose
    // -------
    // Check the bits-to-tolerance mapping.
    //
    // Given
    // -----
    // - 20 bits over [−4, 2]; 0 bits.
    //
    // Expect
    // ------
    // - 2^(−19) · 4; `InvalidToleranceBits`.
    fn tolerance_from_bits_scales_with_bracket() {
        assert_eq!(tolerance_from_bits(20, (-4.0, 2.0)).unwrap(), 4.0 * 2.0_f64.powi(-19));
        assert!(matches!(
            tolerance_from_bits(0, (0.0, 1.0)),
            Err(OptError::InvalidToleranceBits { bits: 0 })
        ));
    }
}
