//! resolvent::fraction — truncated continued-fraction evaluation.
//!
//! Purpose
//! -------
//! Evaluate the resolvent
//!
//! ```text
//! R(w) = B[0] / (ω − A[0] − B[1] / (ω − A[1] − B[2] / ( … )))     ω = w²
//! ```
//!
//! truncated after `depth` levels counted from the end of the coefficient
//! list, optionally closing the last rung with the analytic [`Terminator`].
//!
//! Key behaviors
//! -------------
//! - The innermost rung sits at `k = N − depth`:
//!   `G = ω − A[k] − B[k+1]·T(Re w)` with the terminator, `G = ω − A[k]`
//!   without it. The recursion `G ← ω − A[j] − B[j+1]/G` then runs for
//!   `j = k−1, …, 0`.
//! - `evaluate = B[0]/G`, `denominator = G/B[0]`,
//!   `spectral_density = NORM_FACTOR · Im(evaluate)`,
//!   `real_part = Re(evaluate)`.
//! - Sequence variants map the scalar recursion over the input in parallel
//!   with no shared mutable state.
//!
//! Invariants & assumptions
//! ------------------------
//! - `1 ≤ depth ≤ N − 1`; with the terminator also `N − depth + 1 < len(B)`.
//!   Violations are rejected when the [`Evaluator`] is built.
//! - Division by a vanishing `G` is not an error: the non-finite value is
//!   returned and callers check finiteness.
//!
//! Conventions
//! -----------
//! - The terminator is evaluated at the real part of `w`, so its branch
//!   choice depends only on the position along the real axis.
use std::collections::BTreeMap;
use std::f64::consts::PI;

use ndarray::Array1;
use num_complex::Complex64;
use rayon::prelude::*;

use crate::resolvent::{
    coefficients::RecursionCoefficients,
    errors::{ResolventError, ResolventResult},
    terminator::Terminator,
};

/// Spectral-density normalization `−1/π`.
pub const NORM_FACTOR: f64 = -1.0 / PI;

/// validate_depth — check a truncation depth against a coefficient set.
///
/// Errors
/// ------
/// - [`ResolventError::InvalidDepth`] if `depth ∉ [min, N − 1]`, where
///   `min = 1`, raised to the smallest depth whose terminator coupling
///   `B[N − depth + 1]` exists when `with_terminator` is set.
pub fn validate_depth(
    coeffs: &RecursionCoefficients, depth: usize, with_terminator: bool,
) -> ResolventResult<()> {
    let n = coeffs.len();
    let max = n - 1;
    // Terminator coupling index N − depth + 1 must be < len(B).
    let min = if with_terminator { (n + 2).saturating_sub(coeffs.b().len()).max(1) } else { 1 };
    if depth < min || depth > max {
        return Err(ResolventError::InvalidDepth { depth, min, max });
    }
    Ok(())
}

/// Evaluator — a coefficient set bound to a depth and an optional tail.
///
/// Purpose
/// -------
/// Share one validated `(coefficients, depth, terminator)` triple between all
/// derived quantities so they run the identical recursion.
///
/// Fields
/// ------
/// - `coeffs`: borrowed recursion coefficients.
/// - `depth`: validated truncation depth.
/// - `terminator`: closed-form tail, or `None` for a plainly truncated
///   fraction.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    coeffs: &'a RecursionCoefficients,
    depth: usize,
    terminator: Option<&'a Terminator>,
}

impl<'a> Evaluator<'a> {
    /// Bind coefficients, depth and terminator after validating the depth.
    ///
    /// Errors
    /// ------
    /// - [`ResolventError::InvalidDepth`] (see [`validate_depth`]).
    pub fn new(
        coeffs: &'a RecursionCoefficients, depth: usize, terminator: Option<&'a Terminator>,
    ) -> ResolventResult<Self> {
        validate_depth(coeffs, depth, terminator.is_some())?;
        Ok(Self { coeffs, depth, terminator })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn coefficients(&self) -> &'a RecursionCoefficients {
        self.coeffs
    }

    pub fn with_terminator(&self) -> bool {
        self.terminator.is_some()
    }

    /// Pre-inversion value `G(w)` of the recursion.
    fn recursion(&self, w: Complex64) -> Complex64 {
        let (a, b) = (self.coeffs.a(), self.coeffs.b());
        let omega = w * w;
        let k = self.coeffs.len() - self.depth;

        let mut g = omega - a[k];
        if let Some(terminator) = self.terminator {
            g -= b[k + 1] * terminator.terminate(Complex64::new(w.re, 0.0));
        }
        for j in (0..k).rev() {
            g = omega - a[j] - b[j + 1] / g;
        }
        g
    }

    /// Resolvent `B[0]/G(w)`.
    pub fn evaluate(&self, w: Complex64) -> Complex64 {
        self.coeffs.norm() / self.recursion(w)
    }

    /// Denominator `G(w)/B[0]`; its zeros are the poles of [`Evaluator::evaluate`].
    pub fn denominator(&self, w: Complex64) -> Complex64 {
        self.recursion(w) / self.coeffs.norm()
    }

    /// `−(1/π)·Im R(w)`.
    pub fn spectral_density(&self, w: Complex64) -> f64 {
        NORM_FACTOR * self.evaluate(w).im
    }

    pub fn real_part(&self, w: Complex64) -> f64 {
        self.evaluate(w).re
    }

    pub fn evaluate_many(&self, ws: &[Complex64]) -> Array1<Complex64> {
        self.map_many(ws, |w| self.evaluate(w))
    }

    pub fn denominator_many(&self, ws: &[Complex64]) -> Array1<Complex64> {
        self.map_many(ws, |w| self.denominator(w))
    }

    pub fn spectral_density_many(&self, ws: &[Complex64]) -> Array1<f64> {
        self.map_many(ws, |w| self.spectral_density(w))
    }

    pub fn real_part_many(&self, ws: &[Complex64]) -> Array1<f64> {
        self.map_many(ws, |w| self.real_part(w))
    }

    /// evaluate_varied_depth — the resolvent at `w` for several depths.
    ///
    /// Each depth re-runs the recursion independently with the same
    /// coefficients and terminator choice.
    ///
    /// Errors
    /// ------
    /// - [`ResolventError::InvalidDepth`] for the first invalid depth; no
    ///   partial map is returned.
    pub fn evaluate_varied_depth(
        &self, w: Complex64, depths: &[usize],
    ) -> ResolventResult<BTreeMap<usize, Complex64>> {
        depths
            .iter()
            .map(|&depth| {
                let evaluator = Evaluator::new(self.coeffs, depth, self.terminator)?;
                Ok((depth, evaluator.evaluate(w)))
            })
            .collect()
    }

    /// Sequence form of [`Evaluator::evaluate_varied_depth`].
    pub fn evaluate_varied_depth_many(
        &self, ws: &[Complex64], depths: &[usize],
    ) -> ResolventResult<BTreeMap<usize, Array1<Complex64>>> {
        depths
            .iter()
            .map(|&depth| {
                let evaluator = Evaluator::new(self.coeffs, depth, self.terminator)?;
                Ok((depth, evaluator.evaluate_many(ws)))
            })
            .collect()
    }

    fn map_many<T, F>(&self, ws: &[Complex64], f: F) -> Array1<T>
    where
        T: Send,
        F: Fn(Complex64) -> T + Sync,
    {
        let values: Vec<T> = ws.par_iter().map(|&w| f(w)).collect();
        Array1::from_vec(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::continuum::boundaries::ContinuumBoundaries;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Depth validation with and without the terminator.
    // - Agreement with hand-expanded truncated fractions.
    // - Positivity of the spectral density near the real axis.
    // - The relation between `evaluate` and `denominator`.
    // - Sequence and varied-depth variants.
    // -------------------------------------------------------------------------

    fn flat_coeffs() -> RecursionCoefficients {
        RecursionCoefficients::new(vec![1.0; 5], vec![1.0, 0.25, 0.25, 0.25, 0.25]).unwrap()
    }

    fn unit_band_terminator() -> Terminator {
        Terminator::new(&ContinuumBoundaries::new(0.0, 4.0, false).unwrap())
    }

    #[test]
    // Purpose
    // -------
    // Check the admissible depth range.
    //
    // Given
    // -----
    // - N = 5, len(B) = 5.
    //
    // Expect
    // ------
    // - Without terminator depths 1..=4 are valid; with it 2..=4, because
    //   depth 1 would read B[5].
    fn depth_range_depends_on_terminator() {
        let coeffs = flat_coeffs();

        assert!(validate_depth(&coeffs, 0, false).is_err());
        assert!(validate_depth(&coeffs, 1, false).is_ok());
        assert!(validate_depth(&coeffs, 4, false).is_ok());
        assert!(validate_depth(&coeffs, 5, false).is_err());
        assert!(matches!(
            validate_depth(&coeffs, 1, true),
            Err(ResolventError::InvalidDepth { depth: 1, min: 2, max: 4 })
        ));
        assert!(validate_depth(&coeffs, 2, true).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Compare the plain truncated fraction with its closed form.
    //
    // Given
    // -----
    // - A = [1, 2, 3], B = [2, 0.5, 0.3], depth 1 (innermost rung k = 2),
    //   no terminator, w = 1.3 + 0.2i.
    //
    // Expect
    // ------
    // - R = 2 / (ω − 1 − 0.5 / (ω − 2 − 0.3 / (ω − 3))).
    fn truncated_fraction_matches_closed_form() {
        // Arrange
        let coeffs = RecursionCoefficients::new(vec![1.0, 2.0, 3.0], vec![2.0, 0.5, 0.3]).unwrap();
        let eval = Evaluator::new(&coeffs, 1, None).unwrap();
        let w = Complex64::new(1.3, 0.2);
        let omega = w * w;
        let expected = 2.0 / (omega - 1.0 - 0.5 / (omega - 2.0 - 0.3 / (omega - 3.0)));

        // Act
        let value = eval.evaluate(w);

        // Assert
        assert_relative_eq!(value.re, expected.re, epsilon = 1e-12);
        assert_relative_eq!(value.im, expected.im, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Reproduce the reference scenario with the terminator.
    //
    // Given
    // -----
    // - A = [1; 5], B = [1, 0.25, …], band [0, 4], depth 3, w = 2 + 0.01i.
    //
    // Expect
    // ------
    // - Finite value with Im < 0, hence positive spectral density.
    fn terminated_reference_scenario_has_negative_imaginary_part() {
        // Arrange
        let coeffs = flat_coeffs();
        let term = unit_band_terminator();
        let eval = Evaluator::new(&coeffs, 3, Some(&term)).unwrap();

        // Act
        let value = eval.evaluate(Complex64::new(2.0, 0.01));

        // Assert
        assert!(value.re.is_finite() && value.im.is_finite());
        assert!(value.im < 0.0);
        assert!(eval.spectral_density(Complex64::new(2.0, 0.01)) > 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify physical positivity of the spectral density.
    //
    // Given
    // -----
    // - The flat coefficients, depth 2 with terminator, and depth 4 without;
    //   energies w = x + iε with x ∈ [0.05, 3] and ε = 1e-3, so that
    //   ω = w² lies in the upper half-plane.
    //
    // Expect
    // ------
    // - spectral_density ≥ 0 everywhere.
    fn spectral_density_is_non_negative_above_the_real_axis() {
        let coeffs = flat_coeffs();
        let term = unit_band_terminator();
        let evaluators = [
            Evaluator::new(&coeffs, 2, Some(&term)).unwrap(),
            Evaluator::new(&coeffs, 4, None).unwrap(),
        ];
        let ws: Vec<Complex64> =
            (1..=60).map(|i| Complex64::new(0.05 * i as f64, 1e-3)).collect();

        for eval in evaluators {
            let density = eval.spectral_density_many(&ws);
            assert!(density.iter().all(|d| *d >= 0.0), "negative density: {density:?}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the derived quantities against `evaluate`.
    //
    // Given
    // -----
    // - Depth 2 with terminator; a handful of frequencies.
    //
    // Expect
    // ------
    // - denominator · evaluate = 1, real_part = Re(evaluate), and sequence
    //   outputs equal the scalar ones elementwise.
    fn derived_quantities_share_one_recursion() {
        // Arrange
        let coeffs = flat_coeffs();
        let term = unit_band_terminator();
        let eval = Evaluator::new(&coeffs, 2, Some(&term)).unwrap();
        let ws = [Complex64::new(0.3, 0.02), Complex64::new(1.7, 0.01), Complex64::new(-2.5, 0.1)];

        // Act
        let values = eval.evaluate_many(&ws);
        let denominators = eval.denominator_many(&ws);
        let reals = eval.real_part_many(&ws);

        // Assert
        for (i, w) in ws.iter().enumerate() {
            let product = values[i] * denominators[i];
            assert_relative_eq!(product.re, 1.0, epsilon = 1e-12);
            assert_relative_eq!(product.im, 0.0, epsilon = 1e-12);
            assert_eq!(values[i], eval.evaluate(*w));
            assert_eq!(reals[i], values[i].re);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the varied-depth diagnostic.
    //
    // Given
    // -----
    // - Depths [1, 3] without terminator; an invalid depth list [2, 9].
    //
    // Expect
    // ------
    // - One entry per depth equal to a freshly built evaluator's value;
    //   the invalid list is rejected.
    fn varied_depth_reruns_the_recursion_per_depth() {
        // Arrange
        let coeffs = flat_coeffs();
        let eval = Evaluator::new(&coeffs, 2, None).unwrap();
        let w = Complex64::new(1.1, 0.05);

        // Act
        let varied = eval.evaluate_varied_depth(w, &[1, 3]).unwrap();

        // Assert
        assert_eq!(varied.len(), 2);
        for depth in [1, 3] {
            let expected = Evaluator::new(&coeffs, depth, None).unwrap().evaluate(w);
            assert_eq!(varied[&depth], expected);
        }
        assert!(eval.evaluate_varied_depth(w, &[2, 9]).is_err());
        assert_eq!(eval.evaluate_varied_depth_many(&[w, w], &[1]).unwrap()[&1].len(), 2);
    }
}
