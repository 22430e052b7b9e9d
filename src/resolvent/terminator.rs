//! resolvent::terminator — analytic tail of a truncated continued fraction.
//!
//! Purpose
//! -------
//! Replace the infinite tail of the continued fraction beyond the truncation
//! depth by its closed form under the assumption that every remaining
//! coefficient equals its asymptotic limit (`A[i] = a_∞`, `B[i] = b_∞²`).
//! The tail `T` then satisfies the quadratic `b_∞² T² − p T + 1 = 0` with
//! `p = ω − a_∞`, whose roots are `(p ± sqrt(p² − 4 b_∞²)) / (2 b_∞²)`.
//!
//! Key behaviors
//! -------------
//! - Only the real part of the discriminant is square-rooted. On the real
//!   axis this is exact; inside the band `p² − 4b_∞² < 0` and the root is
//!   purely imaginary, which is what produces the continuum's spectral
//!   weight.
//! - Branch selection uses an asymmetric threshold: for `Re(w) > 0` the
//!   lower recursion-space edge, otherwise the upper one. Above the
//!   threshold the `−` root is taken, at or below it the `+` root.
//! - Below the real axis (`Im(ω) < 0`) the value is the Schwarz reflection
//!   `conj(T(conj w))`, so the tail is conjugation-symmetric across the cut.
//!
//! Conventions
//! -----------
//! - `w` is the frequency in energy units; `ω = w²` is the recursion variable.
//! - The branch rule is a pure per-element function; the sequence form maps
//!   it over the input without shared state.
use ndarray::Array1;
use num_complex::Complex64;
use rayon::prelude::*;

use crate::continuum::boundaries::ContinuumBoundaries;

/// Terminator — closed-form continued-fraction tail for one continuum.
///
/// Fields
/// ------
/// - `a_inf`, `b_inf`: asymptotic recursion limits.
/// - `roots`: continuum edges in recursion space (threshold candidates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Terminator {
    a_inf: f64,
    b_inf: f64,
    roots: (f64, f64),
}

impl Terminator {
    pub fn new(boundaries: &ContinuumBoundaries) -> Self {
        let asym = boundaries.asymptotics();
        Self { a_inf: asym.a_inf, b_inf: asym.b_inf, roots: boundaries.roots() }
    }

    /// terminate — tail value at a single frequency.
    ///
    /// Parameters
    /// ----------
    /// - `w`: complex frequency in energy units.
    ///
    /// Returns
    /// -------
    /// The selected root of the tail quadratic. Non-finite inputs yield
    /// non-finite outputs; no error is raised.
    pub fn terminate(&self, w: Complex64) -> Complex64 {
        let omega = w * w;
        if omega.im < 0.0 {
            return self.upper_half(w.conj()).conj();
        }
        self.upper_half(w)
    }

    /// Elementwise [`Terminator::terminate`] over a frequency sequence.
    pub fn terminate_many(&self, ws: &[Complex64]) -> Array1<Complex64> {
        let values: Vec<Complex64> = ws.par_iter().map(|&w| self.terminate(w)).collect();
        Array1::from_vec(values)
    }

    fn upper_half(&self, w: Complex64) -> Complex64 {
        let omega = w * w;
        let p = omega - self.a_inf;
        let b_sq = self.b_inf * self.b_inf;
        let discriminant = (p * p).re - 4.0 * b_sq;
        let root = Complex64::new(discriminant, 0.0).sqrt();

        let threshold = if w.re > 0.0 { self.roots.0 } else { self.roots.1 };
        if omega.re > threshold { (p - root) / (2.0 * b_sq) } else { (p + root) / (2.0 * b_sq) }
    }
}
