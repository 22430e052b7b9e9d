//! resolvent::coefficients — recursion coefficients and their source.
//!
//! Purpose
//! -------
//! Own the Lanczos recursion coefficients `(A, B)` of a resolvent and expose
//! them through a read-only lookup keyed by `(name, index)`.
//!
//! Key behaviors
//! -------------
//! - [`RecursionCoefficients::new`] validates a coefficient pair once, so the
//!   evaluator can index without further checks.
//! - [`CoefficientSource`] is the seam to whatever produced the coefficients;
//!   the core needs only `len` and indexed access.
//! - [`ResolventTable`] is the in-memory source: an ordered map from
//!   resolvent name to its instances.
//!
//! Invariants & assumptions
//! ------------------------
//! - `len(A) ≥ 2`, `len(B) ≥ len(A)` (a Lanczos run may emit one trailing
//!   `B` that is never read), all entries finite.
//! - `B[0] > 0` is the overall normalization; `B[i] ≥ 0` for `i ≥ 1` are
//!   squared couplings.
//! - Coefficients are never mutated after construction.
use std::collections::BTreeMap;

use crate::resolvent::errors::{ResolventError, ResolventResult};

/// RecursionCoefficients — validated `(A, B)` pair of one resolvent.
///
/// `N = len(A)` is the recursion length used throughout the crate; entries of
/// `B` beyond `N − 1` are carried but never read.
#[derive(Debug, Clone, PartialEq)]
pub struct RecursionCoefficients {
    a: Vec<f64>,
    b: Vec<f64>,
}

impl RecursionCoefficients {
    /// Validate and wrap a coefficient pair.
    ///
    /// Errors
    /// ------
    /// - [`ResolventError::TooFewCoefficients`] if `len(A) < 2`.
    /// - [`ResolventError::CoefficientLengthMismatch`] if `len(B) < len(A)`.
    /// - [`ResolventError::NonFiniteCoefficient`] for the first NaN/±∞ entry.
    /// - [`ResolventError::InvalidNormalization`] if `B[0] <= 0`.
    /// - [`ResolventError::NegativeCoupling`] if some `B[i] < 0`, `i ≥ 1`.
    pub fn new(a: Vec<f64>, b: Vec<f64>) -> ResolventResult<Self> {
        if a.len() < 2 {
            return Err(ResolventError::TooFewCoefficients { len: a.len() });
        }
        if b.len() < a.len() {
            return Err(ResolventError::CoefficientLengthMismatch {
                a_len: a.len(),
                b_len: b.len(),
            });
        }
        for (series, values) in [("A", &a), ("B", &b)] {
            if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite())
            {
                return Err(ResolventError::NonFiniteCoefficient { series, index, value });
            }
        }
        if b[0] <= 0.0 {
            return Err(ResolventError::InvalidNormalization { value: b[0] });
        }
        if let Some((index, &value)) = b.iter().enumerate().skip(1).find(|(_, v)| **v < 0.0) {
            return Err(ResolventError::NegativeCoupling { index, value });
        }
        Ok(Self { a, b })
    }

    /// Recursion length `N = len(A)`.
    pub fn len(&self) -> usize {
        self.a.len()
    }

    /// Always `false`; construction rejects fewer than two coefficients.
    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    pub fn a(&self) -> &[f64] {
        &self.a
    }

    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Overall normalization `B[0]`.
    pub fn norm(&self) -> f64 {
        self.b[0]
    }
}

/// Read-only lookup of recursion coefficients by `(name, index)`.
pub trait CoefficientSource: Sync {
    /// Coefficients of instance `index` of resolvent `name`, if present.
    fn coefficients(&self, name: &str, index: usize) -> Option<&RecursionCoefficients>;

    /// Number of instances stored under `name` (0 if unknown).
    fn instances(&self, name: &str) -> usize;
}

/// ResolventTable — in-memory [`CoefficientSource`].
///
/// Each resolvent name maps to an ordered list of instances, one per
/// starting state / momentum index of the external Lanczos run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolventTable {
    resolvents: BTreeMap<String, Vec<RecursionCoefficients>>,
}

impl ResolventTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instance under `name`; returns its index.
    pub fn push(&mut self, name: impl Into<String>, coefficients: RecursionCoefficients) -> usize {
        let instances = self.resolvents.entry(name.into()).or_default();
        instances.push(coefficients);
        instances.len() - 1
    }

    /// Validate raw `(A, B)` vectors and append them under `name`.
    pub fn push_raw(
        &mut self, name: impl Into<String>, a: Vec<f64>, b: Vec<f64>,
    ) -> ResolventResult<usize> {
        let coefficients = RecursionCoefficients::new(a, b)?;
        Ok(self.push(name, coefficients))
    }

    /// Names of all stored resolvents, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.resolvents.keys().map(String::as_str)
    }
}

impl CoefficientSource for ResolventTable {
    fn coefficients(&self, name: &str, index: usize) -> Option<&RecursionCoefficients> {
        self.resolvents.get(name).and_then(|instances| instances.get(index))
    }

    fn instances(&self, name: &str) -> usize {
        self.resolvents.get(name).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Every validation branch of `RecursionCoefficients::new`.
    // - Insertion and lookup through `ResolventTable`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Exercise all rejection branches of the constructor.
    //
    // Given
    // -----
    // - Too short A, short B, a NaN, a zero norm and a negative coupling.
    //
    // Expect
    // ------
    // - The matching error variant for each input.
    fn constructor_rejects_malformed_coefficients() {
        assert!(matches!(
            RecursionCoefficients::new(vec![1.0], vec![1.0]),
            Err(ResolventError::TooFewCoefficients { len: 1 })
        ));
        assert!(matches!(
            RecursionCoefficients::new(vec![1.0, 1.0, 1.0], vec![1.0, 1.0]),
            Err(ResolventError::CoefficientLengthMismatch { a_len: 3, b_len: 2 })
        ));
        assert!(matches!(
            RecursionCoefficients::new(vec![1.0, f64::NAN], vec![1.0, 1.0]),
            Err(ResolventError::NonFiniteCoefficient { series: "A", index: 1, .. })
        ));
        assert!(matches!(
            RecursionCoefficients::new(vec![1.0, 1.0], vec![0.0, 1.0]),
            Err(ResolventError::InvalidNormalization { .. })
        ));
        assert!(matches!(
            RecursionCoefficients::new(vec![1.0, 1.0], vec![1.0, -0.5]),
            Err(ResolventError::NegativeCoupling { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Check that a Lanczos-style pair with one trailing B is accepted and
    // that the recursion length is taken from A.
    //
    // Given
    // -----
    // - len(A) = 3, len(B) = 4.
    //
    // Expect
    // ------
    // - len() = 3, norm() = B[0].
    fn trailing_b_entry_is_accepted() {
        // Arrange / Act
        let coeffs =
            RecursionCoefficients::new(vec![1.0, 2.0, 3.0], vec![0.5, 0.1, 0.2, 0.3]).unwrap();

        // Assert
        assert_eq!(coeffs.len(), 3);
        assert_eq!(coeffs.norm(), 0.5);
    }

    #[test]
    // Purpose
    // -------
    // Verify table insertion order and lookup by `(name, index)`.
    //
    // Given
    // -----
    // - Two instances under "phase" and one under "higgs".
    //
    // Expect
    // ------
    // - Indices 0 and 1 for "phase", lookups hit, unknown keys miss.
    fn table_stores_instances_per_name() {
        // Arrange
        let mut table = ResolventTable::new();

        // Act
        let i0 = table.push_raw("phase", vec![1.0, 1.0], vec![1.0, 0.5]).unwrap();
        let i1 = table.push_raw("phase", vec![2.0, 2.0], vec![1.0, 0.5]).unwrap();
        table.push_raw("higgs", vec![3.0, 3.0], vec![1.0, 0.5]).unwrap();

        // Assert
        assert_eq!((i0, i1), (0, 1));
        assert_eq!(table.instances("phase"), 2);
        assert_eq!(table.coefficients("phase", 1).map(|c| c.a()[0]), Some(2.0));
        assert!(table.coefficients("phase", 2).is_none());
        assert!(table.coefficients("amplitude", 0).is_none());
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["higgs", "phase"]);
    }
}
