//! resolvent::solver — named-resolvent facade over the continued fraction.
//!
//! Purpose
//! -------
//! Tie a [`CoefficientSource`] to one set of continuum boundaries and serve
//! resolvent queries by `(name, index)`. Owns the terminator and the
//! termination-depth cache so that every query for the same instance is
//! evaluated at the same, lazily selected depth.
//!
//! Key behaviors
//! -------------
//! - Construction validates boundaries and options once; nothing is
//!   mutated afterwards except the depth cache (write-once per key).
//! - [`ContinuedFraction::evaluator`] resolves a [`ResolventQuery`] into an
//!   [`Evaluator`]; every public evaluation method goes through it.
//! - Scalar and sequence methods return identical values per element.
//!
//! Downstream usage
//! ----------------
//! - `bound_states` classifies poles of an [`Evaluator`] obtained here.
//! - The Python bindings wrap a `ContinuedFraction<ResolventTable>`.
use std::collections::BTreeMap;

use ndarray::Array1;
use num_complex::Complex64;

use crate::continuum::boundaries::ContinuumBoundaries;
use crate::resolvent::{
    coefficients::{CoefficientSource, RecursionCoefficients, ResolventTable},
    depth::TerminationDepthSelector,
    errors::{ResolventError, ResolventResult},
    fraction::Evaluator,
    options::SolverOptions,
    terminator::Terminator,
};

/// ResolventQuery — which resolvent to evaluate and how.
///
/// `with_terminator` defaults to `true` through [`ResolventQuery::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolventQuery<'q> {
    pub name: &'q str,
    pub index: usize,
    pub with_terminator: bool,
}

impl<'q> ResolventQuery<'q> {
    pub fn new(name: &'q str, index: usize) -> Self {
        Self { name, index, with_terminator: true }
    }

    /// Same target, plainly truncated fraction.
    pub fn without_terminator(self) -> Self {
        Self { with_terminator: false, ..self }
    }
}

/// ContinuedFraction — resolvent solver for one continuum.
///
/// Fields
/// ------
/// - `source`: read-only coefficient lookup.
/// - `boundaries`: validated continuum edges and asymptotics.
/// - `terminator`: closed-form tail built from `boundaries`.
/// - `depths`: memoized termination depths per `(name, index)`.
#[derive(Debug)]
pub struct ContinuedFraction<S = ResolventTable> {
    source: S,
    boundaries: ContinuumBoundaries,
    terminator: Terminator,
    depths: TerminationDepthSelector,
}

impl<S: CoefficientSource> ContinuedFraction<S> {
    /// Build a solver from a coefficient source and energy-unit edges.
    ///
    /// Parameters
    /// ----------
    /// - `source`: coefficient lookup.
    /// - `lower`, `upper`: continuum edges in energy units; squared when
    ///   `options.z_squared` is set.
    /// - `options`: see [`SolverOptions`].
    ///
    /// Errors
    /// ------
    /// - [`ResolventError::Continuum`] for invalid edges.
    pub fn new(source: S, lower: f64, upper: f64, options: SolverOptions) -> ResolventResult<Self> {
        let boundaries = ContinuumBoundaries::new(lower, upper, options.z_squared)?;
        let terminator = Terminator::new(&boundaries);
        let depths = TerminationDepthSelector::new(
            boundaries.asymptotics(),
            options.ignore_first,
            options.ignore_last,
            options.report_depth,
        );
        Ok(Self { source, boundaries, terminator, depths })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn boundaries(&self) -> &ContinuumBoundaries {
        &self.boundaries
    }

    pub fn terminator(&self) -> &Terminator {
        &self.terminator
    }

    pub fn depth_selector(&self) -> &TerminationDepthSelector {
        &self.depths
    }

    /// Continuum edges in energy units.
    pub fn continuum_edges(&self) -> (f64, f64) {
        self.boundaries.edges()
    }

    /// Coefficients of `(name, index)`.
    ///
    /// Errors
    /// ------
    /// - [`ResolventError::UnknownResolvent`] if the source has no entry.
    pub fn coefficients(&self, name: &str, index: usize) -> ResolventResult<&RecursionCoefficients> {
        self.source
            .coefficients(name, index)
            .ok_or_else(|| ResolventError::UnknownResolvent { name: name.to_owned(), index })
    }

    /// Memoized termination depth of `(name, index)`.
    pub fn termination_depth(&self, name: &str, index: usize) -> ResolventResult<usize> {
        let coeffs = self.coefficients(name, index)?;
        self.depths.depth_for(name, index, coeffs)
    }

    /// Evaluator at the selected termination depth.
    pub fn evaluator(&self, query: &ResolventQuery<'_>) -> ResolventResult<Evaluator<'_>> {
        let depth = self.termination_depth(query.name, query.index)?;
        self.evaluator_at_depth(query, depth)
    }

    /// Evaluator at an explicit depth (bypasses the cache).
    pub fn evaluator_at_depth(
        &self, query: &ResolventQuery<'_>, depth: usize,
    ) -> ResolventResult<Evaluator<'_>> {
        let coeffs = self.coefficients(query.name, query.index)?;
        let terminator = query.with_terminator.then_some(&self.terminator);
        Evaluator::new(coeffs, depth, terminator)
    }

    pub fn continued_fraction(
        &self, w: Complex64, query: &ResolventQuery<'_>,
    ) -> ResolventResult<Complex64> {
        Ok(self.evaluator(query)?.evaluate(w))
    }

    pub fn continued_fraction_many(
        &self, ws: &[Complex64], query: &ResolventQuery<'_>,
    ) -> ResolventResult<Array1<Complex64>> {
        Ok(self.evaluator(query)?.evaluate_many(ws))
    }

    pub fn spectral_density(&self, w: Complex64, query: &ResolventQuery<'_>) -> ResolventResult<f64> {
        Ok(self.evaluator(query)?.spectral_density(w))
    }

    pub fn spectral_density_many(
        &self, ws: &[Complex64], query: &ResolventQuery<'_>,
    ) -> ResolventResult<Array1<f64>> {
        Ok(self.evaluator(query)?.spectral_density_many(ws))
    }

    pub fn real_part(&self, w: Complex64, query: &ResolventQuery<'_>) -> ResolventResult<f64> {
        Ok(self.evaluator(query)?.real_part(w))
    }

    pub fn real_part_many(
        &self, ws: &[Complex64], query: &ResolventQuery<'_>,
    ) -> ResolventResult<Array1<f64>> {
        Ok(self.evaluator(query)?.real_part_many(ws))
    }

    pub fn denominator(&self, w: Complex64, query: &ResolventQuery<'_>) -> ResolventResult<Complex64> {
        Ok(self.evaluator(query)?.denominator(w))
    }

    pub fn denominator_many(
        &self, ws: &[Complex64], query: &ResolventQuery<'_>,
    ) -> ResolventResult<Array1<Complex64>> {
        Ok(self.evaluator(query)?.denominator_many(ws))
    }

    /// Resolvent at `w` for each of `depths`, for convergence checks.
    ///
    /// Does not consult or populate the depth cache.
    pub fn continued_fraction_varied_depth(
        &self, w: Complex64, query: &ResolventQuery<'_>, depths: &[usize],
    ) -> ResolventResult<BTreeMap<usize, Complex64>> {
        let coeffs = self.coefficients(query.name, query.index)?;
        let terminator = query.with_terminator.then_some(&self.terminator);
        depths
            .iter()
            .map(|&depth| Ok((depth, Evaluator::new(coeffs, depth, terminator)?.evaluate(w))))
            .collect()
    }

    /// Sequence form of [`ContinuedFraction::continued_fraction_varied_depth`].
    pub fn continued_fraction_varied_depth_many(
        &self, ws: &[Complex64], query: &ResolventQuery<'_>, depths: &[usize],
    ) -> ResolventResult<BTreeMap<usize, Array1<Complex64>>> {
        let coeffs = self.coefficients(query.name, query.index)?;
        let terminator = query.with_terminator.then_some(&self.terminator);
        depths
            .iter()
            .map(|&depth| Ok((depth, Evaluator::new(coeffs, depth, terminator)?.evaluate_many(ws))))
            .collect()
    }
}
