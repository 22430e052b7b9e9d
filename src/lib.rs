//! rust_resolvents — continued-fraction resolvents and spectral analysis with
//! Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the resolvent machinery to Python through the `_rust_resolvents`
//! extension module. Given Lanczos recursion coefficients and the continuum
//! edges of a spectrum, the crate evaluates the terminated continued
//! fraction, its spectral density, the isolated bound states outside the
//! continuum and the weights of sharp peaks.
//!
//! Key behaviors
//! -------------
//! - Re-export the core modules (`continuum`, `resolvent`, `bound_states`,
//!   `peaks`, `optimization`) as the public crate surface.
//! - Define the `ContinuedFraction` `#[pyclass]` and the `#[pymodule]`
//!   initializer for `_rust_resolvents` when `python-bindings` is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input conversion and error mapping.
//! - Configuration errors from the core surface in Python as `ValueError`
//!   with the originating error type as prefix.
//!
//! Conventions
//! -----------
//! - Frequencies are complex; real inputs are promoted. A scalar input gives
//!   a scalar result, a sequence gives a 1-D numpy array.
//! - Continuum edges are given in energy units; with `z_squared` (default)
//!   the recursion variable is their square.
//!
//! Downstream usage
//! ----------------
//! - Rust code should use [`resolvent::ContinuedFraction`] and the free
//!   functions of [`bound_states`] and [`peaks`] directly.
//! - Python code imports `_rust_resolvents.ContinuedFraction`; plotting and
//!   reporting stay on the Python side.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_spectral_pipeline.rs`.

pub mod bound_states;
pub mod continuum;
pub mod optimization;
pub mod peaks;
pub mod resolvent;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::IntoPyArray;

#[cfg(feature = "python-bindings")]
use pyo3::{
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::{
    bound_states::{
        classifier::classify,
        options::{ClassifierOptions, ScanWindow},
    },
    resolvent::{
        fraction::Evaluator,
        options::SolverOptions,
        solver::{ContinuedFraction, ResolventQuery},
    },
    utils::{extract_frequencies, extract_resolvent_table},
};

/// ContinuedFraction — Python-facing resolvent solver.
///
/// Purpose
/// -------
/// Hold a coefficient table and one continuum, and evaluate any stored
/// resolvent from Python.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `ContinuedFraction(coefficients, boundaries, z_squared=True,
/// ignore_first=5, ignore_last=None, report_depth=False)`:
/// - `coefficients`: `dict[str, list[tuple[float, float]]]`
///   `(a_i, b_i)` pairs per resolvent name, or a list of such lists for
///   several instances.
/// - `boundaries`: `(lower, upper)` continuum edges in energy units.
/// - remaining arguments as in [`SolverOptions`].
///
/// Notes
/// -----
/// - Methods taking `depth=None` use the memoized termination depth.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "ContinuedFraction", module = "rust_resolvents")]
pub struct PyContinuedFraction {
    inner: ContinuedFraction,
}

#[cfg(feature = "python-bindings")]
impl PyContinuedFraction {
    fn evaluator(
        &self, name: &str, index: usize, with_terminator: bool, depth: Option<usize>,
    ) -> PyResult<Evaluator<'_>> {
        let query = ResolventQuery { name, index, with_terminator };
        let evaluator = match depth {
            Some(depth) => self.inner.evaluator_at_depth(&query, depth)?,
            None => self.inner.evaluator(&query)?,
        };
        Ok(evaluator)
    }
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyContinuedFraction {
    #[new]
    #[pyo3(
        signature = (coefficients, boundaries, z_squared = true, ignore_first = 5, ignore_last = None, report_depth = false),
        text_signature = "(coefficients, boundaries, /, z_squared=True, ignore_first=5, ignore_last=None, report_depth=False)"
    )]
    pub fn new(
        coefficients: &Bound<'_, PyDict>, boundaries: (f64, f64), z_squared: bool,
        ignore_first: usize, ignore_last: Option<usize>, report_depth: bool,
    ) -> PyResult<Self> {
        let table = extract_resolvent_table(coefficients)?;
        let options = SolverOptions::new(z_squared, ignore_first, ignore_last, report_depth)?;
        let inner = ContinuedFraction::new(table, boundaries.0, boundaries.1, options)?;
        Ok(Self { inner })
    }

    /// Resolvent `R(w)`; scalar in, scalar out.
    #[pyo3(signature = (w, name, index = 0, with_terminator = true, depth = None))]
    pub fn continued_fraction<'py>(
        &self, py: Python<'py>, w: &Bound<'py, PyAny>, name: &str, index: usize,
        with_terminator: bool, depth: Option<usize>,
    ) -> PyResult<PyObject> {
        let evaluator = self.evaluator(name, index, with_terminator, depth)?;
        let (ws, scalar) = extract_frequencies(py, w)?;
        if scalar {
            return Ok(evaluator.evaluate(ws[0]).into_py(py));
        }
        Ok(evaluator.evaluate_many(&ws).into_pyarray_bound(py).into_any().unbind())
    }

    /// Spectral density `−Im R(w)/π`.
    #[pyo3(signature = (w, name, index = 0, with_terminator = true, depth = None))]
    pub fn spectral_density<'py>(
        &self, py: Python<'py>, w: &Bound<'py, PyAny>, name: &str, index: usize,
        with_terminator: bool, depth: Option<usize>,
    ) -> PyResult<PyObject> {
        let evaluator = self.evaluator(name, index, with_terminator, depth)?;
        let (ws, scalar) = extract_frequencies(py, w)?;
        if scalar {
            return Ok(evaluator.spectral_density(ws[0]).into_py(py));
        }
        Ok(evaluator.spectral_density_many(&ws).into_pyarray_bound(py).into_any().unbind())
    }

    /// Denominator `G(w)/B[0]`.
    #[pyo3(signature = (w, name, index = 0, with_terminator = true, depth = None))]
    pub fn denominator<'py>(
        &self, py: Python<'py>, w: &Bound<'py, PyAny>, name: &str, index: usize,
        with_terminator: bool, depth: Option<usize>,
    ) -> PyResult<PyObject> {
        let evaluator = self.evaluator(name, index, with_terminator, depth)?;
        let (ws, scalar) = extract_frequencies(py, w)?;
        if scalar {
            return Ok(evaluator.denominator(ws[0]).into_py(py));
        }
        Ok(evaluator.denominator_many(&ws).into_pyarray_bound(py).into_any().unbind())
    }

    #[pyo3(signature = (name, index = 0))]
    pub fn termination_depth(&self, name: &str, index: usize) -> PyResult<usize> {
        Ok(self.inner.termination_depth(name, index)?)
    }

    pub fn continuum_edges(&self) -> (f64, f64) {
        self.inner.continuum_edges()
    }

    /// Bound states as `(position, weight)` pairs.
    ///
    /// Scans `windows` if given, otherwise windows of width `extent` on both
    /// sides of the continuum.
    #[pyo3(signature = (
        name,
        index = 0,
        with_terminator = true,
        windows = None,
        extent = 1.0,
        scan_count = 1000,
        weight_eps = 1e-6,
        tolerance_bits = 40,
        max_iter = 200,
    ))]
    pub fn bound_states(
        &self, name: &str, index: usize, with_terminator: bool, windows: Option<Vec<(f64, f64)>>,
        extent: f64, scan_count: usize, weight_eps: f64, tolerance_bits: u32, max_iter: usize,
    ) -> PyResult<Vec<(f64, f64)>> {
        let windows = match windows {
            Some(ranges) => ranges
                .into_iter()
                .map(|(lower, upper)| ScanWindow::new(lower, upper))
                .collect::<Result<Vec<_>, _>>()?,
            None => ClassifierOptions::outside_continuum(self.inner.boundaries(), extent)?.windows,
        };
        let opts = ClassifierOptions::new(windows, scan_count, weight_eps, tolerance_bits, max_iter)?;
        let evaluator = self.evaluator(name, index, with_terminator, None)?;
        let states = classify(&evaluator, &opts)?;
        Ok(states.into_iter().map(|s| (s.position, s.weight)).collect())
    }

    pub fn __repr__(&self) -> String {
        let (lower, upper) = self.inner.continuum_edges();
        format!("ContinuedFraction(continuum=({lower}, {upper}))")
    }
}

/// _rust_resolvents — PyO3 module initializer for the Python extension.
///
/// Registers [`PyContinuedFraction`] as `ContinuedFraction` and exposes the
/// spectral-density normalization as `NORM_FACTOR`.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_resolvents<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<PyContinuedFraction>()?;
    m.add("NORM_FACTOR", crate::resolvent::fraction::NORM_FACTOR)?;
    Ok(())
}
