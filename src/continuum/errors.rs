//! continuum::errors — configuration failures of the continuum model.
//!
//! Every variant here is a *configuration error* in the sense of the crate's
//! error taxonomy: degenerate boundaries or an unusable dispersion grid. They
//! are reported once, at construction time, and never recovered from.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for continuum-model constructors.
pub type ContinuumResult<T> = Result<T, ContinuumError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ContinuumError {
    /// A boundary energy is NaN or ±∞.
    NonFiniteBoundary { value: f64 },

    /// Boundaries must satisfy `lower < upper`.
    DegenerateBoundaries { lower: f64, upper: f64 },

    /// Squaring the boundaries broke the ordering (e.g. a negative lower edge).
    DegenerateSquaredBoundaries { lower: f64, upper: f64 },

    /// Dispersion grid needs at least one point per axis.
    InvalidResolution { resolution: usize },

    /// Dispersion returned a non-finite energy at a grid point.
    NonFiniteDispersion { qx: f64, qy: f64, value: f64 },
}

impl std::error::Error for ContinuumError {}

impl std::fmt::Display for ContinuumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContinuumError::NonFiniteBoundary { value } => {
                write!(f, "Continuum boundary {value} is not finite")
            }
            ContinuumError::DegenerateBoundaries { lower, upper } => {
                write!(f, "Degenerate continuum: lower = {lower} must be < upper = {upper}")
            }
            ContinuumError::DegenerateSquaredBoundaries { lower, upper } => {
                write!(
                    f,
                    "Degenerate squared continuum: lower² = {lower} must be < upper² = {upper}"
                )
            }
            ContinuumError::InvalidResolution { resolution } => {
                write!(f, "Invalid grid resolution {resolution}: must be at least 1")
            }
            ContinuumError::NonFiniteDispersion { qx, qy, value } => {
                write!(f, "Dispersion is not finite at q = ({qx}, {qy}): {value}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ContinuumError> for PyErr {
    fn from(err: ContinuumError) -> PyErr {
        PyValueError::new_err(format!("ContinuumError: {err}"))
    }
}
