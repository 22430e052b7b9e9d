//! bound_states::errors — configuration errors of the bound-state scan.
//!
//! Only configuration problems are errors here. Brackets that fail to
//! converge, turn out to be poles, or yield a non-finite residue are
//! dropped with a diagnostic and never surface as [`BoundStateError`].
use crate::optimization::errors::OptError;
use crate::resolvent::errors::ResolventError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for bound-state classification.
pub type BoundStateResult<T> = Result<T, BoundStateError>;

#[derive(Debug, Clone, PartialEq)]
pub enum BoundStateError {
    // ---- Options ----
    /// A scan window must be finite with `lower < upper`.
    InvalidWindow { lower: f64, upper: f64 },

    /// At least one scan window is required.
    NoWindows,

    /// At least two scan points per window are required.
    InvalidScanCount { scan_count: usize },

    /// The residue step must be finite and strictly positive.
    InvalidWeightEps { weight_eps: f64 },

    /// The window extent beyond the continuum must be finite and positive.
    InvalidExtent { extent: f64 },

    // ---- Wrapped ----
    /// Invalid solver settings (tolerance bits, iteration cap).
    Solver(OptError),

    /// Unknown resolvent or invalid depth.
    Resolvent(ResolventError),
}

impl std::error::Error for BoundStateError {}

impl std::fmt::Display for BoundStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundStateError::InvalidWindow { lower, upper } => {
                write!(f, "Invalid scan window [{lower}, {upper}]: need finite lower < upper")
            }
            BoundStateError::NoWindows => write!(f, "No scan windows given"),
            BoundStateError::InvalidScanCount { scan_count } => {
                write!(f, "Invalid scan count {scan_count}: need at least 2 points per window")
            }
            BoundStateError::InvalidWeightEps { weight_eps } => {
                write!(f, "Invalid residue step {weight_eps}: must be finite and > 0")
            }
            BoundStateError::InvalidExtent { extent } => {
                write!(f, "Invalid window extent {extent}: must be finite and > 0")
            }
            BoundStateError::Solver(err) => write!(f, "{err}"),
            BoundStateError::Resolvent(err) => write!(f, "{err}"),
        }
    }
}

impl From<OptError> for BoundStateError {
    fn from(err: OptError) -> Self {
        BoundStateError::Solver(err)
    }
}

impl From<ResolventError> for BoundStateError {
    fn from(err: ResolventError) -> Self {
        BoundStateError::Resolvent(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<BoundStateError> for PyErr {
    fn from(err: BoundStateError) -> PyErr {
        PyValueError::new_err(format!("BoundStateError: {err}"))
    }
}
