//! peaks::errors — peak refinement and weight-extraction errors.
use crate::optimization::errors::OptError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for peak analysis.
pub type PeakAnalysisResult<T> = Result<T, PeakError>;

#[derive(Debug, Clone, PartialEq)]
pub enum PeakError {
    // ---- Peak description ----
    /// Peak position must be finite.
    InvalidPosition { value: f64 },

    /// Search scale must be finite and strictly positive.
    InvalidScale { value: f64 },

    /// Continuum edge must be finite.
    InvalidContinuumEdge { value: f64 },

    // ---- PeakOptions ----
    /// A numeric option is outside its admissible range.
    InvalidOption { name: &'static str, value: f64, reason: &'static str },

    /// The real-part fit needs at least three sample points.
    InvalidPointCount { n_points: usize },

    // ---- Analysis ----
    /// Position refinement did not converge, even after the retry.
    RefinementFailed { position: f64, message: String },

    /// Minimizer or regression error.
    Opt(OptError),

    // ---- Inverse-variance combination ----
    /// Nothing to combine.
    EmptyCombination,

    /// Values and standard deviations differ in length.
    CombinationLengthMismatch { values: usize, std_devs: usize },

    /// Standard deviations must be finite and strictly positive.
    InvalidStdDev { index: usize, value: f64 },
}

impl std::error::Error for PeakError {}

impl std::fmt::Display for PeakError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeakError::InvalidPosition { value } => {
                write!(f, "Invalid peak position {value}: must be finite")
            }
            PeakError::InvalidScale { value } => {
                write!(f, "Invalid search scale {value}: must be finite and > 0")
            }
            PeakError::InvalidContinuumEdge { value } => {
                write!(f, "Invalid continuum edge {value}: must be finite")
            }
            PeakError::InvalidOption { name, value, reason } => {
                write!(f, "Invalid peak option {name} = {value}: {reason}")
            }
            PeakError::InvalidPointCount { n_points } => {
                write!(f, "Invalid fit point count {n_points}: need at least 3")
            }
            PeakError::RefinementFailed { position, message } => {
                write!(f, "Peak refinement near {position} failed: {message}")
            }
            PeakError::Opt(err) => write!(f, "{err}"),
            PeakError::EmptyCombination => write!(f, "No values to combine"),
            PeakError::CombinationLengthMismatch { values, std_devs } => write!(
                f,
                "Length mismatch: {values} values but {std_devs} standard deviations"
            ),
            PeakError::InvalidStdDev { index, value } => write!(
                f,
                "Invalid standard deviation {value} at index {index}: must be finite and > 0"
            ),
        }
    }
}

impl From<OptError> for PeakError {
    fn from(err: OptError) -> Self {
        PeakError::Opt(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<PeakError> for PyErr {
    fn from(err: PeakError) -> PyErr {
        PyValueError::new_err(format!("PeakError: {err}"))
    }
}
