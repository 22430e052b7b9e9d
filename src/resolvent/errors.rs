//! resolvent::errors — configuration errors of the continued-fraction core.
//!
//! Purpose
//! -------
//! Collect every failure the resolvent layer can raise into one enum,
//! [`ResolventError`], with a [`ResolventResult`] alias. All of these are
//! *configuration errors*: malformed coefficient tables, depths outside the
//! admissible range, degenerate continua or unusable depth-selection
//! windows. Numeric edge cases during evaluation are never errors; a
//! non-finite continued fraction is returned as a non-finite complex value.
//!
//! Conventions
//! -----------
//! - Indices are 0-based.
//! - Messages are phrased in terms of the violated constraint.
//! - [`ContinuumError`] values are wrapped, not flattened, so callers can still
//!   match on the continuum-specific cause.
use crate::continuum::errors::ContinuumError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for resolvent operations.
pub type ResolventResult<T> = Result<T, ResolventError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ResolventError {
    // ---- Continuum ----
    /// Invalid continuum boundaries.
    Continuum(ContinuumError),

    /// The depth selector divides by `|a_inf|` and `|b_inf|`.
    DegenerateAsymptotics { a_inf: f64, b_inf: f64 },

    // ---- Coefficients ----
    /// At least two `A` coefficients are required.
    TooFewCoefficients { len: usize },

    /// `B` must have at least as many entries as `A`.
    CoefficientLengthMismatch { a_len: usize, b_len: usize },

    /// A coefficient is NaN or ±∞.
    NonFiniteCoefficient { series: &'static str, index: usize, value: f64 },

    /// `B[i]` for `i ≥ 1` is a squared coupling and must be non-negative.
    NegativeCoupling { index: usize, value: f64 },

    /// `B[0]` is the normalization and must be strictly positive.
    InvalidNormalization { value: f64 },

    /// No coefficients stored for `(name, index)`.
    UnknownResolvent { name: String, index: usize },

    // ---- Depth ----
    /// Truncation depth outside the admissible range `[min, max]`.
    InvalidDepth { depth: usize, min: usize, max: usize },

    /// Depth selection needs `1 ≤ ignore_first < ignore_last` after clamping.
    InvalidIgnoreWindow { ignore_first: usize, ignore_last: usize },
}

impl std::error::Error for ResolventError {}

impl std::fmt::Display for ResolventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Continuum ----
            ResolventError::Continuum(err) => write!(f, "{err}"),
            ResolventError::DegenerateAsymptotics { a_inf, b_inf } => {
                write!(
                    f,
                    "Degenerate asymptotics a_inf = {a_inf}, b_inf = {b_inf}: both must be nonzero"
                )
            }

            // ---- Coefficients ----
            ResolventError::TooFewCoefficients { len } => {
                write!(f, "Need at least 2 recursion coefficients, got {len}")
            }
            ResolventError::CoefficientLengthMismatch { a_len, b_len } => {
                write!(f, "B has {b_len} entries but A has {a_len}; need len(B) >= len(A)")
            }
            ResolventError::NonFiniteCoefficient { series, index, value } => {
                write!(f, "Coefficient {series}[{index}] = {value} is not finite")
            }
            ResolventError::NegativeCoupling { index, value } => {
                write!(f, "Coupling B[{index}] = {value} must be non-negative")
            }
            ResolventError::InvalidNormalization { value } => {
                write!(f, "Normalization B[0] = {value} must be strictly positive")
            }
            ResolventError::UnknownResolvent { name, index } => {
                write!(f, "No recursion coefficients for resolvent '{name}' at index {index}")
            }

            // ---- Depth ----
            ResolventError::InvalidDepth { depth, min, max } => {
                write!(f, "Invalid termination depth {depth}: must satisfy {min} <= depth <= {max}")
            }
            ResolventError::InvalidIgnoreWindow { ignore_first, ignore_last } => {
                write!(
                    f,
                    "Invalid selection window: need 1 <= ignore_first ({ignore_first}) < ignore_last ({ignore_last})"
                )
            }
        }
    }
}

impl From<ContinuumError> for ResolventError {
    fn from(err: ContinuumError) -> Self {
        ResolventError::Continuum(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<ResolventError> for PyErr {
    fn from(err: ResolventError) -> PyErr {
        PyValueError::new_err(format!("ResolventError: {err}"))
    }
}
