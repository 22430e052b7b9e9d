use argmin::core::{ArgminError, Error};

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for scalar solver and regression operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- ScalarSolverOptions ----
    /// Solver tolerance needs to be positive and finite.
    InvalidTolerance {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// Tolerance bits must lie in `1..=52`.
    InvalidToleranceBits {
        bits: u32,
    },

    // ---- Bracket / bounds ----
    /// Search interval must be finite with `lower < upper`.
    InvalidBounds {
        lower: f64,
        upper: f64,
        reason: &'static str,
    },

    // ---- Cost function ----
    /// Objective returned a non-finite value.
    NonFiniteCost {
        x: f64,
        value: f64,
    },

    // ---- Solver outcome ----
    /// Solver finished without a best position.
    MissingPosition,
    /// Solver produced a non-finite position.
    InvalidPosition {
        value: f64,
    },

    // ---- Regression ----
    /// Regressor and response lengths differ.
    SampleLengthMismatch {
        x_len: usize,
        y_len: usize,
    },
    /// Too few points for a line with error estimates.
    TooFewPoints {
        n: usize,
        min: usize,
    },
    /// Regression samples need to be finite.
    NonFiniteSample {
        index: usize,
        value: f64,
    },
    /// All regressor values coincide; the normal equations are singular.
    DegenerateRegressor,
    /// Wrapper for statrs distribution construction errors.
    Distribution {
        text: String,
    },

    // ---- Argmin ----
    /// Solver rejected its input, e.g. a bracket without a sign change.
    InvalidParameter {
        text: String,
    },
    /// Any other backend failure; `kind` names the argmin error class.
    Backend {
        kind: &'static str,
        text: String,
    },
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- ScalarSolverOptions ----
            OptError::InvalidTolerance { tol, reason } => {
                write!(f, "Invalid solver tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::InvalidToleranceBits { bits } => {
                write!(f, "Invalid tolerance bits {bits}: must lie in 1..=52")
            }

            // ---- Bracket / bounds ----
            OptError::InvalidBounds { lower, upper, reason } => {
                write!(f, "Invalid search interval [{lower}, {upper}]: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { x, value } => {
                write!(f, "Non-finite objective value {value} at x = {x}")
            }

            // ---- Solver outcome ----
            OptError::MissingPosition => {
                write!(f, "Solver finished without a best position")
            }
            OptError::InvalidPosition { value } => {
                write!(f, "Solver produced a non-finite position: {value}")
            }

            // ---- Regression ----
            OptError::SampleLengthMismatch { x_len, y_len } => {
                write!(f, "Regression sample length mismatch: x has {x_len}, y has {y_len}")
            }
            OptError::TooFewPoints { n, min } => {
                write!(f, "Too few regression points: got {n}, need at least {min}")
            }
            OptError::NonFiniteSample { index, value } => {
                write!(f, "Non-finite regression sample at index {index}: {value}")
            }
            OptError::DegenerateRegressor => {
                write!(f, "Degenerate regressor: all x values coincide")
            }
            OptError::Distribution { text } => {
                write!(f, "Distribution error: {text}")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::Backend { kind, text } => {
                write!(f, "Solver backend error ({kind}): {text}")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        // Errors raised by our own adapters round-trip unchanged.
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        let argmin_err = match original_err.downcast::<ArgminError>() {
            Ok(argmin_err) => argmin_err,
            Err(err) => return OptError::Backend { kind: "external", text: err.to_string() },
        };
        let (kind, text) = match argmin_err {
            ArgminError::InvalidParameter { text } => return OptError::InvalidParameter { text },
            ArgminError::NotImplemented { text } => ("not implemented", text),
            ArgminError::NotInitialized { text } => ("not initialized", text),
            ArgminError::ConditionViolated { text } => ("condition violated", text),
            ArgminError::CheckpointNotFound { text } => ("checkpoint not found", text),
            ArgminError::PotentialBug { text } => ("potential bug", text),
            ArgminError::ImpossibleError { text } => ("impossible", text),
            other => ("other", other.to_string()),
        };
        OptError::Backend { kind, text }
    }
}

#[cfg(feature = "python-bindings")]
impl From<OptError> for PyErr {
    fn from(err: OptError) -> PyErr {
        PyValueError::new_err(format!("OptError: {err}"))
    }
}
