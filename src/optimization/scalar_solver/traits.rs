use argmin::core::{TerminationReason, TerminationStatus};

use crate::optimization::{
    errors::OptResult,
    scalar_solver::{
        types::FnEvalMap,
        validation::{validate_position, verify_max_iter, verify_tolerance},
    },
};

/// Scalar solver configuration.
///
/// Fields:
/// - `tolerance: f64` — absolute tolerance on the position.
/// - `max_iter: usize` — hard cap on solver iterations.
/// - `verbose: bool` — if `true`, attaches an observer (behind the `obs_slog`
///   feature) and prints progress.
///
/// Default:
/// - `tolerance`: `2e-12`
/// - `max_iter`: `500`
/// - `verbose`: `false`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarSolverOptions {
    pub tolerance: f64,
    pub max_iter: usize,
    pub verbose: bool,
}

impl ScalarSolverOptions {
    /// Construct validated options.
    ///
    /// # Errors
    /// - [`OptError::InvalidTolerance`](crate::optimization::errors::OptError::InvalidTolerance)
    ///   for non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`](crate::optimization::errors::OptError::InvalidMaxIter)
    ///   if `max_iter == 0`.
    pub fn new(tolerance: f64, max_iter: usize, verbose: bool) -> OptResult<Self> {
        verify_tolerance(tolerance)?;
        verify_max_iter(max_iter)?;
        Ok(Self { tolerance, max_iter, verbose })
    }
}

impl Default for ScalarSolverOptions {
    fn default() -> Self {
        Self { tolerance: 2e-12, max_iter: 500, verbose: false }
    }
}

/// Canonical result of a scalar solve.
///
/// - `position`: best position found (root or minimizer).
/// - `value`: objective at `position` (`|f|` for root finding).
/// - `success`: `true` only if the solver reported convergence; running out
///   of iterations is not success.
/// - `message`: human-readable termination status.
/// - `iterations`: number of solver iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarOutcome {
    pub position: f64,
    pub value: f64,
    pub success: bool,
    pub message: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
}

impl ScalarOutcome {
    /// Build a validated [`ScalarOutcome`] from raw solver state.
    ///
    /// # Errors
    /// - Propagates [`validate_position`] errors.
    pub fn new(
        position: Option<f64>, value: f64, status: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap,
    ) -> OptResult<Self> {
        let position = validate_position(position)?;
        let (success, message) = match &status {
            TerminationStatus::Terminated(TerminationReason::SolverConverged) => {
                (true, "Solver converged".to_string())
            }
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            other => (false, format!("{other:?}")),
        };
        Ok(Self { position, value, success, message, iterations: iterations as usize, fn_evals })
    }
}
