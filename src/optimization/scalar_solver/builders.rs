//! scalar_solver::builders — Brent solver construction helpers.
//!
//! Purpose
//! -------
//! Hide argmin's Brent constructors behind two small builders that validate
//! the search interval and apply the crate-level tolerance, so callers can
//! request a configured solver without touching argmin types.
//!
//! Conventions
//! -----------
//! - The builders do **not** set `max_iters`; iteration caps are applied by
//!   the runner ([`run_scalar`](crate::optimization::scalar_solver::run::run_scalar)).
//! - Errors are reported via [`OptResult`].
use crate::optimization::{
    errors::OptResult,
    scalar_solver::{
        types::{MinSolver, RootSolver},
        validation::{verify_interval, verify_tolerance},
    },
};

/// build_root_finder — Brent root finder over a bracket.
///
/// Parameters
/// ----------
/// - `bracket`: `(lower, upper)` with a sign change of the objective.
/// - `tol`: absolute tolerance on the root position.
///
/// Errors
/// ------
/// - `OptError::InvalidBounds` / `OptError::InvalidTolerance` from
///   validation. The sign change itself is checked by
///   [`find_root`](crate::optimization::scalar_solver::api::find_root).
pub fn build_root_finder(bracket: (f64, f64), tol: f64) -> OptResult<RootSolver> {
    verify_interval(bracket.0, bracket.1)?;
    verify_tolerance(tol)?;
    Ok(RootSolver::new(bracket.0, bracket.1, tol))
}

/// build_minimizer — Brent bounded minimizer.
///
/// The relative tolerance is `sqrt(ε)`, matching the usual bounded scalar
/// minimizers; `xtol` is the absolute part.
///
/// Errors
/// ------
/// - `OptError::InvalidBounds` / `OptError::InvalidTolerance` from
///   validation.
pub fn build_minimizer(bounds: (f64, f64), xtol: f64) -> OptResult<MinSolver> {
    verify_interval(bounds.0, bounds.1)?;
    verify_tolerance(xtol)?;
    Ok(MinSolver::new(bounds.0, bounds.1).set_tolerance(f64::EPSILON.sqrt(), xtol))
}
