//! scalar_solver::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the argmin generics used by the one-dimensional root finder
//! and minimizer so the rest of the crate stays agnostic to them.
//!
//! Conventions
//! -----------
//! - Parameters, costs and the float type are all plain `f64`.
//! - Gradients, Jacobians, Hessians and residuals are unused (`()`).
use argmin::{
    core::IterState,
    solver::brent::{BrentOpt, BrentRoot},
};
use std::collections::HashMap;

/// Solver state for scalar problems.
pub type ScalarState = IterState<f64, (), (), (), (), f64>;

/// Function-evaluation counters as reported by the solver.
pub type FnEvalMap = HashMap<String, u64>;

/// Brent's bracketing root finder on `f64`.
pub type RootSolver = BrentRoot<f64>;

/// Brent's bounded minimizer on `f64`.
pub type MinSolver = BrentOpt<f64>;

/// Largest meaningful number of tolerance bits for `f64`.
pub const MAX_TOLERANCE_BITS: u32 = f64::MANTISSA_DIGITS - 1;

/// Iterate reported as the position of a finished run.
///
/// Bracketing root finders keep a sign change around their last iterate,
/// which need not be the point of smallest `|f|` seen so far (it is not
/// when the bracket closes in on a pole). Minimizers report their best
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportedIterate {
    Best,
    Last,
}
