//! optimization — scalar solvers, line regression, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the numerical search and fitting primitives the spectral analysis
//! depends on, with a single error/result surface. Callers hand in plain
//! closures or sample slices and never touch backend solver details.
//!
//! Key behaviors
//! -------------
//! - `scalar_solver`: argmin-backed Brent root finding over a bracket and
//!   Brent bounded minimization, returning a [`ScalarOutcome`] with a
//!   success flag and termination message.
//! - `regression`: ordinary least-squares line fit with standard errors,
//!   correlation and slope p-value ([`LinearFit`]).
//! - `errors`: configuration issues, numerical failures and backend solver
//!   errors normalized into [`OptError`] with the [`OptResult<T>`] alias.
//!
//! Invariants & assumptions
//! ------------------------
//! - Search intervals are finite and ordered, tolerances finite and
//!   positive; invalid inputs are reported as `OptError`, not panics.
//! - Objectives that return non-finite values abort the run with an error
//!   instead of steering the solver.
//!
//! Conventions
//! -----------
//! - Public entrypoints that can fail return `OptResult<T>`; callers never
//!   see raw argmin errors.
//! - A solver that stops at its iteration cap is *not* an error: the outcome
//!   carries `success == false` and higher layers decide on recovery.
//!
//! Downstream usage
//! ----------------
//! - `bound_states` refines sign-change brackets of the resolvent
//!   denominator with [`find_root`].
//! - `peaks` refines peak positions with [`bounded_minimize`] and extracts
//!   weights from [`linear_fit`].
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules cover validation, error conversions and
//!   convergence on functions with known roots, minima and fits.

pub mod errors;
pub mod regression;
pub mod scalar_solver;

pub use self::errors::{OptError, OptResult};
pub use self::regression::{LinearFit, MIN_REGRESSION_POINTS, linear_fit};
pub use self::scalar_solver::{
    ScalarOutcome, ScalarSolverOptions, bounded_minimize, find_root, tolerance_from_bits,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_resolvents::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::regression::{LinearFit, linear_fit};
    pub use super::scalar_solver::prelude::*;
}
