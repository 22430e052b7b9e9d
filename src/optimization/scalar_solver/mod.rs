//! scalar_solver — argmin-backed one-dimensional root finding and
//! bounded minimization.
//!
//! Purpose
//! -------
//! Provide the two scalar search primitives the spectral analysis needs:
//! a bracketing root finder (bound-state refinement) and a bounded
//! minimizer (peak-position refinement). Callers pass a plain
//! `Fn(f64) -> f64` and get a [`ScalarOutcome`] back without touching
//! argmin types.
//!
//! Key behaviors
//! -------------
//! - [`find_root`] runs Brent's root finder on a sign-changing bracket.
//! - [`bounded_minimize`] runs Brent's bounded minimizer.
//! - [`tolerance_from_bits`] converts a binary precision into the absolute
//!   tolerance the root finder expects.
//! - Non-convergence within `max_iter` is reported through
//!   [`ScalarOutcome::success`], never as a panic.
//!
//! Invariants & assumptions
//! ------------------------
//! - Intervals are finite with `lower < upper`; tolerances are finite and
//!   strictly positive; `max_iter > 0`. Violations are [`OptError`]s.
//! - Objectives returning NaN/±∞ abort the run with
//!   [`OptError::NonFiniteCost`].
//!
//! Conventions
//! -----------
//! - Errors bubble up as [`OptResult<T>`]; raw argmin errors never leak.
//! - With the `obs_slog` feature and `verbose = true`, solver progress is
//!   logged to the terminal.
//!
//! Testing notes
//! -------------
//! - Unit tests cover validation, the adapter, and convergence on simple
//!   functions with known roots and minima.
//!
//! [`OptError`]: crate::optimization::errors::OptError
//! [`OptError::NonFiniteCost`]: crate::optimization::errors::OptError::NonFiniteCost
//! [`OptResult<T>`]: crate::optimization::errors::OptResult

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

pub use self::api::{bounded_minimize, find_root, tolerance_from_bits};
pub use self::traits::{ScalarOutcome, ScalarSolverOptions};
pub use self::types::{
    FnEvalMap, MAX_TOLERANCE_BITS, MinSolver, ReportedIterate, RootSolver, ScalarState,
};

pub mod prelude {
    pub use super::{
        ScalarOutcome, ScalarSolverOptions, bounded_minimize, find_root, tolerance_from_bits,
    };
}
