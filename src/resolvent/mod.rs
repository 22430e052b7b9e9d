//! resolvent — continued-fraction resolvents from recursion coefficients.
//!
//! Purpose
//! -------
//! Turn Lanczos recursion coefficients `(A, B)` into resolvent values,
//! spectral densities and denominators at complex frequencies. This is the
//! numerical core the rest of the crate builds on.
//!
//! Key behaviors
//! -------------
//! - [`RecursionCoefficients`] / [`ResolventTable`] hold validated
//!   coefficients behind the [`CoefficientSource`] seam.
//! - [`Terminator`] closes a truncated fraction with its analytic tail.
//! - [`TerminationDepthSelector`] picks and memoizes the truncation depth
//!   per `(name, index)`.
//! - [`Evaluator`] runs the recursion for one coefficient set; scalar and
//!   sequence methods share the same per-element function.
//! - [`ContinuedFraction`] is the facade tying a source, boundaries and the
//!   depth cache together.
//!
//! Invariants & assumptions
//! ------------------------
//! - Configuration errors ([`ResolventError`]) are raised at construction
//!   or on first use of a key; evaluation itself never errors and returns
//!   non-finite values for singular recursions.
//! - Depth cache entries are written once and never invalidated.
//!
//! Conventions
//! -----------
//! - `w` is the frequency in energy units; the recursion runs in `ω = w²`.
//! - Sign convention: `Im R(w) < 0` for `w` just above the positive real
//!   axis, so `spectral_density = −Im R / π ≥ 0`.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests; the full pipeline is exercised in
//!   `tests/integration_spectral_pipeline.rs`.

pub mod coefficients;
pub mod depth;
pub mod errors;
pub mod fraction;
pub mod options;
pub mod solver;
pub mod terminator;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::coefficients::{CoefficientSource, RecursionCoefficients, ResolventTable};
pub use self::depth::{TerminationDepthSelector, deviations, select_termination_index};
pub use self::errors::{ResolventError, ResolventResult};
pub use self::fraction::{Evaluator, NORM_FACTOR, validate_depth};
pub use self::options::SolverOptions;
pub use self::solver::{ContinuedFraction, ResolventQuery};
pub use self::terminator::Terminator;

// ---- Prelude (opt-in convenience) ------------------------------------------

pub mod prelude {
    pub use super::{
        CoefficientSource, ContinuedFraction, Evaluator, NORM_FACTOR, RecursionCoefficients,
        ResolventError, ResolventQuery, ResolventResult, ResolventTable, SolverOptions,
        Terminator,
    };
}
