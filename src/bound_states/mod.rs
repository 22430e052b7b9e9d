//! bound_states — isolated poles of the resolvent outside the continuum.
//!
//! Purpose
//! -------
//! Locate the real frequencies where the truncated resolvent has an
//! isolated pole and attach the residue (spectral weight) of each one.
//!
//! Key behaviors
//! -------------
//! - Scan the resolvent denominator on user-supplied windows, bracket every
//!   sign change of its real part, and refine each bracket with the scalar
//!   root finder ([`classify`], [`classify_excluding`]).
//! - Weight each root by `1 / D'(w0)`, with `D'` from a central difference.
//! - Drop brackets that straddle a pole of the denominator, fail to
//!   converge, or yield a non-finite residue, each with a `tracing`
//!   diagnostic.
//! - Exclude roots through an injected predicate (e.g. positions already
//!   attributed to phase peaks).
//!
//! Invariants & assumptions
//! ------------------------
//! - Output is sorted by ascending position with no duplicates within the
//!   refinement tolerance.
//! - A root sitting exactly on a grid point is kept only if its neighbours
//!   have opposite signs. Two roots inside one grid cell cancel and are not
//!   seen; refine `scan_count` when poles crowd.
//!
//! Conventions
//! -----------
//! - Positions are in energy units (the `w` of the evaluator).
//! - Configuration errors are returned as [`BoundStateError`]; per-bracket
//!   failures never are.
//!
//! Testing notes
//! -------------
//! - Unit tests use a two-level fraction whose zeros, pole and residues are
//!   known in closed form.

pub mod classifier;
pub mod errors;
pub mod options;

pub use self::classifier::{BoundState, classify, classify_excluding, classify_resolvent};
pub use self::errors::{BoundStateError, BoundStateResult};
pub use self::options::{ClassifierOptions, ScanWindow};

pub mod prelude {
    pub use super::{
        BoundState, BoundStateError, BoundStateResult, ClassifierOptions, ScanWindow, classify,
        classify_excluding, classify_resolvent,
    };
}
