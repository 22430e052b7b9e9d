//! continuum — continuum edges and asymptotic recursion limits.
//!
//! Purpose
//! -------
//! Describe the continuous part of a resolvent's spectrum. Everything the
//! continued-fraction machinery needs from the continuum reduces to two
//! numbers: the band edges. This module validates them, derives the
//! asymptotic recursion limits `(a_∞, b_∞)`, and can obtain the edges from a
//! single-particle dispersion by a grid scan.
//!
//! Key behaviors
//! -------------
//! - [`ContinuumBoundaries`] validates `lower < upper`, optionally squares the
//!   edges (`z_squared`), and caches [`Asymptotics`].
//! - [`asymptotics`] is the pure `(lower, upper) ↦ (a_∞, b_∞)` map.
//! - [`continuum_bounds`] / [`continuum_boundaries`] scan `E(q) + E(k − q)`
//!   over a uniform grid for any [`Dispersion`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Boundaries are finite with `lower < upper` in energy units *and* in
//!   recursion space; violations are configuration errors
//!   ([`ContinuumError`]) raised at construction.
//! - Boundaries are immutable once built and are shared by value.
//!
//! Downstream usage
//! ----------------
//! - `resolvent` builds its terminator and depth selector from a single
//!   [`ContinuumBoundaries`] instance.
//! - `peaks` uses the energy-unit edges to cap peak search windows.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the asymptotic formulas, squared/unsquared edges, the
//!   gapped cosine band and all error branches.

pub mod boundaries;
pub mod dispersion;
pub mod errors;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::boundaries::{Asymptotics, ContinuumBoundaries, asymptotics};
pub use self::dispersion::{
    Dispersion, GappedCosineBand, continuum_boundaries, continuum_bounds,
};
pub use self::errors::{ContinuumError, ContinuumResult};

pub mod prelude {
    pub use super::{
        Asymptotics, ContinuumBoundaries, ContinuumError, ContinuumResult, Dispersion,
        GappedCosineBand, continuum_boundaries,
    };
}
