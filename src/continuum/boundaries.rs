//! continuum::boundaries — continuum edges and asymptotic recursion limits.
//!
//! Purpose
//! -------
//! Hold the two energies delimiting the continuum of a resolvent and derive
//! the asymptotic recursion coefficients `(a_∞, b_∞)` the terminator and the
//! termination-depth selector compare against.
//!
//! Key behaviors
//! -------------
//! - Validate `lower < upper` (and, when the recursion lives in `ω = w²`,
//!   that the squared edges keep that ordering).
//! - Compute `a_∞ = (upper + lower)/2` and `b_∞ = (upper − lower)/4` once,
//!   from the edges in recursion space.
//! - Report the edges back in energy units for consumers that mark the
//!   continuum on a frequency axis.
//!
//! Conventions
//! -----------
//! - "Energy units" are the units of the frequency `w` handed to the
//!   evaluator; "recursion space" is the variable the coefficients were
//!   generated in: `w²` when `z_squared` is set, `w` otherwise.
//! - Instances are immutable after construction.
use crate::continuum::errors::{ContinuumError, ContinuumResult};

/// Asymptotic limits of the recursion coefficients.
///
/// For a single continuum band `[lower, upper]` the coefficients converge to
/// `A[i] → a_inf` and `sqrt(B[i]) → b_inf`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asymptotics {
    pub a_inf: f64,
    pub b_inf: f64,
}

/// asymptotics — asymptotic limits from two boundaries in recursion space.
///
/// Pure function; callers are expected to have validated `lower < upper`
/// (see [`ContinuumBoundaries::new`]).
pub fn asymptotics(lower: f64, upper: f64) -> Asymptotics {
    Asymptotics { a_inf: 0.5 * (upper + lower), b_inf: 0.25 * (upper - lower) }
}

/// ContinuumBoundaries — validated continuum edges.
///
/// Purpose
/// -------
/// Own the continuum edges and their recursion-space image, and serve the
/// derived [`Asymptotics`] to the terminator and depth selector.
///
/// Fields
/// ------
/// - `lower`, `upper`: `f64`
///   Edges in energy units, `lower < upper`.
/// - `z_squared`: `bool`
///   Whether the recursion variable is `w²`.
/// - `roots`: `(f64, f64)`
///   Edges in recursion space; squared copies of the edges when
///   `z_squared`, identical otherwise.
/// - `asymptotics`: [`Asymptotics`]
///   Limits derived from `roots`.
///
/// Invariants
/// ----------
/// - `lower < upper` and `roots.0 < roots.1`; both finite.
/// - `asymptotics.b_inf > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuumBoundaries {
    lower: f64,
    upper: f64,
    z_squared: bool,
    roots: (f64, f64),
    asymptotics: Asymptotics,
}

impl ContinuumBoundaries {
    /// Construct validated boundaries.
    ///
    /// Errors
    /// ------
    /// - [`ContinuumError::NonFiniteBoundary`] if either edge is NaN or ±∞.
    /// - [`ContinuumError::DegenerateBoundaries`] if `lower >= upper`.
    /// - [`ContinuumError::DegenerateSquaredBoundaries`] if `z_squared` and
    ///   `lower² >= upper²` (a negative lower edge).
    pub fn new(lower: f64, upper: f64, z_squared: bool) -> ContinuumResult<Self> {
        for value in [lower, upper] {
            if !value.is_finite() {
                return Err(ContinuumError::NonFiniteBoundary { value });
            }
        }
        if lower >= upper {
            return Err(ContinuumError::DegenerateBoundaries { lower, upper });
        }
        let roots = if z_squared { (lower * lower, upper * upper) } else { (lower, upper) };
        if roots.0 >= roots.1 {
            return Err(ContinuumError::DegenerateSquaredBoundaries {
                lower: roots.0,
                upper: roots.1,
            });
        }
        let asymptotics = asymptotics(roots.0, roots.1);
        Ok(Self { lower, upper, z_squared, roots, asymptotics })
    }

    /// Lower edge in energy units.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper edge in energy units.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn z_squared(&self) -> bool {
        self.z_squared
    }

    /// Edges in recursion space (`(lower², upper²)` under `z_squared`).
    pub fn roots(&self) -> (f64, f64) {
        self.roots
    }

    pub fn asymptotics(&self) -> Asymptotics {
        self.asymptotics
    }

    /// Edges in energy units, `(lower, upper)`.
    pub fn edges(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// Whether a real energy lies inside the closed continuum band.
    pub fn contains(&self, energy: f64) -> bool {
        (self.lower..=self.upper).contains(&energy)
    }
}
