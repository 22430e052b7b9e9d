//! continuum::dispersion — two-particle continuum edges from a dispersion.
//!
//! Purpose
//! -------
//! Supply the two boundary energies of a two-particle continuum at total
//! momentum `k` by brute force: evaluate `E(q) + E(k − q)` on a uniform
//! `resolution × resolution` grid over `q ∈ [0, 1]²` and report the extrema.
//!
//! Key behaviors
//! -------------
//! - [`Dispersion`] abstracts a single-particle band `E(kx, ky)`; any
//!   `Fn(f64, f64) -> f64 + Sync` closure is a dispersion.
//! - [`GappedCosineBand`] provides the gapped nearest-neighbour band used
//!   for square-lattice mean-field quasiparticles.
//! - [`continuum_bounds`] performs the grid scan in parallel and returns
//!   `(min, max)`; [`continuum_boundaries`] wraps the pair into validated
//!   [`ContinuumBoundaries`].
//!
//! Conventions
//! -----------
//! - Momenta are measured in units of π, so the grid `[0, 1]²` covers the
//!   irreducible quadrant of the Brillouin zone.
//! - The scan is deterministic: grid points are fixed and the reduction is
//!   an exact min/max, so the result does not depend on thread scheduling.
use rayon::prelude::*;
use std::f64::consts::PI;

use crate::continuum::{
    boundaries::ContinuumBoundaries,
    errors::{ContinuumError, ContinuumResult},
};

/// Single-particle dispersion `E(kx, ky)`.
pub trait Dispersion: Sync {
    fn energy(&self, kx: f64, ky: f64) -> f64;
}

impl<F> Dispersion for F
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    fn energy(&self, kx: f64, ky: f64) -> f64 {
        self(kx, ky)
    }
}

/// GappedCosineBand — `E(k) = sqrt(Δ² + (c·(cos πkx + cos πky))²)`.
///
/// Fields
/// ------
/// - `gap_squared`: `Δ² = Δ₀² + Δ₁² + Δ₂²`, the squared gap magnitude.
/// - `cos_factor`: `c = −(2 + (f_x + f_y)/2)`, the renormalized hopping
///   including Fock corrections `f_x`, `f_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GappedCosineBand {
    gap_squared: f64,
    cos_factor: f64,
}

impl GappedCosineBand {
    pub fn new(gap_squared: f64, cos_factor: f64) -> Self {
        Self { gap_squared, cos_factor }
    }

    /// Build the band from three gap components and two Fock corrections.
    pub fn from_mean_fields(gaps: [f64; 3], fock_x: f64, fock_y: f64) -> Self {
        let gap_squared = gaps.iter().map(|g| g * g).sum();
        let cos_factor = -(2.0 + 0.5 * (fock_x + fock_y));
        Self { gap_squared, cos_factor }
    }

    /// Bare (ungapped) band `c·(cos πkx + cos πky)`.
    pub fn bare(&self, kx: f64, ky: f64) -> f64 {
        self.cos_factor * ((PI * kx).cos() + (PI * ky).cos())
    }
}

impl Dispersion for GappedCosineBand {
    fn energy(&self, kx: f64, ky: f64) -> f64 {
        let bare = self.bare(kx, ky);
        (self.gap_squared + bare * bare).sqrt()
    }
}

/// continuum_bounds — extrema of `E(q) + E(k − q)` over a uniform grid.
///
/// Parameters
/// ----------
/// - `dispersion`: single-particle band.
/// - `kx`, `ky`: total momentum (units of π).
/// - `resolution`: points per axis; the grid is `linspace(0, 1, resolution)`
///   on both axes.
///
/// Returns
/// -------
/// `(min, max)` over the grid.
///
/// Errors
/// ------
/// - [`ContinuumError::InvalidResolution`] if `resolution == 0`.
/// - [`ContinuumError::NonFiniteDispersion`] at the first grid point (in
///   row-major order) where the pair energy is not finite.
pub fn continuum_bounds<D: Dispersion>(
    dispersion: &D, kx: f64, ky: f64, resolution: usize,
) -> ContinuumResult<(f64, f64)> {
    if resolution == 0 {
        return Err(ContinuumError::InvalidResolution { resolution });
    }
    let step = if resolution > 1 { 1.0 / (resolution - 1) as f64 } else { 0.0 };
    let pair_energy = |flat: usize| -> (f64, f64, f64) {
        let qx = (flat % resolution) as f64 * step;
        let qy = (flat / resolution) as f64 * step;
        (qx, qy, dispersion.energy(qx, qy) + dispersion.energy(kx - qx, ky - qy))
    };

    let scan = (0..resolution * resolution)
        .into_par_iter()
        .fold(GridScan::empty, |acc, flat| {
            let (qx, qy, value) = pair_energy(flat);
            acc.push(flat, qx, qy, value)
        })
        .reduce(GridScan::empty, GridScan::merge);

    if let Some((_, qx, qy, value)) = scan.first_non_finite {
        return Err(ContinuumError::NonFiniteDispersion { qx, qy, value });
    }
    Ok((scan.min, scan.max))
}

/// Running extrema of a grid scan plus its first non-finite sample in
/// row-major order.
#[derive(Debug, Clone, Copy)]
struct GridScan {
    min: f64,
    max: f64,
    first_non_finite: Option<(usize, f64, f64, f64)>,
}

impl GridScan {
    fn empty() -> Self {
        Self { min: f64::INFINITY, max: f64::NEG_INFINITY, first_non_finite: None }
    }

    fn push(mut self, flat: usize, qx: f64, qy: f64, value: f64) -> Self {
        if value.is_finite() {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        } else if self.first_non_finite.map_or(true, |(seen, ..)| flat < seen) {
            self.first_non_finite = Some((flat, qx, qy, value));
        }
        self
    }

    fn merge(self, other: Self) -> Self {
        let first_non_finite = match (self.first_non_finite, other.first_non_finite) {
            (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
            (a, b) => a.or(b),
        };
        Self { min: self.min.min(other.min), max: self.max.max(other.max), first_non_finite }
    }
}

/// continuum_boundaries — grid-scanned edges as validated boundaries.
///
/// Errors
/// ------
/// Propagates [`continuum_bounds`] errors and [`ContinuumBoundaries::new`]
/// errors (a flat band yields `DegenerateBoundaries`).
pub fn continuum_boundaries<D: Dispersion>(
    dispersion: &D, kx: f64, ky: f64, resolution: usize, z_squared: bool,
) -> ContinuumResult<ContinuumBoundaries> {
    let (lower, upper) = continuum_bounds(dispersion, kx, ky, resolution)?;
    ContinuumBoundaries::new(lower, upper, z_squared)
}
