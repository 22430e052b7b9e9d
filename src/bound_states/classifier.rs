//! bound_states::classifier — isolated poles of a truncated resolvent.
//!
//! The denominator `D(w) = G(w)/B[0]` is scanned on each window, every
//! sign change of `Re D` between neighbouring grid points is refined with
//! Brent's root finder, and the residue of the resolvent at the refined
//! root becomes the bound-state weight.
//!
//! Recoverable failures are absorbed here: a bracket whose refinement
//! errors out or stops at the iteration cap is dropped with a `warn!`, and a
//! bracket that straddles a pole of `D` (where `D` jumps sign through
//! infinity) is dropped with a `debug!`. The root finder reports its last
//! iterate, so on a pole it ends next to the pole with a large `|D|`, or
//! on a bracket end if it never moved.
use num_complex::Complex64;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::bound_states::{
    errors::BoundStateResult,
    options::{ClassifierOptions, ScanWindow},
};
use crate::optimization::scalar_solver::{ScalarSolverOptions, find_root, tolerance_from_bits};
use crate::resolvent::{
    coefficients::CoefficientSource,
    fraction::Evaluator,
    solver::{ContinuedFraction, ResolventQuery},
};

/// BoundState — refined root of the denominator and its residue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundState {
    pub position: f64,
    pub weight: f64,
}

/// Candidate root located on the scan grid.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Candidate {
    /// Grid point where `Re D` is exactly zero between opposite signs.
    Exact(f64),
    /// Neighbouring grid points with opposite signs of `Re D`.
    Bracket(f64, f64),
}

/// classify — bound states of `evaluator` over the configured windows.
///
/// Equivalent to [`classify_excluding`] with a predicate that keeps every
/// root.
pub fn classify(evaluator: &Evaluator<'_>, opts: &ClassifierOptions) -> BoundStateResult<Vec<BoundState>> {
    classify_excluding(evaluator, opts, |_| false)
}

/// classify_excluding — bound states, minus roots flagged by `is_phase_peak`.
///
/// Parameters
/// ----------
/// - `evaluator`: resolvent at a fixed depth, with or without terminator.
/// - `opts`: scan windows and refinement settings.
/// - `is_phase_peak`: roots for which this returns `true` are excluded.
///
/// Returns
/// -------
/// Bound states sorted by ascending position. Roots from overlapping
/// windows that agree within twice their combined refinement tolerances
/// are merged into one.
///
/// Errors
/// ------
/// - [`BoundStateError::Solver`](crate::bound_states::errors::BoundStateError::Solver)
///   for invalid tolerance settings. Per-bracket failures are logged and
///   dropped, never returned.
pub fn classify_excluding<P>(
    evaluator: &Evaluator<'_>, opts: &ClassifierOptions, is_phase_peak: P,
) -> BoundStateResult<Vec<BoundState>>
where
    P: Fn(f64) -> bool + Sync,
{
    let mut candidates = Vec::new();
    for window in &opts.windows {
        candidates.extend(scan_window(evaluator, window, opts.scan_count));
    }

    let refined: Vec<Option<(BoundState, f64)>> = candidates
        .par_iter()
        .map(|&candidate| refine(evaluator, candidate, opts))
        .collect::<BoundStateResult<_>>()?;

    let mut states: Vec<(BoundState, f64)> = refined
        .into_iter()
        .flatten()
        .filter(|(state, _)| !is_phase_peak(state.position))
        .collect();
    states.sort_by(|a, b| a.0.position.total_cmp(&b.0.position));
    states.dedup_by(|later, earlier| {
        (later.0.position - earlier.0.position).abs() <= 2.0 * (later.1 + earlier.1)
    });
    Ok(states.into_iter().map(|(state, _)| state).collect())
}

/// classify_resolvent — [`classify_excluding`] for a named resolvent at its
/// selected termination depth.
///
/// Errors
/// ------
/// - [`BoundStateError::Resolvent`](crate::bound_states::errors::BoundStateError::Resolvent)
///   for an unknown resolvent or an invalid depth.
pub fn classify_resolvent<S, P>(
    solver: &ContinuedFraction<S>, query: &ResolventQuery<'_>, opts: &ClassifierOptions,
    is_phase_peak: P,
) -> BoundStateResult<Vec<BoundState>>
where
    S: CoefficientSource,
    P: Fn(f64) -> bool + Sync,
{
    let evaluator = solver.evaluator(query)?;
    classify_excluding(&evaluator, opts, is_phase_peak)
}

/// Sign changes of `Re D` on the window grid.
///
/// Non-finite grid values break the bracket chain on both sides.
fn scan_window(evaluator: &Evaluator<'_>, window: &ScanWindow, count: usize) -> Vec<Candidate> {
    let grid = window.grid(count);
    let points: Vec<Complex64> = grid.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    let values: Vec<f64> = evaluator.denominator_many(&points).iter().map(|d| d.re).collect();

    let mut candidates = Vec::new();
    for i in 0..count - 1 {
        let (left, right) = (values[i], values[i + 1]);
        if !left.is_finite() || !right.is_finite() {
            continue;
        }
        if left * right < 0.0 {
            candidates.push(Candidate::Bracket(grid[i], grid[i + 1]));
        } else if left == 0.0 && i > 0 {
            let before = values[i - 1];
            if before.is_finite() && before * right < 0.0 {
                candidates.push(Candidate::Exact(grid[i]));
            }
        }
    }
    candidates
}

/// Refine one candidate into a bound state and its dedup tolerance.
///
/// `Ok(None)` marks a dropped candidate.
fn refine(
    evaluator: &Evaluator<'_>, candidate: Candidate, opts: &ClassifierOptions,
) -> BoundStateResult<Option<(BoundState, f64)>> {
    let re_d = |x: f64| evaluator.denominator(Complex64::new(x, 0.0)).re;

    let (position, tolerance) = match candidate {
        Candidate::Exact(x) => {
            let bracket = (x - opts.weight_eps, x + opts.weight_eps);
            (x, tolerance_from_bits(opts.tolerance_bits, bracket)?)
        }
        Candidate::Bracket(lower, upper) => {
            let tolerance = tolerance_from_bits(opts.tolerance_bits, (lower, upper))?;
            let solver_opts = ScalarSolverOptions::new(tolerance, opts.max_iter, opts.verbose)?;
            let outcome = match find_root(&re_d, (lower, upper), &solver_opts) {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(lower, upper, "dropping bound-state bracket: {err}");
                    return Ok(None);
                }
            };
            if !outcome.success {
                warn!(lower, upper, "dropping bound-state bracket: {}", outcome.message);
                return Ok(None);
            }
            let at_root = re_d(outcome.position).abs();
            let on_end = outcome.position <= lower || outcome.position >= upper;
            if on_end || !at_root.is_finite() || at_root > re_d(lower).abs().max(re_d(upper).abs()) {
                debug!(lower, upper, position = outcome.position, "bracket straddles a pole");
                return Ok(None);
            }
            (outcome.position, tolerance)
        }
    };

    let h = opts.weight_eps;
    let slope = (re_d(position + h) - re_d(position - h)) / (2.0 * h);
    let weight = 1.0 / slope;
    if !weight.is_finite() {
        warn!(position, "dropping bound state with non-finite residue");
        return Ok(None);
    }
    Ok(Some((BoundState { position, weight }, tolerance)))
}
