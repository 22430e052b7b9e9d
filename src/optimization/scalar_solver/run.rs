//! Execution helper that runs an `argmin` solver on a scalar problem and
//! returns a crate-friendly [`ScalarOutcome`].
use argmin::core::{Executor, Solver, State};

use crate::optimization::{
    errors::OptResult,
    scalar_solver::{
        adapter::ScalarAdapter,
        traits::{ScalarOutcome, ScalarSolverOptions},
        types::{ReportedIterate, ScalarState},
    },
};

/// Run an `argmin` solver on a scalar problem.
///
/// Wires up the adapted closure, the solver, the iteration cap from
/// `opts.max_iter` and, with the `obs_slog` feature and `opts.verbose`, a
/// terminal slog observer (`ObserverMode::Always`).
///
/// # Returns
/// A [`ScalarOutcome`] with the position selected by `reported`, its
/// objective value, the termination status, iteration count and
/// function-evaluation counters.
///
/// # Errors
/// - Propagates any `argmin` runtime error (e.g. a bracket without a sign
///   change, a non-finite objective) via `From<argmin::core::Error>`.
/// - Propagates validation errors when building the [`ScalarOutcome`].
pub fn run_scalar<'a, F, S>(
    problem: ScalarAdapter<'a, F>, solver: S, opts: &ScalarSolverOptions, reported: ReportedIterate,
) -> OptResult<ScalarOutcome>
where
    F: Fn(f64) -> f64,
    S: Solver<ScalarAdapter<'a, F>, ScalarState> + 'static,
{
    let max_iter = opts.max_iter as u64;
    let mut executor = Executor::new(problem, solver);
    executor = executor.configure(|state| state.max_iters(max_iter));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        executor = executor.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let result = executor.run()?;
    let state = result.state();
    let (position, value) = match reported {
        ReportedIterate::Best => (state.get_best_param().or(state.get_param()), state.get_best_cost()),
        ReportedIterate::Last => (state.get_param(), state.get_cost()),
    };
    ScalarOutcome::new(
        position.copied(),
        value,
        state.get_termination_status().clone(),
        state.get_iter(),
        state.get_func_counts().clone(),
    )
}
