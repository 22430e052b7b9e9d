//! resolvent::options — solver configuration.
use crate::resolvent::errors::{ResolventError, ResolventResult};

/// Configuration of a [`ContinuedFraction`](crate::resolvent::solver::ContinuedFraction).
///
/// Fields
/// ------
/// - `z_squared`: `bool`
///   The recursion variable is `ω = w²`; boundaries given in energy units are
///   squared before the asymptotics are formed.
/// - `ignore_first`: `usize`
///   Number of leading recursion terms skipped by the depth selector; short
///   range coefficients are numerically unreliable. Must be `≥ 1`.
/// - `ignore_last`: `Option<usize>`
///   Exclusive upper end of the depth-selection window. `None` (or any value
///   above `len(A) − 1`) means `len(A) − 1`.
/// - `report_depth`: `bool`
///   Emit a `tracing::debug!` event with the chosen termination index.
///
/// Default
/// -------
/// `z_squared = true`, `ignore_first = 5`, `ignore_last = None`,
/// `report_depth = false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverOptions {
    pub z_squared: bool,
    pub ignore_first: usize,
    pub ignore_last: Option<usize>,
    pub report_depth: bool,
}

impl SolverOptions {
    /// Construct validated options.
    ///
    /// Errors
    /// ------
    /// - [`ResolventError::InvalidIgnoreWindow`] if `ignore_first == 0` or, when
    ///   `ignore_last` is given, `ignore_first >= ignore_last`. Clamping of
    ///   `ignore_last` to the coefficient length happens per resolvent at
    ///   selection time and is re-checked there.
    pub fn new(
        z_squared: bool, ignore_first: usize, ignore_last: Option<usize>, report_depth: bool,
    ) -> ResolventResult<Self> {
        let invalid = ignore_first == 0 || ignore_last.is_some_and(|last| ignore_first >= last);
        if invalid {
            return Err(ResolventError::InvalidIgnoreWindow {
                ignore_first,
                ignore_last: ignore_last.unwrap_or(0),
            });
        }
        Ok(Self { z_squared, ignore_first, ignore_last, report_depth })
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self { z_squared: true, ignore_first: 5, ignore_last: None, report_depth: false }
    }
}
