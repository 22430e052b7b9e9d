//! peaks — position refinement and weight extraction for resolvent peaks.
//!
//! Purpose
//! -------
//! Measure the spectral weight of a sharp peak of the resolvent from the
//! power-law decay of its real part: near a delta peak `W/(ω − ω0)`,
//! `ln|Re f(ω0 ± e^t)| = ln W − t`, so a straight-line fit in `t` gives the
//! weight as `exp(intercept)` and a slope of `−1`.
//!
//! Key behaviors
//! -------------
//! - [`Peak::improved_position`] minimizes `Im f` over a window around the
//!   raw position, kept clear of the continuum edge.
//! - [`Peak::fit_real_part`] samples `ln|Re f|` on a logarithmic offset grid
//!   and runs the least-squares fit, returning the samples with the fit.
//! - [`analyze_peak`] chains both steps, retries a failed refinement once
//!   with a narrower window, warns on an unexpected slope, and clamps
//!   overflowing weights to `1e16`.
//! - [`analyze_peak_both_sides`] fits above and below the peak and combines
//!   the two weights with [`inverse_variance_mean`].
//!
//! Invariants & assumptions
//! ------------------------
//! - The resolvent passed in is evaluated on real `ω`; callers close over
//!   the broadening and the evaluator of their choice.
//! - A slope far from `−1` (e.g. `−2` for a derivative-type peak) means no
//!   weight can be extracted; this is reported through `tracing::warn!` and
//!   left to the caller, never raised as an error.
//!
//! Conventions
//! -----------
//! - Positions and offsets share the units of `ω`.
//! - Only configuration problems and a refinement that fails twice are
//!   [`PeakError`]s.
//!
//! Testing notes
//! -------------
//! - Unit tests use analytic delta, Lorentzian and derivative peaks whose
//!   slope and weight are known exactly.

pub mod analysis;
pub mod errors;
pub mod options;
pub mod peak;
pub mod stats;

pub use self::analysis::{
    PeakResult, TwoSidedPeak, WEIGHT_CLAMP, WEIGHT_EXPONENT_LIMIT, analyze_peak,
    analyze_peak_both_sides,
};
pub use self::errors::{PeakAnalysisResult, PeakError};
pub use self::options::PeakOptions;
pub use self::peak::{EDGE_MARGIN, Peak, RealPartFit, Refinement};
pub use self::stats::inverse_variance_mean;

pub mod prelude {
    pub use super::{
        Peak, PeakAnalysisResult, PeakError, PeakOptions, PeakResult, analyze_peak,
        analyze_peak_both_sides, inverse_variance_mean,
    };
}
