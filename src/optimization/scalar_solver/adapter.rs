//! Adapter that exposes a scalar closure as an `argmin` problem.
//!
//! The closure is evaluated as-is (root finding and minimization both use
//! the raw value); non-finite outputs are turned into
//! [`OptError::NonFiniteCost`] so the solver stops instead of iterating on
//! NaNs.
use argmin::core::{CostFunction, Error};

use crate::optimization::errors::OptError;

/// Bridges `Fn(f64) -> f64` to `argmin`'s `CostFunction`.
#[derive(Debug, Clone, Copy)]
pub struct ScalarAdapter<'a, F> {
    pub f: &'a F,
}

impl<'a, F> ScalarAdapter<'a, F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(f: &'a F) -> Self {
        Self { f }
    }
}

impl<'a, F> CostFunction for ScalarAdapter<'a, F>
where
    F: Fn(f64) -> f64,
{
    type Param = f64;
    type Output = f64;

    /// Evaluate `f(x)`.
    ///
    /// # Errors
    /// Returns `NonFiniteCost` if the value is NaN or ±∞.
    fn cost(&self, x: &Self::Param) -> Result<Self::Output, Error> {
        let value = (self.f)(*x);
        if !value.is_finite() {
            return Err((OptError::NonFiniteCost { x: *x, value }).into());
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Check that finite values pass through and non-finite ones error.
    //
    // Given
    // -----
    // - f(x) = 1/x evaluated at 2 and 0.
    //
    // Expect
    // ------
    // - 0.5 at x = 2; `NonFiniteCost` at x = 0.
    fn non_finite_values_become_errors() {
        // Arrange
        let f = |x: f64| 1.0 / x;
        let adapter = ScalarAdapter::new(&f);

        // Act
        let ok = adapter.cost(&2.0).unwrap();
        let err = OptError::from(adapter.cost(&0.0).unwrap_err());

        // Assert
        assert_eq!(ok, 0.5);
        assert!(matches!(err, OptError::NonFiniteCost { x, .. } if x == 0.0));
    }
}
