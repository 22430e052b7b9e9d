//! peaks::stats — combination of independent measurements.
use crate::peaks::errors::{PeakAnalysisResult, PeakError};

/// inverse_variance_mean — weighted mean `Σ(xᵢ/σᵢ²) / Σ(1/σᵢ²)` and its
/// standard error `1/sqrt(Σ 1/σᵢ²)`.
///
/// Errors
/// ------
/// - [`PeakError::EmptyCombination`] for empty input.
/// - [`PeakError::CombinationLengthMismatch`] if lengths differ.
/// - [`PeakError::InvalidStdDev`] for a non-finite or non-positive `σᵢ`.
pub fn inverse_variance_mean(values: &[f64], std_devs: &[f64]) -> PeakAnalysisResult<(f64, f64)> {
    if values.len() != std_devs.len() {
        return Err(PeakError::CombinationLengthMismatch {
            values: values.len(),
            std_devs: std_devs.len(),
        });
    }
    if values.is_empty() {
        return Err(PeakError::EmptyCombination);
    }
    if let Some((index, &value)) =
        std_devs.iter().enumerate().find(|(_, s)| !s.is_finite() || **s <= 0.0)
    {
        return Err(PeakError::InvalidStdDev { index, value });
    }

    let (weighted, total) = values
        .iter()
        .zip(std_devs)
        .fold((0.0, 0.0), |(num, den), (&x, &s)| {
            let w = 1.0 / (s * s);
            (num + w * x, den + w)
        });
    Ok((weighted / total, total.sqrt().recip()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Check the weighted mean against a hand computation.
    //
    // Given
    // -----
    // - Values [1, 2] with σ = [1, 2]: weights 1 and 1/4.
    //
    // Expect
    // ------
    // - Mean (1 + 0.5)/1.25 = 1.2, error 1/sqrt(1.25).
    fn weighted_mean_matches_hand_computation() {
        let (mean, err) = inverse_variance_mean(&[1.0, 2.0], &[1.0, 2.0]).unwrap();

        assert_relative_eq!(mean, 1.2, epsilon = 1e-14);
        assert_relative_eq!(err, 1.25_f64.sqrt().recip(), epsilon = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // Reject unusable inputs.
    //
    // Given
    // -----
    // - Empty slices, mismatched lengths, a zero standard deviation.
    //
    // Expect
    // ------
    // - The matching error variant each time.
    fn invalid_inputs_are_rejected() {
        assert!(matches!(inverse_variance_mean(&[], &[]), Err(PeakError::EmptyCombination)));
        assert!(matches!(
            inverse_variance_mean(&[1.0], &[1.0, 2.0]),
            Err(PeakError::CombinationLengthMismatch { values: 1, std_devs: 2 })
        ));
        assert!(matches!(
            inverse_variance_mean(&[1.0, 2.0], &[1.0, 0.0]),
            Err(PeakError::InvalidStdDev { index: 1, .. })
        ));
    }
}
