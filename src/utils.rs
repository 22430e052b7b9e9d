//! utils — conversions between Python inputs and the core types.
//!
//! Only compiled with the `python-bindings` feature. Frequencies arrive as
//! numpy arrays or plain Python sequences; coefficients arrive as a dict of
//! `(a_i, b_i)` pair lists.
#[cfg(feature = "python-bindings")]
use num_complex::Complex64;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
use crate::resolvent::coefficients::{RecursionCoefficients, ResolventTable};

#[cfg(feature = "python-bindings")]
const FREQUENCY_TYPE_ERROR: &str =
    "expected a complex or real scalar, a 1-D numpy.ndarray, or a sequence of numbers";

/// Complex frequencies from a numpy array (complex128 or float64) or a
/// Python sequence of numbers.
#[cfg(feature = "python-bindings")]
pub fn extract_complex_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, Complex64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<Complex64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(real_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        let promoted: Vec<Complex64> =
            real_ro.as_array().iter().map(|&x| Complex64::new(x, 0.0)).collect();
        return Ok(promoted.into_pyarray_bound(py).readonly());
    }

    let vec: Vec<Complex64> =
        raw_data.extract().map_err(|_| PyTypeError::new_err(FREQUENCY_TYPE_ERROR))?;
    Ok(vec.into_pyarray_bound(py).readonly())
}

/// Frequencies as an owned vector, and whether the input was a scalar.
#[cfg(feature = "python-bindings")]
pub fn extract_frequencies<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<(Vec<Complex64>, bool)> {
    if !raw_data.hasattr("__len__")? {
        let w: Complex64 =
            raw_data.extract().map_err(|_| PyTypeError::new_err(FREQUENCY_TYPE_ERROR))?;
        return Ok((vec![w], true));
    }
    let arr = extract_complex_array(py, raw_data)?;
    let ws = arr
        .as_slice()
        .map_err(|_| PyValueError::new_err("frequencies must be a contiguous 1-D array"))?
        .to_vec();
    Ok((ws, false))
}

/// Coefficient table from `{name: [(a_0, b_0), (a_1, b_1), ...]}`.
///
/// A value may also be a list of such pair lists, one per resolvent
/// instance; a single pair list is stored as instance 0.
#[cfg(feature = "python-bindings")]
pub fn extract_resolvent_table(raw: &Bound<'_, PyDict>) -> PyResult<ResolventTable> {
    let mut table = ResolventTable::new();
    for (key, value) in raw.iter() {
        let name: String = key.extract()?;
        let instances: Vec<Vec<(f64, f64)>> = match value.extract::<Vec<Vec<(f64, f64)>>>() {
            Ok(many) => many,
            Err(_) => vec![value.extract::<Vec<(f64, f64)>>().map_err(|_| {
                PyTypeError::new_err(format!(
                    "coefficients of '{name}' must be a list of (a_i, b_i) pairs"
                ))
            })?],
        };
        for pairs in instances {
            let (a, b): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
            table.push(name.as_str(), RecursionCoefficients::new(a, b)?);
        }
    }
    Ok(table)
}
