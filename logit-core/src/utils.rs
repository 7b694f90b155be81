use crate::{LogitError, Matrix, Result, Vector};

/// Returns a copy of `x` with a leading column of ones (the intercept term).
///
/// The caller's matrix is left untouched; the result has shape
/// `(x.nrows(), x.ncols() + 1)`.
pub fn with_intercept(x: &Matrix) -> Matrix {
    x.clone().insert_column(0, 1.0)
}

/// Checks that every label is exactly `0.0` or `1.0`.
///
/// # Errors
///
/// - [`LogitError::InvalidTrainingData`] naming the first offending index.
pub fn check_binary_labels(y: &Vector) -> Result<()> {
    match y.iter().position(|&v| v != 0.0 && v != 1.0) {
        Some(i) => Err(LogitError::InvalidTrainingData {
            message: format!("label at index {} is {}, expected 0 or 1", i, y[i]),
        }),
        None => Ok(()),
    }
}
