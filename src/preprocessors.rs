use crate::{Float, LogitError, Matrix, Result};

/// Divides every element of a matrix by the largest element seen during [`fit`](MaxScaler::fit).
///
/// The classifier does not scale its inputs, and gradient descent with a fixed
/// learning rate diverges easily on large raw values. This scaler is the
/// cheapest way to bring non-negative data into `[0, 1]`:
///
/// ```text
/// X' = X / max(X)
/// ```
///
/// A single global factor is used, so relative magnitudes between columns are
/// preserved.
#[derive(Debug, Clone, Default)]
pub struct MaxScaler {
    max: Option<Float>,
}

impl MaxScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the global maximum of `x`.
    ///
    /// # Errors
    ///
    /// - [`LogitError::EmptyTrainingData`] if `x` has no elements.
    /// - [`LogitError::InvalidValue`] if the maximum is zero or not finite.
    pub fn fit(&mut self, x: &Matrix) -> Result<()> {
        if x.is_empty() {
            return Err(LogitError::EmptyTrainingData);
        }

        let max = x.max();
        if !max.is_finite() || max == 0.0 {
            return Err(LogitError::InvalidValue {
                message: format!("cannot scale by maximum {}", max),
            });
        }

        self.max = Some(max);
        Ok(())
    }

    /// Returns `x / max`.
    pub fn transform(&self, x: &Matrix) -> Result<Matrix> {
        let max = self.max.ok_or(LogitError::NotFitted)?;
        Ok(x / max)
    }

    pub fn fit_transform(&mut self, x: &Matrix) -> Result<Matrix> {
        self.fit(x)?;
        self.transform(x)
    }

    pub fn max(&self) -> Option<Float> {
        self.max
    }
}
