use crate::{Float, Vector};

/// Half mean of squared residuals:
///
/// ```text
/// J = Σ_i r_i² / (2 n)
/// ```
///
/// `residual` holds `predicted − target` per example. This is the cost the
/// trainer reports each epoch and compares against the early-stop tolerance.
/// Returns `0.0` for an empty vector.
pub fn half_mean_squared_error(residual: &Vector) -> Float {
    let n = residual.len();
    if n == 0 {
        return 0.0;
    }
    residual.norm_squared() / (2.0 * n as Float)
}
