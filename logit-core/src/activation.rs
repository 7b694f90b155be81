use crate::{Float, Vector};

/// Computes the **logistic sigmoid** of a scalar.
///
/// The sigmoid maps any real number into the open interval `(0, 1)` and is
/// used to turn a linear score into a probability-like value.
///
/// # Definition
///
/// ```text
/// σ(x) = 1 / (1 + e^(−x))
/// ```
///
/// # Numerical stability
///
/// Evaluating `e^(−x)` directly overflows for large negative `x`. This
/// implementation branches on the sign of `x` so the exponent is never positive:
///
/// ```text
/// x ≥ 0:  σ(x) = 1 / (1 + e^(−x))
/// x < 0:  σ(x) = e^x / (1 + e^x)
/// ```
///
/// Both forms are algebraically identical, so results in the usual input range
/// match the naive formula. Large magnitudes saturate to `0.0` or `1.0`
/// instead of producing `inf` or `NaN`.
///
/// # Examples
///
/// ```rust
/// use logit_core::activation::sigmoid;
///
/// assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
/// assert_eq!(sigmoid(1000.0), 1.0);
/// assert_eq!(sigmoid(-1000.0), 0.0);
/// ```
///
/// # Notes
///
/// - `NaN` input yields `NaN`.
pub fn sigmoid(x: Float) -> Float {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Applies [`sigmoid`] element-wise, returning a new vector of the same length.
pub fn sigmoid_vec(x: &Vector) -> Vector {
    x.map(sigmoid)
}
