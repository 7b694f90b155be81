/// Floating point type used for every matrix, vector and coefficient.
pub type Float = f32;

/// Feature matrix of shape `(n_examples, n_features)`.
pub type Matrix = nalgebra::DMatrix<Float>;

/// Column vector: labels, coefficients, scores and probabilities.
pub type Vector = nalgebra::DVector<Float>;

/// Binary class labels (`0` or `1`), one per example.
pub type Predictions = Vec<usize>;
