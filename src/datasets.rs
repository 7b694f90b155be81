use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::{Float, LogitError, Matrix, Result, Vector};

/// Train/test partition returned by [`train_test_split`].
#[derive(Debug, Clone)]
pub struct Split {
    pub x_train: Matrix,
    pub x_test: Matrix,
    pub y_train: Vector,
    pub y_test: Vector,
}

/// Randomly partitions rows of `x` and `y` into a training and a test set.
///
/// Row indices are shuffled with a [`StdRng`] seeded from `seed`, so the same
/// seed always yields the same split. The test set holds
/// `ceil(test_size * n)` rows.
///
/// # Errors
///
/// - [`LogitError::ShapeMismatch`] if `y.len() != x.nrows()`.
/// - [`LogitError::InvalidHyperparameter`] if `test_size` is not in `(0, 1)`.
/// - [`LogitError::InsufficientTrainingData`] if either side would be empty.
pub fn train_test_split(x: &Matrix, y: &Vector, test_size: Float, seed: u64) -> Result<Split> {
    let n = x.nrows();

    if y.len() != n {
        return Err(LogitError::ShapeMismatch {
            expected: format!("Expected {} labels", n),
            got: format!("Got {}", y.len()),
        });
    }
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(LogitError::InvalidHyperparameter {
            name: "test_size".into(),
            value: test_size.to_string(),
        });
    }

    let n_test = test_rows(test_size, n);
    if n_test == 0 || n_test >= n {
        return Err(LogitError::InsufficientTrainingData);
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);

    Ok(Split {
        x_train: x.select_rows(train_idx),
        x_test: x.select_rows(test_idx),
        y_train: y.select_rows(train_idx),
        y_test: y.select_rows(test_idx),
    })
}

/// `ceil(test_size * n)`, treating products within `f32` rounding of a whole
/// number as that number (`0.3f32` is slightly above `0.3`, yet `0.3 * 100` is 30 rows).
fn test_rows(test_size: Float, n: usize) -> usize {
    let scaled = f64::from(test_size) * n as f64;
    let nearest = scaled.round();
    if (scaled - nearest).abs() <= f64::from(Float::EPSILON) * scaled {
        nearest as usize
    } else {
        scaled.ceil() as usize
    }
}

/// Generates two linearly separable clusters for demos and benchmarks.
///
/// Class `0` is centered at the origin and class `1` at `(1, 1, ..., 1)`. Each
/// coordinate is jittered uniformly in `[-spread, spread]`; with
/// `spread < 0.5` the classes never overlap. Rows alternate between classes.
pub fn make_two_clusters(
    n_per_class: usize,
    n_features: usize,
    spread: Float,
    seed: u64,
) -> Result<(Matrix, Vector)> {
    if n_per_class == 0 {
        return Err(LogitError::InvalidHyperparameter {
            name: "n_per_class".into(),
            value: "0".into(),
        });
    }
    if n_features == 0 {
        return Err(LogitError::InvalidHyperparameter {
            name: "n_features".into(),
            value: "0".into(),
        });
    }
    if !(spread.is_finite() && spread >= 0.0) {
        return Err(LogitError::InvalidHyperparameter {
            name: "spread".into(),
            value: spread.to_string(),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let rows = 2 * n_per_class;

    let x = Matrix::from_fn(rows, n_features, |i, _| {
        let center = (i % 2) as Float;
        let jitter = if spread > 0.0 {
            rng.random_range(-spread..=spread)
        } else {
            0.0
        };
        center + jitter
    });
    let y = Vector::from_iterator(rows, (0..rows).map(|i| (i % 2) as Float));

    Ok((x, y))
}
