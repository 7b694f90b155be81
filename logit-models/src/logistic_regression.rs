use std::borrow::Cow;

use log::{debug, info};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use logit_core::loss::half_mean_squared_error;
use logit_core::utils::{check_binary_labels, with_intercept};
use logit_core::{sigmoid, sigmoid_vec, Float, LogitError, Matrix, Predictions, Result, Vector};

/// Hyperparameters for [`LogisticRegression`].
///
/// Built with the `with_*` methods and then handed to
/// [`LogisticRegression::new`], which validates it. Once inside the model the
/// configuration is read-only.
///
/// # Defaults
///
/// | field           | default |
/// |-----------------|---------|
/// | `learning_rate` | `0.01`  |
/// | `iterations`    | `100`   |
/// | `tolerance`     | `0.0` (early stop disabled) |
/// | `l2`            | `0.0` (no shrinkage) |
/// | `intercept`     | `true`  |
/// | `verbose`       | `true`  |
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegressionConfig {
    learning_rate: Float,
    iterations: usize,
    tolerance: Float,
    l2: Float,
    intercept: bool,
    verbose: bool,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            iterations: 100,
            tolerance: 0.0,
            l2: 0.0,
            intercept: true,
            verbose: true,
        }
    }
}

impl LogisticRegressionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gradient step size. Must be finite and `> 0`.
    pub fn with_learning_rate(mut self, learning_rate: Float) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Number of epochs. Must be `> 0`.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Training stops as soon as the epoch cost falls strictly below this value.
    /// `0.0` disables early stopping.
    pub fn with_tolerance(mut self, tolerance: Float) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// L2 shrinkage factor applied as `theta *= 1 - learning_rate * l2` every epoch.
    pub fn with_l2(mut self, l2: Float) -> Self {
        self.l2 = l2;
        self
    }

    /// Whether to prepend a constant column of ones to every feature matrix.
    pub fn with_intercept(mut self, intercept: bool) -> Self {
        self.intercept = intercept;
        self
    }

    /// Whether to log progress at every tenth of the run.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn learning_rate(&self) -> Float {
        self.learning_rate
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn tolerance(&self) -> Float {
        self.tolerance
    }

    pub fn l2(&self) -> Float {
        self.l2
    }

    pub fn intercept(&self) -> bool {
        self.intercept
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Checks every field against its allowed range.
    ///
    /// # Errors
    ///
    /// - [`LogitError::InvalidHyperparameter`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(invalid("learning_rate", self.learning_rate));
        }
        if self.iterations == 0 {
            return Err(invalid("iterations", self.iterations));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(invalid("tolerance", self.tolerance));
        }
        if !(self.l2.is_finite() && self.l2 >= 0.0) {
            return Err(invalid("l2", self.l2));
        }
        Ok(())
    }

    /// `true` when `epoch` falls on a tenth of the run.
    ///
    /// Equivalent to `epoch / (iterations / 10)` being a whole number under real
    /// division, so runs of ten epochs or fewer report every epoch.
    fn is_checkpoint(&self, epoch: usize) -> bool {
        (epoch as u128 * 10) % self.iterations as u128 == 0
    }
}

fn invalid(name: &str, value: impl ToString) -> LogitError {
    LogitError::InvalidHyperparameter {
        name: name.into(),
        value: value.to_string(),
    }
}

/// Output selector for [`FittedLogisticRegression::predict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionMode {
    /// Thresholded class labels: `1` where the probability exceeds `0.5`.
    Labels,
    /// Raw linear scores `x · theta`, before the sigmoid.
    Scores,
}

/// Result of a prediction call; the variant follows the requested [`PredictionMode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Labels(Predictions),
    Scores(Vector),
}

impl Prediction {
    /// Number of predicted examples.
    pub fn len(&self) -> usize {
        match self {
            Prediction::Labels(l) => l.len(),
            Prediction::Scores(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_labels(self) -> Option<Predictions> {
        match self {
            Prediction::Labels(l) => Some(l),
            Prediction::Scores(_) => None,
        }
    }

    pub fn into_scores(self) -> Option<Vector> {
        match self {
            Prediction::Scores(s) => Some(s),
            Prediction::Labels(_) => None,
        }
    }
}

/// Coefficients produced by a completed training run.
///
/// This is an immutable value: every method takes `&self`, so a fitted model can
/// be shared across threads for concurrent inference once training is done.
///
/// # Stored parameters
///
/// - `theta`: coefficient vector. With an intercept, `theta[0]` is the
///   intercept coefficient and `theta[1..]` are the feature weights.
/// - `intercept`: whether inputs are augmented with a ones column. Captured from
///   the configuration at training time so `fit` and `predict` always agree.
/// - `epochs`: number of epochs actually executed (fewer than configured when
///   training stopped early).
/// - `cost_history`: the cost computed at each executed epoch.
///
/// Deserialized values go through the same checks as
/// [`from_coefficients`](Self::from_coefficients).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "FittedParts"))]
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLogisticRegression {
    theta: Vector,
    intercept: bool,
    epochs: usize,
    cost_history: Vec<Float>,
}

/// Unchecked field layout of [`FittedLogisticRegression`] as read by serde.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct FittedParts {
    theta: Vector,
    intercept: bool,
    epochs: usize,
    cost_history: Vec<Float>,
}

#[cfg(feature = "serde")]
impl TryFrom<FittedParts> for FittedLogisticRegression {
    type Error = LogitError;

    fn try_from(parts: FittedParts) -> Result<Self> {
        if parts.epochs != parts.cost_history.len() {
            return Err(LogitError::InvalidValue {
                message: format!(
                    "{} epochs recorded with {} costs",
                    parts.epochs,
                    parts.cost_history.len()
                ),
            });
        }
        let mut fitted = Self::from_coefficients(parts.theta, parts.intercept)?;
        fitted.epochs = parts.epochs;
        fitted.cost_history = parts.cost_history;
        Ok(fitted)
    }
}

impl FittedLogisticRegression {
    /// Rebuilds a model from coefficients obtained elsewhere (e.g. loaded by the caller).
    ///
    /// The result has no training history.
    ///
    /// # Errors
    ///
    /// - [`LogitError::ShapeMismatch`] if `theta` leaves no room for at least one feature.
    pub fn from_coefficients(theta: Vector, intercept: bool) -> Result<Self> {
        let min = if intercept { 2 } else { 1 };
        if theta.len() < min {
            return Err(LogitError::ShapeMismatch {
                expected: format!("Expected at least {} coefficients", min),
                got: format!("Got {}", theta.len()),
            });
        }
        Ok(Self {
            theta,
            intercept,
            epochs: 0,
            cost_history: Vec::new(),
        })
    }

    pub fn theta(&self) -> &Vector {
        &self.theta
    }

    pub fn intercept(&self) -> bool {
        self.intercept
    }

    /// Number of raw input features expected by [`predict`](Self::predict).
    pub fn n_features(&self) -> usize {
        if self.intercept {
            self.theta.len() - 1
        } else {
            self.theta.len()
        }
    }

    pub fn epochs_run(&self) -> usize {
        self.epochs
    }

    pub fn cost_history(&self) -> &[Float] {
        &self.cost_history
    }

    /// Cost of the last executed epoch.
    pub fn final_cost(&self) -> Option<Float> {
        self.cost_history.last().copied()
    }

    /// Raw linear scores `x · theta` per example, before the sigmoid.
    ///
    /// # Errors
    ///
    /// - [`LogitError::ShapeMismatch`] if `x.ncols()` differs from
    ///   [`n_features`](Self::n_features).
    pub fn decision_function(&self, x: &Matrix) -> Result<Vector> {
        if x.ncols() != self.n_features() {
            return Err(LogitError::ShapeMismatch {
                expected: format!("Expected {} features", self.n_features()),
                got: format!("Got {}", x.ncols()),
            });
        }

        let design = if self.intercept {
            Cow::Owned(with_intercept(x))
        } else {
            Cow::Borrowed(x)
        };

        Ok(self.scores(&design))
    }

    #[cfg(not(feature = "parallel"))]
    fn scores(&self, design: &Matrix) -> Vector {
        design * &self.theta
    }

    #[cfg(feature = "parallel")]
    fn scores(&self, design: &Matrix) -> Vector {
        let theta = &self.theta;
        let rows: Vec<Float> = (0..design.nrows())
            .into_par_iter()
            .map(|i| {
                design
                    .row(i)
                    .iter()
                    .zip(theta.iter())
                    .map(|(&a, &t)| a * t)
                    .sum::<Float>()
            })
            .collect();
        Vector::from_vec(rows)
    }

    /// Probability of class `1` per example: `sigmoid(x · theta)`.
    pub fn predict_proba(&self, x: &Matrix) -> Result<Vector> {
        Ok(sigmoid_vec(&self.decision_function(x)?))
    }

    /// Class labels: `1` where the probability is strictly above `0.5`, else `0`.
    pub fn predict_labels(&self, x: &Matrix) -> Result<Predictions> {
        let scores = self.decision_function(x)?;
        Ok(scores
            .iter()
            .map(|&z| usize::from(sigmoid(z) > 0.5))
            .collect())
    }

    /// Predicts labels or scores depending on `mode`.
    ///
    /// Note the asymmetry: [`PredictionMode::Labels`] thresholds the
    /// *probability*, while [`PredictionMode::Scores`] returns the raw
    /// pre-sigmoid score rather than that probability. Use
    /// [`predict_proba`](Self::predict_proba) for probabilities.
    pub fn predict(&self, x: &Matrix, mode: PredictionMode) -> Result<Prediction> {
        match mode {
            PredictionMode::Labels => self.predict_labels(x).map(Prediction::Labels),
            PredictionMode::Scores => self.decision_function(x).map(Prediction::Scores),
        }
    }
}

/// Binary **logistic regression** trained with batch gradient descent.
///
/// The model estimates a coefficient vector `θ` for the decision rule
///
/// ```text
/// p(y = 1 | x) = σ(x · θ)
/// ```
///
/// # Training
///
/// Every epoch uses the full training set:
///
/// ```text
/// p    = σ(X θ)
/// g    = Xᵀ (p − y)
/// θ   ← θ (1 − η λ) − η g
/// cost = Σ (p − y)² / (2 n)
/// ```
///
/// where `η` is the learning rate and `λ` the L2 factor. `θ` starts at all ones.
/// The shrinkage applies to every coefficient, the intercept included. The cost
/// is measured on the predictions made before the update, and once it drops
/// strictly below the tolerance training stops with the freshly updated `θ`.
///
/// # Stored state
///
/// - `config`: immutable hyperparameters, validated in [`new`](Self::new).
/// - `fitted`: `Some(model)` after a successful [`fit`](Self::fit); `None` before.
///
/// # Concurrency
///
/// [`fit`](Self::fit) takes `&mut self`, so only one training run can be in
/// flight per instance. For concurrent inference use [`train`](Self::train) or
/// [`model`](Self::model) and share the resulting [`FittedLogisticRegression`].
///
/// # Errors
///
/// - [`LogitError::InvalidHyperparameter`] from [`new`](Self::new).
/// - [`LogitError::EmptyTrainingData`] if `X` has zero rows.
/// - [`LogitError::ShapeMismatch`] if `X` has zero columns, `y.len() != X.nrows()`
///   or prediction inputs have the wrong number of features.
/// - [`LogitError::InvalidTrainingData`] if a label is not `0` or `1`.
/// - [`LogitError::NotFitted`] if predicting before fitting.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    config: LogisticRegressionConfig,
    fitted: Option<FittedLogisticRegression>,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self {
            config: LogisticRegressionConfig::default(),
            fitted: None,
        }
    }
}

impl LogisticRegression {
    /// Creates a new, unfitted model with the given configuration.
    pub fn new(config: LogisticRegressionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fitted: None,
        })
    }

    pub fn config(&self) -> &LogisticRegressionConfig {
        &self.config
    }

    /// The model stored by the last successful [`fit`](Self::fit).
    pub fn model(&self) -> Option<&FittedLogisticRegression> {
        self.fitted.as_ref()
    }

    /// Coefficients of the stored model.
    pub fn theta(&self) -> Option<&Vector> {
        self.fitted.as_ref().map(FittedLogisticRegression::theta)
    }

    /// Trains on `x` and `y`, stores the result and returns the coefficients.
    ///
    /// On error the previously stored model, if any, is kept.
    pub fn fit(&mut self, x: &Matrix, y: &Vector) -> Result<Vector> {
        let fitted = self.train(x, y)?;
        let theta = fitted.theta.clone();
        self.fitted = Some(fitted);
        Ok(theta)
    }

    /// Runs gradient descent and returns the fitted model without storing it.
    ///
    /// # Complexity
    ///
    /// Let `n = nrows`, `d = ncols` (plus one with intercept), `T = iterations`:
    /// - Time: `O(T n d)`
    /// - Memory: `O(n d)` for the intercept-augmented copy of `X`
    pub fn train(&self, x: &Matrix, y: &Vector) -> Result<FittedLogisticRegression> {
        let n = x.nrows();

        if n == 0 {
            return Err(LogitError::EmptyTrainingData);
        }
        if x.ncols() == 0 {
            return Err(LogitError::ShapeMismatch {
                expected: "Expected at least 1 feature".into(),
                got: "Got 0".into(),
            });
        }
        if y.len() != n {
            return Err(LogitError::ShapeMismatch {
                expected: format!("Expected {} labels", n),
                got: format!("Got {}", y.len()),
            });
        }
        check_binary_labels(y)?;

        let cfg = &self.config;
        let design = if cfg.intercept {
            Cow::Owned(with_intercept(x))
        } else {
            Cow::Borrowed(x)
        };
        let d = design.ncols();

        debug!(
            "fitting logistic regression on {} examples x {} coefficients for up to {} epochs",
            n, d, cfg.iterations
        );

        let shrink = 1.0 - cfg.learning_rate * cfg.l2;
        let mut theta = Vector::from_element(d, 1.0);
        let mut cost_history = Vec::with_capacity(cfg.iterations);

        for epoch in 0..cfg.iterations {
            let predicted = sigmoid_vec(&(&*design * &theta));
            let residual = predicted - y;
            let gradient = design.tr_mul(&residual);

            theta = theta * shrink - gradient * cfg.learning_rate;

            let cost = half_mean_squared_error(&residual);
            cost_history.push(cost);

            if cfg.verbose && cfg.is_checkpoint(epoch) {
                info!("iteration: {}", epoch);
                info!("theta: {:?}", theta.as_slice());
                info!("cost: {}", cost);
            }

            if cost < cfg.tolerance {
                debug!("cost {} below tolerance {} at epoch {}", cost, cfg.tolerance, epoch);
                break;
            }
        }

        let epochs = cost_history.len();
        debug!(
            "finished after {} epochs, final cost {:?}",
            epochs,
            cost_history.last()
        );

        Ok(FittedLogisticRegression {
            theta,
            intercept: cfg.intercept,
            epochs,
            cost_history,
        })
    }

    /// Predicts with the stored model.
    ///
    /// `labels == true` returns [`Prediction::Labels`], otherwise
    /// [`Prediction::Scores`] holding raw pre-sigmoid scores.
    ///
    /// # Errors
    ///
    /// - [`LogitError::NotFitted`] if [`fit`](Self::fit) has not succeeded yet.
    /// - [`LogitError::ShapeMismatch`] if `x` has the wrong number of features.
    pub fn predict(&self, x: &Matrix, labels: bool) -> Result<Prediction> {
        let mode = if labels {
            PredictionMode::Labels
        } else {
            PredictionMode::Scores
        };
        self.fitted()?.predict(x, mode)
    }

    pub fn predict_labels(&self, x: &Matrix) -> Result<Predictions> {
        self.fitted()?.predict_labels(x)
    }

    pub fn predict_scores(&self, x: &Matrix) -> Result<Vector> {
        self.fitted()?.decision_function(x)
    }

    pub fn predict_proba(&self, x: &Matrix) -> Result<Vector> {
        self.fitted()?.predict_proba(x)
    }

    fn fitted(&self) -> Result<&FittedLogisticRegression> {
        self.fitted.as_ref().ok_or(LogitError::NotFitted)
    }
}
