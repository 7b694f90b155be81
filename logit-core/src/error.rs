use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum LogitError {
    /// Shape or dimensionality mismatch
    ShapeMismatch { expected: String, got: String },

    /// Model used before calling `fit`
    NotFitted,

    /// The training dataset contains zero samples.
    EmptyTrainingData,

    /// Not enough rows to satisfy the request (e.g. a split leaving one side empty).
    InsufficientTrainingData,

    /// Invalid Hyperparameter Value
    InvalidHyperparameter { name: String, value: String },

    /// Training data violates a precondition, such as labels outside `{0, 1}`.
    InvalidTrainingData { message: String },

    /// Invalid value
    InvalidValue { message: String },
}

impl fmt::Display for LogitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogitError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: {expected}, {got}")
            }
            LogitError::NotFitted => write!(f, "model used before calling fit"),
            LogitError::EmptyTrainingData => write!(f, "training data contains no samples"),
            LogitError::InsufficientTrainingData => {
                write!(f, "not enough samples for the requested operation")
            }
            LogitError::InvalidHyperparameter { name, value } => {
                write!(f, "invalid hyperparameter {name} = {value}")
            }
            LogitError::InvalidTrainingData { message } => {
                write!(f, "invalid training data: {message}")
            }
            LogitError::InvalidValue { message } => write!(f, "invalid value: {message}"),
        }
    }
}

impl std::error::Error for LogitError {}

pub type Result<T> = std::result::Result<T, LogitError>;
