pub mod activation;
pub mod error;
pub mod loss;
pub mod types;
pub mod utils;

pub use types::{Float, Matrix, Predictions, Vector};

pub use error::{LogitError, Result};

pub use activation::{sigmoid, sigmoid_vec};
