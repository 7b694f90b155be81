#[cfg(feature = "rng")]
pub mod datasets;
pub mod metrics;
pub mod preprocessors;

// Re-export public API
pub use logit_core::*;
pub use logit_models::*;

#[cfg(feature = "rng")]
pub use datasets::*;
pub use metrics::*;
pub use preprocessors::*;
