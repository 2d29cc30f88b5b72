//! Feature preprocessing
//!
//! - Standard scaling for numeric features (train statistics only)
//! - One-hot encoding for categorical features (train categories only)
//! - Pipeline combining both and emitting the feature matrix

mod encoder;
mod pipeline;
mod scaler;

pub use encoder::OneHotEncoder;
pub use pipeline::FeaturePipeline;
pub use scaler::StandardScaler;
