/// BERT as a feature extractor for classifiers
pub mod encoder;

/// BERT classifier configuration
pub mod classifier;

pub use classifier::{Classifier, Config};
pub use encoder::Encoder;
