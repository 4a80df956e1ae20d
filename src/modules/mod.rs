/// The encoder seam used by classifiers
pub mod encoder;

/// Encoder-backed classifier supporting step-wise and sequence-level strategies
pub mod classifier;

pub use classifier::{Classifier, ClassifierConfig, ClassifierError, ClassifierOutput};
pub use encoder::Encoder;
