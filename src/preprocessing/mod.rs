/// Sentence normalization
pub mod clean;

/// Label-prefixed raw corpora to parallel sentence and label files
pub mod transform;

/// Vocabulary building and lookup
pub mod vocab;

/// Fetching raw corpora
pub mod download;

pub use clean::clean_text;
pub use transform::transform_raw;
pub use vocab::Vocab;
