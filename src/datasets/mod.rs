use async_trait::async_trait;

/// The SST-2 binary sentiment dataset
pub mod sst2;

/// A dataset which can be loaded from a prepared data directory
#[async_trait]
pub trait LoadableDataset<I>: burn::data::dataset::Dataset<I> {
    /// Load the given split (e.g. "train", "dev" or "test")
    async fn load(data_dir: &str, split: &str) -> Result<Self, DatasetError>
    where
        Self: std::marker::Sized;
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// No split found for the given string
    #[error("no split found for {0}")]
    UnknownSplit(String),

    /// The sentence and label files have a different number of lines
    #[error("{sentences} sentences but {labels} labels")]
    Misaligned {
        /// Lines in the sentence file
        sentences: usize,
        /// Lines in the label file
        labels: usize,
    },

    /// A label outside the dataset's classes
    #[error("unknown label {label:?} on line {line}")]
    UnknownLabel {
        /// The offending label
        label: String,
        /// 1-based line number in the label file
        line: usize,
    },

    /// The prepared files could not be read
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
