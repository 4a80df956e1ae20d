/// Classifier Error
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// No classification strategy found for the given string
    #[error("unknown classification strategy: {0}")]
    UnknownStrategy(String),

    /// The `all_time` strategy flattens every time step and needs a fixed length
    #[error("max_seq_length must be set to a positive value when clas_strategy is all_time")]
    MissingMaxSeqLength,

    /// The logit layer keyword arguments could not be interpreted
    #[error("logit_layer_kwargs must be a mapping of linear layer options: {0}")]
    InvalidLogitLayerKwargs(String),

    /// The dropout rate is not a probability
    #[error("dropout must be in [0, 1), got {0}")]
    InvalidDropout(f64),

    /// The input is longer than the length the `all_time` strategy was configured for
    #[error("input has {time} time steps, more than max_seq_length ({max_seq_length})")]
    SequenceTooLong {
        /// Time steps in the input
        time: usize,
        /// Configured maximum
        max_seq_length: usize,
    },

    /// The input has no time steps to classify
    #[error("input has an empty time dimension")]
    EmptySequence,
}
