use burn::tensor::{backend::Backend, Int, Tensor};

/// Logits whose rank follows the strategy and class count
#[derive(Debug, Clone)]
pub enum Logits<B: Backend> {
    /// Step-wise logits: `[batch_size, max_time, num_classes]`
    Steps(Tensor<B, 3>),

    /// Step-wise binary logits: `[batch_size, max_time]`
    BinarySteps(Tensor<B, 2>),

    /// Sequence-level logits: `[batch_size, num_classes]`
    Sequences(Tensor<B, 2>),

    /// Sequence-level binary logits: `[batch_size]`
    BinarySequences(Tensor<B, 1>),
}

/// Predicted class ids
#[derive(Debug, Clone)]
pub enum Predictions<B: Backend> {
    /// One prediction per time step: `[batch_size, max_time]`
    Steps(Tensor<B, 2, Int>),

    /// One prediction per sequence: `[batch_size]`
    Sequences(Tensor<B, 1, Int>),
}

/// The result of a classifier forward pass
#[derive(Debug, Clone)]
pub struct ClassifierOutput<B: Backend> {
    /// Unnormalized class scores
    pub logits: Logits<B>,

    /// Predicted class ids
    pub preds: Predictions<B>,
}

impl<B: Backend> Logits<B> {
    /// The dimensions of the underlying tensor
    pub fn dims(&self) -> Vec<usize> {
        match self {
            Logits::Steps(logits) => logits.dims().to_vec(),
            Logits::BinarySteps(logits) => logits.dims().to_vec(),
            Logits::Sequences(logits) => logits.dims().to_vec(),
            Logits::BinarySequences(logits) => logits.dims().to_vec(),
        }
    }

    /// The logits flattened in row-major order
    pub fn to_vec(&self) -> Vec<f32> {
        match self {
            Logits::Steps(logits) => logits.to_data().convert::<f32>().value,
            Logits::BinarySteps(logits) => logits.to_data().convert::<f32>().value,
            Logits::Sequences(logits) => logits.to_data().convert::<f32>().value,
            Logits::BinarySequences(logits) => logits.to_data().convert::<f32>().value,
        }
    }
}

impl<B: Backend> Predictions<B> {
    /// The dimensions of the underlying tensor
    pub fn dims(&self) -> Vec<usize> {
        match self {
            Predictions::Steps(preds) => preds.dims().to_vec(),
            Predictions::Sequences(preds) => preds.dims().to_vec(),
        }
    }

    /// The predicted class ids flattened in row-major order
    pub fn to_vec(&self) -> Vec<i64> {
        match self {
            Predictions::Steps(preds) => preds.to_data().convert::<i64>().value,
            Predictions::Sequences(preds) => preds.to_data().convert::<i64>().value,
        }
    }
}
