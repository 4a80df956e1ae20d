use burn::{
    module::Module,
    tensor::{backend::Backend, Int, Tensor},
};

/// A module producing one feature vector per input token
pub trait Encoder<B: Backend>: Module<B> {
    /// The size of the feature vector produced for each time step
    fn output_size(&self) -> usize;

    /// Encode token ids of shape `[batch_size, max_time]` into features of shape
    /// `[batch_size, max_time, output_size]`.
    ///
    /// Tokens at or beyond `sequence_length` (shape `[batch_size]`) are treated as padding.
    fn forward(
        &self,
        inputs: Tensor<B, 2, Int>,
        sequence_length: Option<Tensor<B, 1, Int>>,
    ) -> Tensor<B, 3>;
}
