use bert_burn::{
    data::BertInferenceBatch,
    model::{BertModel, BertModelOutput},
};
use burn::{
    module::Module,
    tensor::{backend::Backend, Bool, Int, Tensor},
};
use derive_new::new;

use crate::modules;

/// BERT producing one hidden state per token
#[derive(Module, Debug, new)]
pub struct Encoder<B: Backend> {
    /// The base BERT model
    pub model: BertModel<B>,

    /// Size of the hidden states
    pub hidden_size: usize,

    /// Index of the padding token, used to mask inputs that come without lengths
    pub pad_token_id: usize,
}

impl<B: Backend> Encoder<B> {
    /// Padding mask that is true at and beyond each sequence's length
    fn mask_pad(
        &self,
        inputs: &Tensor<B, 2, Int>,
        sequence_length: Option<Tensor<B, 1, Int>>,
    ) -> Tensor<B, 2, Bool> {
        let [batch_size, time] = inputs.dims();

        match sequence_length {
            Some(sequence_length) => {
                let positions = Tensor::<B, 1, Int>::arange(0..time as i64, &inputs.device())
                    .reshape([1, time])
                    .repeat(0, batch_size);

                positions.greater_equal(sequence_length.reshape([batch_size, 1]).repeat(1, time))
            }
            None => inputs.clone().equal_elem(self.pad_token_id as i64),
        }
    }
}

impl<B: Backend> modules::Encoder<B> for Encoder<B> {
    fn output_size(&self) -> usize {
        self.hidden_size
    }

    fn forward(
        &self,
        inputs: Tensor<B, 2, Int>,
        sequence_length: Option<Tensor<B, 1, Int>>,
    ) -> Tensor<B, 3> {
        let mask_pad = self.mask_pad(&inputs, sequence_length);

        let BertModelOutput { hidden_states, .. } = self.model.forward(BertInferenceBatch {
            tokens: inputs,
            mask_pad,
        });

        hidden_states
    }
}
