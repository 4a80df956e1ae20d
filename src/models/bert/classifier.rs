//! BERT as the encoder of a [`modules::Classifier`]

use bert_burn::model::BertModelConfig;
use burn::tensor::backend::Backend;

use crate::modules::{self, ClassifierConfig, ClassifierError};

use super::Encoder;

/// A classifier running on BERT hidden states
pub type Classifier<B> = modules::Classifier<B, Encoder<B>>;

/// The BERT Classifier Configuration
#[derive(burn::config::Config)]
pub struct Config {
    /// The base BERT config
    pub model: BertModelConfig,

    /// Classification strategy, class count and logit layer options
    pub classifier: ClassifierConfig,
}

impl Config {
    /// Initializes a BERT classifier with default weights
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<Classifier<B>, ClassifierError> {
        let encoder = Encoder::new(
            self.model.init(device),
            self.model.hidden_size,
            self.model.pad_token_id,
        );

        self.classifier.init(encoder, device)
    }
}
