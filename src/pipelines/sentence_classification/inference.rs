use burn::{data::dataloader::batcher::Batcher as _, tensor::backend::Backend};

use crate::{
    modules::{Classifier, ClassifierError, ClassifierOutput, Encoder},
    preprocessing::clean_text,
};

use super::{batcher::Infer, Batcher};

/// Clean, batch and classify raw sentences
pub fn infer<B: Backend, E: Encoder<B>>(
    classifier: &Classifier<B, E>,
    batcher: &Batcher<B>,
    samples: &[&str],
) -> Result<ClassifierOutput<B>, ClassifierError> {
    let sentences: Vec<String> = samples.iter().map(|sample| clean_text(sample)).collect();

    let item: Infer<B> = batcher.batch(sentences);

    classifier.forward(item.tokens, Some(item.sequence_length))
}
