use std::collections::BTreeMap;

use burn::{
    data::dataloader,
    tensor::{backend::Backend, Int, Tensor},
};
use derive_new::new;

use crate::{
    preprocessing::Vocab,
    utils::{
        classes::index_labels,
        tensors::{pad_to, to_int_tensor},
    },
};

use super::Item;

/// An inference batch for sentence classification
#[derive(Debug, Clone, new)]
pub struct Infer<B: Backend> {
    /// Token ids as 2D tensor: [batch_size, max_time]
    pub tokens: Tensor<B, 2, Int>,

    /// Number of real tokens in each sequence: [batch_size]
    pub sequence_length: Tensor<B, 1, Int>,
}

/// A labeled batch for sentence classification
#[derive(Clone, Debug, new)]
pub struct Labeled<B: Backend> {
    /// Classifier input
    pub input: Infer<B>,

    /// Class ids for the batch
    pub targets: Tensor<B, 1, Int>,
}

/// Struct for batching sentence classification items
#[derive(Clone)]
pub struct Batcher<B: Backend> {
    /// Vocabulary for converting tokens to ids
    pub vocab: Vocab,

    /// Maximum sequence length for tokenized text
    pub max_seq_length: usize,

    /// A mapping from class name labels to class ids
    pub label2id: BTreeMap<String, usize>,

    /// Device on which to perform computation (e.g., CPU or CUDA device)
    pub device: B::Device,
}

impl<B: Backend> Batcher<B> {
    /// Creates a new batcher
    pub fn new<S: AsRef<str>>(
        vocab: Vocab,
        max_seq_length: usize,
        labels: &[S],
        device: B::Device,
    ) -> Self {
        Self {
            vocab,
            max_seq_length,
            label2id: index_labels(labels),
            device,
        }
    }

    /// Token ids of a cleaned sentence, truncated to the maximum sequence length
    pub fn token_ids(&self, sentence: &str) -> Vec<usize> {
        sentence
            .split_whitespace()
            .take(self.max_seq_length)
            .map(|token| self.vocab.token_to_id(token))
            .collect()
    }
}

/// Implement Batcher trait for Batcher struct for inference
impl<B: Backend> dataloader::batcher::Batcher<String, Infer<B>> for Batcher<B> {
    /// Collects a vector of sentences into an inference batch
    fn batch(&self, items: Vec<String>) -> Infer<B> {
        let token_ids_list: Vec<Vec<usize>> =
            items.iter().map(|item| self.token_ids(item)).collect();

        let lengths: Vec<usize> = token_ids_list.iter().map(Vec::len).collect();
        let max_time = lengths.iter().copied().max().unwrap_or(0).max(1);

        Infer {
            tokens: pad_to(
                self.vocab.pad_token_id(),
                token_ids_list,
                max_time,
                &self.device,
            ),
            sequence_length: to_int_tensor(&lengths, &self.device),
        }
    }
}

/// Implement Batcher trait for Batcher struct for labeled items
impl<B: Backend, I: Item> dataloader::batcher::Batcher<I, Labeled<B>> for Batcher<B> {
    /// Collects a vector of labeled items into a batch with targets.
    ///
    /// Items whose label the batcher does not know are left out of the batch.
    fn batch(&self, items: Vec<I>) -> Labeled<B> {
        let mut inputs = Vec::with_capacity(items.len());
        let mut class_ids = Vec::with_capacity(items.len());

        for item in &items {
            match self.label2id.get(item.class_label()) {
                Some(class_id) => {
                    inputs.push(item.input().to_string());
                    class_ids.push(*class_id);
                }
                None => log::warn!("Skipping item with unknown label {:?}", item.class_label()),
            }
        }

        let input = dataloader::batcher::Batcher::<String, Infer<B>>::batch(self, inputs);

        Labeled {
            input,
            targets: to_int_tensor(&class_ids, &self.device),
        }
    }
}
