use std::path::{Path, PathBuf};

use async_trait::async_trait;
use burn::data::dataset::{self, Dataset as _, InMemDataset};
use derive_new::new;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{pipelines::sentence_classification, utils::files::read_file};

use super::{DatasetError, LoadableDataset};

/// Download, transformation and vocabulary extraction
pub mod prepare;

pub use prepare::prepare;

/// The name of the SST-2 dataset
pub static DATASET: &str = "sst2";

/// The splits produced by preparation
pub static SPLITS: [&str; 3] = ["train", "dev", "test"];

/// The class labels: negative and positive sentiment
pub static LABELS: [&str; 2] = ["0", "1"];

/// Path of a prepared split file, e.g. `sst2.train.sentences.txt` for `("train", "sentences")`
pub fn split_path(data_dir: &Path, split: &str, kind: &str) -> PathBuf {
    data_dir.join(format!("{}.{}.{}.txt", DATASET, split, kind))
}

/// Path of the prepared vocabulary file
pub fn vocab_path(data_dir: &Path) -> PathBuf {
    data_dir.join(format!("{}.vocab", DATASET))
}

/// A cleaned SST-2 sentence and its sentiment label
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, new)]
pub struct Item {
    /// The cleaned sentence
    pub sentence: String,

    /// The sentiment label, "0" or "1"
    pub label: String,
}

impl sentence_classification::Item for Item {
    fn input(&self) -> &str {
        &self.sentence
    }

    fn class_label(&self) -> &str {
        &self.label
    }
}

/// Struct for the SST-2 dataset
pub struct Dataset {
    /// Underlying In-Memory dataset
    dataset: InMemDataset<Item>,
}

/// Implement the Dataset trait for the SST-2 dataset
impl dataset::Dataset<Item> for Dataset {
    /// Returns a specific item from the dataset
    fn get(&self, index: usize) -> Option<Item> {
        self.dataset.get(index)
    }

    /// Returns the length of the dataset
    fn len(&self) -> usize {
        self.dataset.len()
    }
}

#[async_trait]
impl LoadableDataset<Item> for Dataset {
    async fn load(data_dir: &str, split: &str) -> Result<Self, DatasetError> {
        Dataset::load(Path::new(data_dir), split).await
    }
}

// Implement methods for constructing the SST-2 dataset
impl Dataset {
    /// Load a prepared split from its parallel sentence and label files
    pub async fn load(data_dir: &Path, split: &str) -> Result<Self, DatasetError> {
        if !SPLITS.contains(&split) {
            return Err(DatasetError::UnknownSplit(split.to_string()));
        }

        let sentences = read_file(split_path(data_dir, split, "sentences")).await?;
        let labels = read_file(split_path(data_dir, split, "labels")).await?;

        if sentences.len() != labels.len() {
            return Err(DatasetError::Misaligned {
                sentences: sentences.len(),
                labels: labels.len(),
            });
        }

        if let Some((i, label)) = labels
            .iter()
            .enumerate()
            .find(|(_, label)| !LABELS.contains(&label.as_str()))
        {
            return Err(DatasetError::UnknownLabel {
                label: label.clone(),
                line: i + 1,
            });
        }

        let items = sentences
            .into_iter()
            .zip(labels)
            .map(|(sentence, label)| Item::new(sentence, label))
            .collect();

        Ok(Self {
            dataset: InMemDataset::new(items),
        })
    }

    /// Returns random samples from the training split
    pub async fn get_samples(data_dir: &Path, count: usize) -> Result<Vec<Item>, DatasetError> {
        let data = Self::load(data_dir, "train").await?;
        if data.is_empty() {
            return Ok(Vec::new());
        }

        let mut rng = rand::thread_rng();

        let samples = (0..count)
            .filter_map(|_| data.get(rng.gen_range(0..data.len())))
            .collect();

        Ok(samples)
    }
}
