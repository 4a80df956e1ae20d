use std::path::Path;

use tokio::fs;
use url::Url;

use crate::{
    preprocessing::{download::maybe_download, transform_raw, vocab::make_vocab, Vocab},
    utils::files::read_file,
};

use super::{split_path, vocab_path, DATASET};

/// Where the raw SST-2 corpora are published
pub static BASE_URL: &str = "https://raw.githubusercontent.com/ZhitingHu/logicnn/master/data/raw/";

/// Raw training corpus, including labeled phrases
pub static RAW_TRAIN: &str = "stsa.binary.phrases.train";

/// Raw development corpus
pub static RAW_DEV: &str = "stsa.binary.dev";

/// Raw test corpus
pub static RAW_TEST: &str = "stsa.binary.test";

/// Prepare SST-2 under `data_path`, fetching the raw corpora from [`BASE_URL`] if needed
pub async fn prepare(data_path: &Path) -> anyhow::Result<()> {
    let base_url = Url::parse(BASE_URL)?;

    prepare_from(data_path, &base_url).await
}

/// Prepare SST-2 under `data_path`, fetching the raw corpora from `base_url` if needed.
///
/// Writes `sst2.{train,dev,test}.sentences.txt`, `sst2.{train,dev,test}.labels.txt` and the
/// training vocabulary `sst2.vocab`.
pub async fn prepare_from(data_path: &Path, base_url: &Url) -> anyhow::Result<()> {
    fs::create_dir_all(data_path).await?;

    if !fs::try_exists(data_path.join(RAW_TRAIN)).await? {
        log::info!("Raw SST-2 data not found in {}", data_path.display());

        for filename in [RAW_TRAIN, RAW_DEV, RAW_TEST] {
            maybe_download(base_url, filename, data_path).await?;
        }
    }

    for (raw, split) in [(RAW_TRAIN, "train"), (RAW_DEV, "dev"), (RAW_TEST, "test")] {
        let new_filename = format!("{}.{}", DATASET, split);

        let (sentences, labels) = transform_raw(data_path, raw, &new_filename)
            .await
            .map_err(|e| anyhow!("Unable to transform {}: {}", raw, e))?;

        log::debug!("Wrote {} and {}", sentences.display(), labels.display());
    }

    let train_sentences = read_file(split_path(data_path, "train", "sentences")).await?;

    let tokens = make_vocab(&train_sentences)?;
    let vocab_file = vocab_path(data_path);
    Vocab::save(&tokens, &vocab_file).await?;

    log::info!("Wrote {} tokens to {}", tokens.len(), vocab_file.display());

    Ok(())
}
