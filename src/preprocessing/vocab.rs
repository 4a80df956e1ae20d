use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
};

use tokenizers::{
    models::wordlevel::{WordLevel, WordLevelTrainer},
    Model as _, Trainer as _,
};
use tokio::io;

use crate::utils::{
    classes::invert_map,
    files::{read_file, write_lines},
};

/// Padding token
pub static PAD_TOKEN: &str = "<PAD>";

/// Beginning-of-sequence token
pub static BOS_TOKEN: &str = "<BOS>";

/// End-of-sequence token
pub static EOS_TOKEN: &str = "<EOS>";

/// Out-of-vocabulary token
pub static UNK_TOKEN: &str = "<UNK>";

/// Collect the distinct whitespace-separated tokens of `sentences`, most frequent first.
///
/// Tokens with the same count are ordered lexicographically.
pub fn make_vocab<S: AsRef<str> + Sync>(sentences: &[S]) -> anyhow::Result<Vec<String>> {
    let mut trainer = WordLevelTrainer::builder()
        .vocab_size(usize::MAX)
        .show_progress(false)
        .build()
        .map_err(|e| anyhow!("Unable to configure the vocabulary trainer: {}", e))?;

    trainer
        .feed(sentences.iter(), |sentence| {
            Ok(sentence.split_whitespace().map(str::to_owned).collect())
        })
        .map_err(|e| anyhow!("Unable to count vocabulary tokens: {}", e))?;

    let mut model = WordLevel::default();
    trainer
        .train(&mut model)
        .map_err(|e| anyhow!("Unable to build the vocabulary: {}", e))?;

    let mut tokens = model.get_vocab().into_iter().collect::<Vec<_>>();
    tokens.sort_by_key(|(_, id)| *id);

    Ok(tokens.into_iter().map(|(token, _)| token).collect())
}

/// A token vocabulary with reserved special tokens
#[derive(Debug, Clone)]
pub struct Vocab {
    /// A mapping from token ids to tokens
    id2token: BTreeMap<usize, String>,

    /// A mapping from tokens to token ids
    token2id: HashMap<String, usize>,
}

impl Vocab {
    /// Build a vocabulary from plain tokens, after the special tokens
    pub fn new<S: AsRef<str>>(tokens: &[S]) -> Self {
        let id2token: BTreeMap<usize, String> = [PAD_TOKEN, BOS_TOKEN, EOS_TOKEN, UNK_TOKEN]
            .into_iter()
            .chain(tokens.iter().map(|token| token.as_ref()))
            .map(str::to_string)
            .enumerate()
            .collect();

        let token2id = invert_map(id2token.clone());

        Self { id2token, token2id }
    }

    /// Load a vocabulary file with one token per line
    pub async fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let tokens = read_file(path).await?;

        Ok(Self::new(&tokens))
    }

    /// Write plain tokens to a vocabulary file, one per line
    pub async fn save<S: AsRef<str>>(tokens: &[S], path: impl AsRef<Path>) -> io::Result<()> {
        write_lines(path, tokens).await
    }

    /// Number of tokens, special tokens included
    pub fn size(&self) -> usize {
        self.token2id.len()
    }

    /// The id of a token, or the id of [`UNK_TOKEN`] if it is unknown
    pub fn token_to_id(&self, token: &str) -> usize {
        self.token2id
            .get(token)
            .copied()
            .unwrap_or_else(|| self.unk_token_id())
    }

    /// The token with the given id
    pub fn id_to_token(&self, id: usize) -> Option<&str> {
        self.id2token.get(&id).map(String::as_str)
    }

    /// Id of [`PAD_TOKEN`]
    pub fn pad_token_id(&self) -> usize {
        self.token2id[PAD_TOKEN]
    }

    /// Id of [`UNK_TOKEN`]
    pub fn unk_token_id(&self) -> usize {
        self.token2id[UNK_TOKEN]
    }
}
