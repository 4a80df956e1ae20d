use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Anything other than alphanumerics and the punctuation kept by the tokenized corpora
    static ref DISALLOWED: Regex = Regex::new(r"[^A-Za-z0-9(),!?'`]").unwrap();

    /// Runs of two or more whitespace characters
    static ref REPEATED_WHITESPACE: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Clean a sentence that has already been tokenized.
///
/// Anything but ASCII letters, digits, parentheses, commas, exclamation and question marks,
/// apostrophes and backticks becomes a space. Whitespace runs are then collapsed to a single
/// space, and the result is trimmed and lowercased.
pub fn clean_text(text: &str) -> String {
    let text = DISALLOWED.replace_all(text, " ");
    let text = REPEATED_WHITESPACE.replace_all(&text, " ");

    text.trim().to_lowercase()
}
