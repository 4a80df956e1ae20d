use std::path::{Path, PathBuf};

use tokio::io;

use crate::utils::files::{read_file, write_lines};

use super::clean_text;

/// Split a raw line into its label and cleaned sentence
pub fn split_raw_line(line: &str) -> Option<(String, String)> {
    let mut parts = line.split_whitespace();
    let label = parts.next()?;
    let sentence = parts.collect::<Vec<_>>().join(" ");

    Some((label.to_string(), clean_text(&sentence)))
}

/// Transform a raw corpus of label-prefixed lines into parallel sentence and label files.
///
/// Reads `raw_filename` from `data_path` and writes `{new_filename}.sentences.txt` and
/// `{new_filename}.labels.txt` next to it, one example per line in the original order.
/// Returns the sentence and label file paths.
pub async fn transform_raw(
    data_path: &Path,
    raw_filename: &str,
    new_filename: &str,
) -> io::Result<(PathBuf, PathBuf)> {
    let lines = read_file(data_path.join(raw_filename)).await?;

    let mut sentences = Vec::with_capacity(lines.len());
    let mut labels = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        let (label, sentence) = split_raw_line(line).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{}:{} has no label", raw_filename, i + 1),
            )
        })?;

        sentences.push(sentence);
        labels.push(label);
    }

    let sentences_path = data_path.join(format!("{}.sentences.txt", new_filename));
    let labels_path = data_path.join(format!("{}.labels.txt", new_filename));

    write_lines(&sentences_path, &sentences).await?;
    write_lines(&labels_path, &labels).await?;

    Ok((sentences_path, labels_path))
}
