use std::{collections::BTreeMap, hash::Hash};

/// Swap the keys and values of a mapping, e.g. ids to labels into labels to ids
pub fn invert_map<K, V, MK, MV>(original: MK) -> MV
where
    K: Ord + Hash + Eq,
    V: Ord + Hash + Eq + Clone,
    MK: IntoIterator<Item = (K, V)>,
    MV: FromIterator<(V, K)>,
{
    original
        .into_iter()
        .map(|(key, value)| (value, key))
        .collect()
}

/// Number class labels in order, returning the label-to-id mapping
pub fn index_labels<S: AsRef<str>>(labels: &[S]) -> BTreeMap<String, usize> {
    let id2label: BTreeMap<usize, String> = labels
        .iter()
        .map(|label| label.as_ref().trim().to_string())
        .enumerate()
        .collect();

    invert_map(id2label)
}
