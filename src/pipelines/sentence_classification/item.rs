use std::fmt::Debug;

/// A trait for items that can be used for sentence classification
pub trait Item: Send + Sync + Clone + Debug {
    /// Returns the cleaned input sentence for the item
    fn input(&self) -> &str;

    /// Returns the class label for the item
    fn class_label(&self) -> &str;
}
