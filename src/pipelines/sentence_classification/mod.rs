/// Batcher
pub mod batcher;

/// Sentence Classification Items
pub mod item;

/// Inference
pub mod inference;

pub use batcher::Batcher;
pub use inference::infer;
pub use item::Item;
