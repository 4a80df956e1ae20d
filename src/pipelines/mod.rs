/// Sentence Classification (such as sentiment analysis)
pub mod sentence_classification;
