//! # Keyword Vocabularies

pub mod builder;
pub mod counter;
pub mod vocab;

pub use builder::{KeywordBuilder, KeywordOptions, KeywordResults, find_frequent_tokens, suffixes_for_langs};
pub use counter::TokenCounter;
pub use vocab::KeywordVocab;
