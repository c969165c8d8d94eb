//! # Keyword Vocabulary

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// An ordered list of distinct keywords; a keyword's position is its id.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordVocab {
    keywords: Vec<String>,
}

impl KeywordVocab {
    /// Build a vocabulary, rejecting duplicate keywords.
    pub fn from_keywords<I, S>(keywords: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        let mut seen: AHashSet<&str> = AHashSet::with_capacity(keywords.len());
        for (i, k) in keywords.iter().enumerate() {
            if !seen.insert(k.as_str()) {
                anyhow::bail!("duplicate keyword {k:?} at position {i}");
            }
        }
        Ok(Self { keywords })
    }

    /// The number of keywords, `K`.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// The keywords, in id order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Get the keyword with the given id.
    pub fn get(
        &self,
        id: usize,
    ) -> Option<&str> {
        self.keywords.get(id).map(String::as_str)
    }

    /// Iterate the keywords in id order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }
}
