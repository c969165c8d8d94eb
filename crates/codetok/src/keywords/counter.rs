//! # Token Counting

use crate::types::{CountType, StringChunkType};
use ahash::AHashMap;

/// Global token frequency counts, kept in first-seen order.
#[derive(Debug, Clone)]
pub struct TokenCounter<K = String, C = u64>
where
    K: StringChunkType,
    C: CountType,
{
    /// Map of ``{ K -> index into entries }``.
    index: AHashMap<K, usize>,

    /// `(token, count)` pairs in first-seen order.
    entries: Vec<(K, C)>,
}

impl<K, C> Default for TokenCounter<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    fn default() -> Self {
        Self {
            index: AHashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K, C> TokenCounter<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct tokens seen.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Has nothing been counted?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the count for a token; zero if never seen.
    pub fn count(
        &self,
        token: &str,
    ) -> C {
        self.index
            .get(&K::from(token))
            .map(|&i| self.entries[i].1)
            .unwrap_or_default()
    }

    /// Iterate `(token, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, C)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    /// Add `count` occurrences of `token`.
    pub fn add(
        &mut self,
        token: &str,
        count: C,
    ) {
        let key = K::from(token);
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += count,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, count));
            }
        }
    }

    /// Count every token of a token stream once.
    pub fn update_from_tokens<I>(
        &mut self,
        tokens: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for token in tokens {
            self.add(token.as_ref(), C::one());
        }
    }

    /// Merge another counter into this one, keeping this counter's order first.
    pub fn update_from_counter(
        &mut self,
        other: &TokenCounter<K, C>,
    ) {
        for (k, c) in other.iter() {
            self.add(k.as_ref(), c);
        }
    }

    /// The `n` most frequent tokens, most frequent first.
    ///
    /// Ties keep first-seen order.
    pub fn most_common(
        &self,
        n: usize,
    ) -> Vec<(K, C)> {
        let mut ranked: Vec<&(K, C)> = self.entries.iter().collect();
        // Stable sort; equal counts stay in first-seen order.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(n).cloned().collect()
    }

    /// Every token counted at least `min_count` times, in first-seen order.
    pub fn at_least(
        &self,
        min_count: C,
    ) -> Vec<(K, C)> {
        self.entries
            .iter()
            .filter(|(_, c)| *c >= min_count)
            .cloned()
            .collect()
    }

    /// Release the counts, in first-seen order.
    pub fn release(self) -> Vec<(K, C)> {
        self.entries
    }
}
