//! # Token Mapper
//!
//! A growing, bidirectional ``{ token <-> id }`` map. Keywords take ids
//! `0..K` by position; every other token is appended on first sight.

use crate::keywords::KeywordVocab;
use crate::types::{TokenId, TokenToIdMap, try_id_from_usize};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Maps token strings to dense integer ids, extending itself for unseen tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: TokenId", deserialize = "T: TokenId"))]
pub struct TokenMapper<T: TokenId = u32> {
    /// The number of keywords, `K`.
    keyword_count: usize,

    /// Map of ``{ token -> id }``.
    token_to_id: TokenToIdMap<T>,

    /// Tokens by id.
    id_to_token: Vec<String>,
}

impl<T: TokenId> TokenMapper<T> {
    /// Seed a mapper from a keyword vocabulary.
    pub fn new(vocab: &KeywordVocab) -> anyhow::Result<Self> {
        let mut mapper = Self {
            keyword_count: vocab.len(),
            token_to_id: TokenToIdMap::with_capacity(vocab.len()),
            id_to_token: Vec::with_capacity(vocab.len()),
        };
        for keyword in vocab.iter() {
            if mapper.token_to_id.contains_key(keyword) {
                anyhow::bail!("duplicate keyword {keyword:?}");
            }
            mapper.push(keyword)?;
        }
        Ok(mapper)
    }

    /// The number of keywords, `K`.
    pub fn keyword_count(&self) -> usize {
        self.keyword_count
    }

    /// The number of mapped tokens, keywords included.
    pub fn len(&self) -> usize {
        self.id_to_token.len()
    }

    /// Is the mapper empty?
    pub fn is_empty(&self) -> bool {
        self.id_to_token.is_empty()
    }

    /// Is `id` a keyword id?
    pub fn is_keyword(
        &self,
        id: T,
    ) -> bool {
        id.to_usize().is_some_and(|i| i < self.keyword_count)
    }

    /// Look up a token's id without assigning one.
    pub fn token_to_id(
        &self,
        token: &str,
    ) -> Option<T> {
        self.token_to_id.get(token).copied()
    }

    /// Look up the token for an id.
    pub fn id_to_token(
        &self,
        id: T,
    ) -> Option<&str> {
        id.to_usize()
            .and_then(|i| self.id_to_token.get(i))
            .map(String::as_str)
    }

    /// All mapped tokens, in id order.
    pub fn tokens(&self) -> &[String] {
        &self.id_to_token
    }

    /// Get the id for `token`, assigning the next free id if it is new.
    pub fn map_token(
        &mut self,
        token: &str,
    ) -> anyhow::Result<T> {
        match self.token_to_id.get(token) {
            Some(&id) => Ok(id),
            None => self.push(token),
        }
    }

    /// Map a token sequence to ids, growing the mapping as needed.
    pub fn map_tokens<I>(
        &mut self,
        tokens: I,
    ) -> anyhow::Result<Vec<T>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|t| self.map_token(t.as_ref()))
            .collect()
    }

    fn push(
        &mut self,
        token: &str,
    ) -> anyhow::Result<T> {
        let id: T = try_id_from_usize(self.id_to_token.len())?;
        self.token_to_id.insert(token.to_string(), id);
        self.id_to_token.push(token.to_string());
        Ok(id)
    }
}
