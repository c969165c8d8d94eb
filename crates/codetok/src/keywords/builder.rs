//! # Keyword Vocabulary Builder
//!
//! Walks source trees, tokenizes every matching file, and ranks tokens by
//! global frequency to pick the keyword vocabulary.

use crate::keywords::counter::TokenCounter;
use crate::keywords::vocab::KeywordVocab;
use crate::source::comments::{C_SUFFIXES, CPP_SUFFIXES, PY_SUFFIXES};
use crate::source::tokenize::SourceTokenizer;
use crate::source::walk::matching_files;
use crate::types::TokenList;
use anyhow::Context;
use std::path::Path;

/// Default maximum vocabulary size.
pub const DEFAULT_MAX_KEYWORDS: usize = 1000;

/// Files between progress log lines.
const PROGRESS_EVERY: usize = 100;

/// Expand a list of language names into file suffixes.
///
/// Known names are `c` (C and C++ sources and headers), `cpp` (C++ only)
/// and `py`; anything else is taken as a literal suffix.
pub fn suffixes_for_langs<S: AsRef<str>>(langs: &[S]) -> Vec<String> {
    let mut suffixes: Vec<String> = Vec::new();
    let mut push = |s: &str| {
        if !suffixes.iter().any(|x| x == s) {
            suffixes.push(s.to_string());
        }
    };
    for lang in langs {
        match lang.as_ref().trim() {
            "" => {}
            "c" => C_SUFFIXES.iter().chain(CPP_SUFFIXES).for_each(|s| push(*s)),
            "cpp" | "c++" => CPP_SUFFIXES.iter().for_each(|s| push(*s)),
            "py" | "python" => PY_SUFFIXES.iter().for_each(|s| push(*s)),
            other => push(other),
        }
    }
    suffixes
}

/// Options for [`KeywordBuilder`].
#[derive(Debug, Clone)]
pub struct KeywordOptions {
    /// File name suffixes to include.
    pub suffixes: Vec<String>,

    /// The maximum vocabulary size; ignored when `min_count` is set.
    pub max_keywords: usize,

    /// Keep every token counted at least this often, overriding `max_keywords`.
    pub min_count: Option<u64>,

    /// Whether to keep the per-file token lists.
    pub keep_token_lists: bool,
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self {
            suffixes: PY_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            max_keywords: DEFAULT_MAX_KEYWORDS,
            min_count: None,
            keep_token_lists: true,
        }
    }
}

impl KeywordOptions {
    /// Set the file name suffixes.
    pub fn with_suffixes<I, S>(
        self,
        suffixes: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// Set the maximum vocabulary size.
    pub fn with_max_keywords(
        self,
        max_keywords: usize,
    ) -> Self {
        Self {
            max_keywords,
            ..self
        }
    }

    /// Set the minimum count threshold.
    pub fn with_min_count(
        self,
        min_count: Option<u64>,
    ) -> Self {
        Self { min_count, ..self }
    }

    /// Set whether per-file token lists are kept.
    pub fn with_keep_token_lists(
        self,
        keep_token_lists: bool,
    ) -> Self {
        Self {
            keep_token_lists,
            ..self
        }
    }

    /// Check the options for consistency.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.suffixes.is_empty() {
            anyhow::bail!("at least one file suffix is required");
        }
        if self.min_count.is_none() && self.max_keywords == 0 {
            anyhow::bail!("max_keywords must be > 0 when no min_count is given");
        }
        Ok(())
    }
}

/// The result of a [`KeywordBuilder`] run.
#[derive(Debug, Clone)]
pub struct KeywordResults {
    /// The keyword vocabulary.
    pub vocab: KeywordVocab,

    /// The global count of each keyword, by keyword id.
    pub counts: Vec<u64>,

    /// Per-file token lists, if requested; includes non-keywords.
    pub token_lists: Option<Vec<TokenList>>,

    /// The number of files tokenized.
    pub files_read: usize,
}

/// Accumulates token counts over a corpus of source files.
#[derive(Debug)]
pub struct KeywordBuilder {
    options: KeywordOptions,
    tokenizer: SourceTokenizer,
    counter: TokenCounter<String, u64>,
    token_lists: Vec<TokenList>,
    files_read: usize,
}

impl KeywordBuilder {
    /// Create a builder.
    pub fn new(options: KeywordOptions) -> anyhow::Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            tokenizer: SourceTokenizer::new(),
            counter: TokenCounter::new(),
            token_lists: Vec::new(),
            files_read: 0,
        })
    }

    /// Get the options.
    pub fn options(&self) -> &KeywordOptions {
        &self.options
    }

    /// Get the running token counts.
    pub fn counter(&self) -> &TokenCounter<String, u64> {
        &self.counter
    }

    /// Tokenize one source text and count its tokens.
    ///
    /// `file_name` selects the comment rule.
    pub fn update_from_source(
        &mut self,
        file_name: &str,
        content: &str,
    ) {
        let tokens = self.tokenizer.tokenize(file_name, content);
        self.counter.update_from_tokens(&tokens);
        if self.options.keep_token_lists {
            self.token_lists.push(tokens);
        }
        self.files_read += 1;
    }

    /// Read, tokenize and count one file.
    pub fn update_from_file(
        &mut self,
        path: &Path,
    ) -> anyhow::Result<()> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read source file {}", path.display()))?;
        self.update_from_source(&path.to_string_lossy(), &content);
        Ok(())
    }

    /// Count every matching file under `roots`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, roots)))]
    pub fn update_from_roots<P: AsRef<Path>>(
        &mut self,
        roots: &[P],
    ) -> anyhow::Result<()> {
        if roots.is_empty() {
            anyhow::bail!("at least one source root is required");
        }
        let files = matching_files(roots, &self.options.suffixes)?;
        log::debug!("found {} matching files", files.len());

        for (i, path) in files.iter().enumerate() {
            self.update_from_file(path)?;
            if i > 0 && i % PROGRESS_EVERY == 0 {
                log::debug!("analyzed {i} files");
            }
        }
        log::info!("analyzed {} files", files.len());
        Ok(())
    }

    /// Rank the counted tokens and produce the vocabulary.
    pub fn finish(self) -> anyhow::Result<KeywordResults> {
        let ranked = match self.options.min_count {
            Some(min_count) => self.counter.at_least(min_count),
            None => self.counter.most_common(self.options.max_keywords),
        };
        log::info!(
            "selected {} keywords from {} distinct tokens",
            ranked.len(),
            self.counter.len()
        );

        let (keywords, counts): (Vec<String>, Vec<u64>) = ranked.into_iter().unzip();
        let vocab = KeywordVocab::from_keywords(keywords)?;

        Ok(KeywordResults {
            vocab,
            counts,
            token_lists: self.options.keep_token_lists.then_some(self.token_lists),
            files_read: self.files_read,
        })
    }
}

/// Walk `roots` and build the keyword vocabulary.
pub fn find_frequent_tokens<P: AsRef<Path>>(
    roots: &[P],
    options: KeywordOptions,
) -> anyhow::Result<KeywordResults> {
    let mut builder = KeywordBuilder::new(options)?;
    builder.update_from_roots(roots)?;
    builder.finish()
}
