//! # Source Tokenization

use crate::source::comments::CommentStripper;
use crate::types::TokenList;
use regex::Regex;
use std::sync::LazyLock;

/// Splits a line into alternating word and non-word runs.
pub const TOKEN_RUN_PATTERN: &str = r"\w+|\W+";

static SHARED_TOKENIZER: LazyLock<SourceTokenizer> = LazyLock::new(SourceTokenizer::new);

/// Comment stripping plus token splitting.
///
/// Holds the compiled patterns, so one instance can be reused across a corpus.
#[derive(Debug, Clone)]
pub struct SourceTokenizer {
    stripper: CommentStripper,
    token_runs: Regex,
}

impl Default for SourceTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceTokenizer {
    /// Compile a new tokenizer.
    pub fn new() -> Self {
        Self {
            stripper: CommentStripper::new(),
            token_runs: Regex::new(TOKEN_RUN_PATTERN).expect("regex pattern compilation failed"),
        }
    }

    /// Get the comment stripper.
    pub fn stripper(&self) -> &CommentStripper {
        &self.stripper
    }

    /// Tokenize text that has already had its comments removed.
    ///
    /// Runs never cross a line break; each run is trimmed and
    /// whitespace-only runs are dropped.
    pub fn split_tokens(
        &self,
        text: &str,
    ) -> TokenList {
        let mut tokens = TokenList::new();
        for line in text.split('\n') {
            tokens.extend(
                self.token_runs
                    .find_iter(line)
                    .map(|m| m.as_str().trim())
                    .filter(|t| !t.is_empty())
                    .map(String::from),
            );
        }
        tokens
    }

    /// Remove comments (by `file_name`'s extension) and tokenize `content`.
    pub fn tokenize(
        &self,
        file_name: &str,
        content: &str,
    ) -> TokenList {
        let uncommented = self.stripper.strip_for_file(file_name, content);
        self.split_tokens(&uncommented)
    }
}

/// Tokenize `content` with a shared [`SourceTokenizer`].
pub fn tokenize_source(
    file_name: &str,
    content: &str,
) -> TokenList {
    SHARED_TOKENIZER.tokenize(file_name, content)
}

/// Remove comments from `content` with a shared [`SourceTokenizer`].
pub fn strip_comments(
    file_name: &str,
    content: &str,
) -> String {
    SHARED_TOKENIZER
        .stripper()
        .strip_for_file(file_name, content)
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(list: &[&str]) -> TokenList {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cpp_tokens() {
        let tokens = tokenize_source("a.cpp", "int x; // comment\n/* block */ y");
        assert_eq!(tokens, toks(&["int", "x", ";", "y"]));
    }

    #[test]
    fn test_punctuation_runs() {
        let tokens = tokenize_source("a.py", "def f(a, b):\n    return a+b  # sum\n");
        assert_eq!(
            tokens,
            toks(&["def", "f", "(", "a", ",", "b", "):", "return", "a", "+", "b"])
        );
    }

    #[test]
    fn test_runs_do_not_cross_lines() {
        let tokens = tokenize_source("a.c", "if (x) {\n  y();\n}\n");
        assert_eq!(tokens, toks(&["if", "(", "x", ") {", "y", "();", "}"]));
    }

    #[test]
    fn test_unicode_words() {
        let tokens = tokenize_source("a.py", "größe = naïve_λ");
        assert_eq!(tokens, toks(&["größe", "=", "naïve_λ"]));
    }

    #[test]
    fn test_unknown_extension_and_empty() {
        assert_eq!(
            tokenize_source("README", "a // b"),
            toks(&["a", "//", "b"])
        );
        assert!(tokenize_source("a.py", "").is_empty());
        assert!(tokenize_source("a.py", "   \n\t\n# only a comment").is_empty());
    }

    #[test]
    fn test_strip_comments() {
        assert_eq!(strip_comments("x.h", "a /* b */ c // d"), "a  c ");
    }
}
