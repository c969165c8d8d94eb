//! # Corpus IO
//!
//! Vocabularies and token lists are stored as JSON; generated training data
//! and token mapper state as bincode blobs.

use crate::keywords::KeywordVocab;
use crate::types::TokenList;
use crate::windows::OffsetPolicy;
use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Path for a keyword vocabulary: `<prefix>-<K>.json`.
pub fn keywords_path(
    prefix: &str,
    vocab_size: usize,
) -> PathBuf {
    PathBuf::from(format!("{prefix}-{vocab_size}.json"))
}

/// Path for a token-list corpus: `<prefix>-token-lists-<lists>-<K>.json`.
pub fn token_lists_path(
    prefix: &str,
    list_count: usize,
    vocab_size: usize,
) -> PathBuf {
    PathBuf::from(format!("{prefix}-token-lists-{list_count}-{vocab_size}.json"))
}

/// Path for generated pairs: `<prefix>-<K>-<pairs>-m<0|1>-i<0|1>.bin`.
pub fn training_data_path(
    prefix: &str,
    vocab_size: usize,
    pair_count: usize,
    remap: bool,
    offset_policy: OffsetPolicy,
) -> PathBuf {
    PathBuf::from(format!(
        "{prefix}-{vocab_size}-{pair_count}-m{}-i{}.bin",
        u8::from(remap),
        u8::from(offset_policy.is_position())
    ))
}

/// Path for token mapper state: `<prefix>-<K>-tokens.bin`.
pub fn token_map_path(
    prefix: &str,
    vocab_size: usize,
) -> PathBuf {
    PathBuf::from(format!("{prefix}-{vocab_size}-tokens.bin"))
}

/// Read a JSON file.
pub fn load_json<D: DeserializeOwned, P: AsRef<Path>>(path: P) -> anyhow::Result<D> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("malformed JSON in {}", path.display()))
}

/// Write a JSON file.
pub fn save_json<S: Serialize + ?Sized, P: AsRef<Path>>(
    value: &S,
    path: P,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)
        .with_context(|| format!("cannot write JSON to {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

/// Read a bincode blob.
pub fn load_bincode<D: DeserializeOwned, P: AsRef<Path>>(path: P) -> anyhow::Result<D> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    bincode::deserialize_from(BufReader::new(file))
        .with_context(|| format!("malformed blob in {}", path.display()))
}

/// Write a bincode blob.
pub fn save_bincode<S: Serialize + ?Sized, P: AsRef<Path>>(
    value: &S,
    path: P,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, value)
        .with_context(|| format!("cannot write blob to {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

/// Load a keyword vocabulary (a JSON array of strings).
pub fn load_keywords<P: AsRef<Path>>(path: P) -> anyhow::Result<KeywordVocab> {
    let path = path.as_ref();
    let keywords: Vec<String> = load_json(path)?;
    let vocab = KeywordVocab::from_keywords(keywords)
        .with_context(|| format!("invalid keyword vocabulary {}", path.display()))?;
    log::debug!("read {} keywords from {}", vocab.len(), path.display());
    Ok(vocab)
}

/// Load token lists (a JSON array of arrays of strings).
pub fn load_token_lists<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<TokenList>> {
    let path = path.as_ref();
    let lists: Vec<TokenList> = load_json(path)?;
    let total: usize = lists.iter().map(Vec::len).sum();
    log::debug!(
        "loaded {} token lists (avg tokens={}) from {}",
        lists.len(),
        total.checked_div(lists.len()).unwrap_or(0),
        path.display()
    );
    Ok(lists)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(keywords_path("keywords", 1000), PathBuf::from("keywords-1000.json"));
        assert_eq!(
            token_lists_path("out/kw", 12, 300),
            PathBuf::from("out/kw-token-lists-12-300.json")
        );
        assert_eq!(
            training_data_path("training-data", 300, 4500, true, OffsetPolicy::Position),
            PathBuf::from("training-data-300-4500-m1-i1.bin")
        );
        assert_eq!(
            training_data_path("td", 3, 5, false, OffsetPolicy::Discovery),
            PathBuf::from("td-3-5-m0-i0.bin")
        );
        assert_eq!(token_map_path("td", 3), PathBuf::from("td-3-tokens.bin"));
    }

    #[test]
    fn test_keywords_and_lists() {
        let dir = tempfile::tempdir().unwrap();
        let kw = dir.path().join("kw.json");
        let tl = dir.path().join("tl.json");

        let vocab = KeywordVocab::from_keywords(["a", "(", ")"]).unwrap();
        save_json(&vocab, &kw).unwrap();
        assert_eq!(std::fs::read_to_string(&kw).unwrap(), r#"["a","(",")"]"#);
        assert_eq!(load_keywords(&kw).unwrap(), vocab);

        let lists: Vec<TokenList> = vec![vec!["a".into(), "b".into()], vec![]];
        save_json(&lists, &tl).unwrap();
        assert_eq!(std::fs::read_to_string(&tl).unwrap(), r#"[["a","b"],[]]"#);
        assert_eq!(load_token_lists(&tl).unwrap(), lists);
    }

    #[test]
    fn test_bad_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "[\"a\", ").unwrap();
        let err = load_keywords(&bad).unwrap_err();
        assert!(err.to_string().contains("malformed JSON"));

        let dup = dir.path().join("dup.json");
        std::fs::write(&dup, r#"["a", "a"]"#).unwrap();
        assert!(load_keywords(&dup).is_err());

        assert!(load_token_lists(dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_bincode_blob() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        let value: Vec<(u32, String)> = vec![(1, "x".into()), (2, "y".into())];
        save_bincode(&value, &path).unwrap();
        let back: Vec<(u32, String)> = load_bincode(&path).unwrap();
        assert_eq!(back, value);
    }
}
