//! # Training Data Generation
//!
//! One run: load a vocabulary and token lists, map tokens to ids, draw every
//! window, and persist the pairs along with the final token mapper.

use crate::io::{
    load_keywords, load_token_lists, save_bincode, token_map_path, training_data_path,
};
use crate::keywords::KeywordVocab;
use crate::token_map::TokenMapper;
use crate::types::{TokenId, TokenList};
use crate::windows::{OffsetPolicy, WindowGenerator, WindowOptions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;

/// Default output prefix for generated data.
pub const DEFAULT_OUTPUT_PREFIX: &str = "training-data";

/// Pairs between progress log lines.
const PROGRESS_EVERY: usize = 10_000;

/// The pairs of one run, stored column-wise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: TokenId", deserialize = "T: TokenId"))]
pub struct TrainingData<T: TokenId> {
    /// The number of keywords, `K`.
    pub vocab_size: usize,

    /// The options the pairs were drawn with.
    pub options: WindowOptions,

    /// Context windows.
    pub xs: Vec<Vec<T>>,

    /// Targets, one per context window.
    pub ys: Vec<T>,
}

impl<T: TokenId> TrainingData<T> {
    /// The number of pairs.
    pub fn len(&self) -> usize {
        self.ys.len()
    }

    /// Are there no pairs?
    pub fn is_empty(&self) -> bool {
        self.ys.is_empty()
    }
}

/// Configuration for [`generate_training_data`].
#[derive(Debug, Clone)]
pub struct DataGenConfig {
    /// The keyword vocabulary JSON file.
    pub keyword_file: PathBuf,

    /// The token lists JSON file.
    pub token_lists_file: PathBuf,

    /// Prefix for the output files.
    pub output_prefix: String,

    /// Window options.
    pub window: WindowOptions,

    /// Rng seed; entropy-seeded when `None`.
    pub seed: Option<u64>,
}

impl DataGenConfig {
    /// Create a config with default options.
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(
        keyword_file: P,
        token_lists_file: Q,
    ) -> Self {
        Self {
            keyword_file: keyword_file.into(),
            token_lists_file: token_lists_file.into(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            window: WindowOptions::default(),
            seed: None,
        }
    }

    /// Set the output prefix.
    pub fn with_output_prefix(
        self,
        output_prefix: impl Into<String>,
    ) -> Self {
        Self {
            output_prefix: output_prefix.into(),
            ..self
        }
    }

    /// Set the window options.
    pub fn with_window(
        self,
        window: WindowOptions,
    ) -> Self {
        Self { window, ..self }
    }

    /// Set the rng seed.
    pub fn with_seed(
        self,
        seed: Option<u64>,
    ) -> Self {
        Self { seed, ..self }
    }
}

/// What a [`generate_training_data`] run wrote.
#[derive(Debug, Clone)]
pub struct DataGenSummary {
    /// The number of keywords.
    pub vocab_size: usize,

    /// The number of pairs written.
    pub pair_count: usize,

    /// The training data blob.
    pub training_data_path: PathBuf,

    /// The token mapper blob.
    pub token_map_path: PathBuf,
}

/// Map `token_lists`, draw every window from `rng`, and return the pairs and final mapper.
///
/// Fails when no list is longer than the window size.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(vocab, token_lists, rng)))]
pub fn build_training_data<T: TokenId, R: Rng>(
    vocab: &KeywordVocab,
    token_lists: &[TokenList],
    options: WindowOptions,
    rng: R,
) -> anyhow::Result<(TrainingData<T>, TokenMapper<T>)> {
    log::info!(
        "generating data (remap={}, offset_policy={:?})",
        options.remap,
        options.offset_policy
    );

    let mut mapper = TokenMapper::<T>::new(vocab)?;
    let generator = WindowGenerator::from_token_lists(&mut mapper, token_lists, options)?;

    if generator.eligible_lists() == 0 {
        let longest = token_lists.iter().map(Vec::len).max().unwrap_or(0);
        anyhow::bail!(
            "no eligible training lists: {} lists, longest has {} tokens; window_size {} needs at least {}",
            token_lists.len(),
            longest,
            options.window_size,
            options.window_size + 1
        );
    }

    let n = generator.window_count();
    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    for (i, pair) in generator.pairs(rng).enumerate() {
        xs.push(pair.context);
        ys.push(pair.target);
        if i > 0 && i % PROGRESS_EVERY == 0 {
            log::debug!("generated {i} examples");
        }
    }

    let data = TrainingData {
        vocab_size: vocab.len(),
        options,
        xs,
        ys,
    };
    Ok((data, mapper))
}

/// Run a full generation: load inputs, build pairs, and write both blobs.
pub fn generate_training_data(config: &DataGenConfig) -> anyhow::Result<DataGenSummary> {
    let start = Instant::now();
    config.window.validate()?;

    let vocab = load_keywords(&config.keyword_file)?;
    let token_lists = load_token_lists(&config.token_lists_file)?;

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (data, mapper) = build_training_data::<u32, _>(&vocab, &token_lists, config.window, rng)?;

    let remap = config.window.remap;
    let policy: OffsetPolicy = config.window.offset_policy;
    let training_data_path =
        training_data_path(&config.output_prefix, vocab.len(), data.len(), remap, policy);
    let token_map_path = token_map_path(&config.output_prefix, vocab.len());

    save_bincode(&data, &training_data_path)?;
    save_bincode(&mapper, &token_map_path)?;

    log::info!(
        "generated {} test entries in [{:?}]",
        data.len(),
        start.elapsed()
    );
    log::info!("training data written to {}", training_data_path.display());
    log::info!("token map written to {}", token_map_path.display());

    Ok(DataGenSummary {
        vocab_size: vocab.len(),
        pair_count: data.len(),
        training_data_path,
        token_map_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{load_bincode, save_json};

    fn lists(texts: &[&str]) -> Vec<TokenList> {
        texts
            .iter()
            .map(|t| t.split_whitespace().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_build_training_data() {
        let vocab = KeywordVocab::from_keywords(["=", "+", "\n"]).unwrap();
        let corpus = lists(&["a = b + c", "x = x + 1 + y", "z"]);
        let options = WindowOptions::default().with_window_size(3);

        let (data, mapper) =
            build_training_data::<u32, _>(&vocab, &corpus, options, StdRng::seed_from_u64(1)).unwrap();

        // 5 - 3 + 7 - 3 windows.
        assert_eq!(data.len(), 6);
        assert_eq!(data.xs.len(), 6);
        assert_eq!(data.vocab_size, 3);
        assert!(data.xs.iter().all(|x| x.len() == 3));

        // The one-token list is never mapped.
        assert_eq!(mapper.token_to_id("z"), None);
        assert_eq!(mapper.token_to_id("a"), Some(3));
        assert_eq!(mapper.len(), 3 + 6);

        // Remapped ids stay within [0, K + W].
        for (x, &y) in data.xs.iter().zip(&data.ys) {
            assert!(x.iter().all(|&id| id < 6));
            assert!(y <= 6);
        }
    }

    #[test]
    fn test_no_eligible_lists() {
        let vocab = KeywordVocab::from_keywords(["x"]).unwrap();
        let corpus = lists(&["x x", "x"]);
        let err = build_training_data::<u32, _>(
            &vocab,
            &corpus,
            WindowOptions::default(),
            StdRng::seed_from_u64(1),
        )
        .unwrap_err();
        assert!(err.to_string().contains("no eligible training lists"));
    }

    #[test]
    fn test_generate_training_data() {
        let dir = tempfile::tempdir().unwrap();
        let kw = dir.path().join("keywords-2.json");
        let tl = dir.path().join("keywords-token-lists-2-2.json");
        save_json(&["(", ")"], &kw).unwrap();
        save_json(&lists(&["f ( x ) g ( y )", "h ( )"]), &tl).unwrap();

        let prefix = dir.path().join("td").to_string_lossy().into_owned();
        let config = DataGenConfig::new(&kw, &tl)
            .with_output_prefix(prefix.clone())
            .with_window(
                WindowOptions::default()
                    .with_window_size(2)
                    .with_offset_policy(OffsetPolicy::Discovery),
            )
            .with_seed(Some(3));

        let summary = generate_training_data(&config).unwrap();
        assert_eq!(summary.vocab_size, 2);
        assert_eq!(summary.pair_count, 7);
        assert_eq!(
            summary.training_data_path,
            PathBuf::from(format!("{prefix}-2-7-m1-i0.bin"))
        );
        assert_eq!(summary.token_map_path, PathBuf::from(format!("{prefix}-2-tokens.bin")));

        let data: TrainingData<u32> = load_bincode(&summary.training_data_path).unwrap();
        assert_eq!(data.len(), 7);
        assert_eq!(data.options.offset_policy, OffsetPolicy::Discovery);

        let mapper: TokenMapper<u32> = load_bincode(&summary.token_map_path).unwrap();
        assert_eq!(mapper.keyword_count(), 2);
        assert_eq!(mapper.tokens()[2..], ["f", "x", "g", "y", "h"]);

        // Same seed, same pairs.
        let again = generate_training_data(&config).unwrap();
        let data2: TrainingData<u32> = load_bincode(&again.training_data_path).unwrap();
        assert_eq!(data, data2);
    }

    #[test]
    fn test_missing_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let config = DataGenConfig::new(dir.path().join("nope.json"), dir.path().join("nope2.json"));
        assert!(generate_training_data(&config).is_err());
    }
}
