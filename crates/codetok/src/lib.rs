//! # Code Completion Training Data
//!
//! Prepares training data for a neural code-completion model:
//!
//! * [`source`] - find source files, strip comments, split into tokens.
//! * [`keywords`] - rank tokens by frequency into a keyword vocabulary.
//! * [`token_map`] - map token strings to dense ids, growing for unseen tokens.
//! * [`windows`] - draw sliding-window `(context, target)` pairs, renumbering
//!   non-keyword ids per window.
//! * [`datagen`] - a full generation run, with persistence in [`io`].
//!
//! ```rust,ignore
//! let results = find_frequent_tokens(&roots, KeywordOptions::default())?;
//! let mut mapper: TokenMapper<u32> = TokenMapper::new(&results.vocab)?;
//! let generator = WindowGenerator::from_token_lists(
//!     &mut mapper,
//!     &results.token_lists.unwrap_or_default(),
//!     WindowOptions::default(),
//! )?;
//! for pair in generator.pairs(StdRng::seed_from_u64(0)) {
//!     // ...
//! }
//! ```
#![warn(missing_docs, unused)]

pub mod datagen;
pub mod io;
pub mod keywords;
pub mod source;
pub mod token_map;
pub mod types;
pub mod windows;

pub use datagen::{DataGenConfig, DataGenSummary, TrainingData, build_training_data, generate_training_data};
pub use keywords::{KeywordOptions, KeywordResults, KeywordVocab, find_frequent_tokens};
pub use token_map::TokenMapper;
pub use types::{TokenId, TokenList};
pub use windows::{OffsetPolicy, TrainingPair, WindowGenerator, WindowOptions};
