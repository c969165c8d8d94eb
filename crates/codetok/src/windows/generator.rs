//! # Sliding-Window Training Pairs
//!
//! Every id list longer than the window size `W` contributes `L - W` valid
//! window start offsets. A run draws exactly as many windows as there are
//! valid offsets in the corpus, but draws them with replacement: a list is
//! picked with probability proportional to its offset count, then an offset
//! within it uniformly.

use crate::token_map::TokenMapper;
use crate::types::{TokenId, TokenList};
use crate::windows::remap::{OffsetPolicy, WindowRemapper};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Default window size.
pub const DEFAULT_WINDOW_SIZE: usize = 100;

/// Options for [`WindowGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowOptions {
    /// The context length, `W`.
    pub window_size: usize,

    /// Whether non-keyword ids are renumbered per window.
    pub remap: bool,

    /// How renumbered ids are assigned; only used when `remap` is set.
    pub offset_policy: OffsetPolicy,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            remap: true,
            offset_policy: OffsetPolicy::Position,
        }
    }
}

impl WindowOptions {
    /// Set the window size.
    pub fn with_window_size(
        self,
        window_size: usize,
    ) -> Self {
        Self {
            window_size,
            ..self
        }
    }

    /// Set whether non-keyword ids are renumbered.
    pub fn with_remap(
        self,
        remap: bool,
    ) -> Self {
        Self { remap, ..self }
    }

    /// Set the offset policy.
    pub fn with_offset_policy(
        self,
        offset_policy: OffsetPolicy,
    ) -> Self {
        Self {
            offset_policy,
            ..self
        }
    }

    /// Check the options for consistency.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.window_size == 0 {
            anyhow::bail!("window_size must be > 0");
        }
        Ok(())
    }
}

/// One training example: `W` context ids and the id that follows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: TokenId", deserialize = "T: TokenId"))]
pub struct TrainingPair<T: TokenId> {
    /// The context ids.
    pub context: Vec<T>,

    /// The next id.
    pub target: T,
}

/// Draws [`TrainingPair`]s from a corpus of id lists.
#[derive(Debug, Clone)]
pub struct WindowGenerator<T: TokenId> {
    vocab_size: usize,
    options: WindowOptions,

    /// Lists longer than the window size.
    id_lists: Vec<Vec<T>>,

    /// `L - W` per list.
    weights: Vec<usize>,

    /// Sum of `weights`.
    window_count: usize,

    remapper: Option<WindowRemapper<T>>,
}

impl<T: TokenId> WindowGenerator<T> {
    /// Build a generator over `id_lists`, for a vocabulary of `vocab_size` keywords.
    ///
    /// Lists too short to hold a window and its target are dropped.
    pub fn new<I>(
        vocab_size: usize,
        id_lists: I,
        options: WindowOptions,
    ) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = Vec<T>>,
    {
        options.validate()?;
        let w = options.window_size;

        let remapper = if options.remap {
            Some(WindowRemapper::new(vocab_size, w, options.offset_policy)?)
        } else {
            None
        };

        let id_lists: Vec<Vec<T>> = id_lists.into_iter().filter(|ids| ids.len() > w).collect();
        let weights: Vec<usize> = id_lists.iter().map(|ids| ids.len() - w).collect();
        let window_count = weights.iter().sum();

        log::info!(
            "window generator: {} eligible lists, {} windows (remap={}, offset_policy={:?})",
            id_lists.len(),
            window_count,
            options.remap,
            options.offset_policy
        );

        Ok(Self {
            vocab_size,
            options,
            id_lists,
            weights,
            window_count,
            remapper,
        })
    }

    /// Map `token_lists` through `mapper` and build a generator.
    ///
    /// Only lists long enough to yield a window are mapped, in corpus order,
    /// so the mapper only grows by tokens that can appear in a window.
    pub fn from_token_lists(
        mapper: &mut TokenMapper<T>,
        token_lists: &[TokenList],
        options: WindowOptions,
    ) -> anyhow::Result<Self> {
        options.validate()?;
        let id_lists = token_lists
            .iter()
            .filter(|tokens| tokens.len() > options.window_size)
            .map(|tokens| mapper.map_tokens(tokens))
            .collect::<anyhow::Result<Vec<Vec<T>>>>()?;
        Self::new(mapper.keyword_count(), id_lists, options)
    }

    /// The number of keywords, `K`.
    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// Get the options.
    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    /// The number of lists long enough to yield windows.
    pub fn eligible_lists(&self) -> usize {
        self.id_lists.len()
    }

    /// The number of pairs a run yields.
    pub fn window_count(&self) -> usize {
        self.window_count
    }

    /// Draw all pairs of a run from `rng`.
    ///
    /// Yields exactly [`Self::window_count`] pairs; none if no list is eligible.
    pub fn pairs<R: Rng>(
        &self,
        rng: R,
    ) -> Pairs<'_, T, R> {
        // Weights are all >= 1; only an empty corpus has no distribution.
        let picker = WeightedIndex::new(&self.weights).ok();
        let remaining = if picker.is_some() {
            self.window_count
        } else {
            0
        };
        Pairs {
            generator: self,
            rng,
            picker,
            remaining,
        }
    }

    /// Draw all pairs of a run from an entropy-seeded rng.
    pub fn pairs_from_entropy(&self) -> Pairs<'_, T, StdRng> {
        self.pairs(StdRng::from_entropy())
    }

    /// Build the pair starting at `offset` in list `list`, applying the remap if enabled.
    ///
    /// Panics if the window does not fit in the list.
    pub fn pair_at(
        &self,
        list: usize,
        offset: usize,
    ) -> TrainingPair<T> {
        let w = self.options.window_size;
        let ids = &self.id_lists[list];
        let context = &ids[offset..offset + w];
        let target = ids[offset + w];

        match &self.remapper {
            Some(remapper) => {
                let (context, target) = remapper.remap_window(context, target);
                TrainingPair { context, target }
            }
            None => TrainingPair {
                context: context.to_vec(),
                target,
            },
        }
    }
}

/// Iterator over the pairs of one [`WindowGenerator`] run.
#[derive(Debug)]
pub struct Pairs<'a, T: TokenId, R: Rng> {
    generator: &'a WindowGenerator<T>,
    rng: R,
    picker: Option<WeightedIndex<usize>>,
    remaining: usize,
}

impl<T: TokenId, R: Rng> Iterator for Pairs<'_, T, R> {
    type Item = TrainingPair<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let picker = self.picker.as_ref()?;
        self.remaining -= 1;

        let list = picker.sample(&mut self.rng);
        let offset = self.rng.gen_range(0..self.generator.weights[list]);
        Some(self.generator.pair_at(list, offset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: TokenId, R: Rng> ExactSizeIterator for Pairs<'_, T, R> {}
