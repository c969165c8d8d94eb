//! # Out-of-Vocabulary Remapping
//!
//! Ids `>= K` (non-keywords) carry no meaning shared between windows, so each
//! window renumbers them into a small local range just above the keywords:
//!
//! ```text
//! K = 3, W = 7
//! context [0, 2, 1, 5, 7, 10, 2]
//!   Position  => [0, 2, 1, 6, 7, 8, 2]   (K + first index)
//!   Discovery => [0, 2, 1, 3, 4, 5, 2]   (K + discovery count)
//! ```
//!
//! A foreign target that never appears in the context becomes `K + W`.

use crate::types::{TokenId, try_id_from_usize};
use ahash::AHashMap;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

/// How a foreign id's replacement is numbered within a window.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OffsetPolicy {
    /// `K +` the index where the id first occurs in the context.
    #[default]
    Position,

    /// `K +` the number of distinct foreign ids seen before it.
    Discovery,
}

impl OffsetPolicy {
    /// Is this the position-sensitive policy?
    pub fn is_position(self) -> bool {
        self == OffsetPolicy::Position
    }
}

/// Renumbers foreign ids in single windows.
#[derive(Debug, Clone)]
pub struct WindowRemapper<T: TokenId> {
    vocab_size: usize,
    window_size: usize,
    policy: OffsetPolicy,

    /// ``[K, K + 1, ..., K + W]``; the last entry is the unseen-target id.
    replacements: Vec<T>,
}

impl<T: TokenId> WindowRemapper<T> {
    /// Create a remapper for `vocab_size` keywords and windows of `window_size`.
    ///
    /// Fails if `vocab_size + window_size` does not fit in `T`.
    pub fn new(
        vocab_size: usize,
        window_size: usize,
        policy: OffsetPolicy,
    ) -> anyhow::Result<Self> {
        let top = vocab_size
            .checked_add(window_size)
            .ok_or_else(|| anyhow::anyhow!("vocab_size + window_size overflows usize"))?;
        let replacements = (vocab_size..=top)
            .map(try_id_from_usize)
            .collect::<anyhow::Result<Vec<T>>>()?;
        Ok(Self {
            vocab_size,
            window_size,
            policy,
            replacements,
        })
    }

    /// The number of keywords, `K`.
    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// The window size, `W`.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// The offset policy.
    pub fn policy(&self) -> OffsetPolicy {
        self.policy
    }

    /// The id given to a foreign target that is absent from the context.
    pub fn unseen_target(&self) -> T {
        self.replacements[self.window_size]
    }

    /// Is `id` a foreign (non-keyword) id?
    pub fn is_foreign(
        &self,
        id: T,
    ) -> bool {
        id.to_usize().is_none_or(|i| i >= self.vocab_size)
    }

    /// Remap one `(context, target)` pair.
    ///
    /// The context must hold exactly `window_size` ids.
    pub fn remap(
        &self,
        context: &[T],
        target: T,
    ) -> anyhow::Result<(Vec<T>, T)> {
        if context.len() != self.window_size {
            anyhow::bail!(
                "context has {} ids; expected window_size {}",
                context.len(),
                self.window_size
            );
        }
        Ok(self.remap_window(context, target))
    }

    /// Remap a window whose length is already known to be `window_size`.
    pub(crate) fn remap_window(
        &self,
        context: &[T],
        target: T,
    ) -> (Vec<T>, T) {
        // Local to this window; never merged into the token mapper.
        let mut assigned: AHashMap<T, T> = AHashMap::new();

        let remapped: Vec<T> = context
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                if !self.is_foreign(id) {
                    return id;
                }
                let next = match self.policy {
                    OffsetPolicy::Position => i,
                    OffsetPolicy::Discovery => assigned.len(),
                };
                *assigned.entry(id).or_insert(self.replacements[next])
            })
            .collect();

        let target = if self.is_foreign(target) {
            assigned
                .get(&target)
                .copied()
                .unwrap_or_else(|| self.unseen_target())
        } else {
            target
        };

        (remapped, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_policy() {
        let remapper: WindowRemapper<u32> = WindowRemapper::new(3, 7, OffsetPolicy::Position).unwrap();
        let (ctx, y) = remapper.remap(&[0, 2, 1, 5, 7, 10, 2], 7).unwrap();
        assert_eq!(ctx, vec![0, 2, 1, 6, 7, 8, 2]);
        assert_eq!(y, 7);
    }

    #[test]
    fn test_discovery_policy() {
        let remapper: WindowRemapper<u32> = WindowRemapper::new(3, 7, OffsetPolicy::Discovery).unwrap();
        let (ctx, y) = remapper.remap(&[0, 2, 1, 5, 7, 10, 2], 10).unwrap();
        assert_eq!(ctx, vec![0, 2, 1, 3, 4, 5, 2]);
        assert_eq!(y, 5);
    }

    #[test]
    fn test_repeats_share_replacement() {
        let remapper: WindowRemapper<u32> = WindowRemapper::new(2, 6, OffsetPolicy::Position).unwrap();
        let (ctx, y) = remapper.remap(&[9, 0, 9, 4, 4, 9], 4).unwrap();
        assert_eq!(ctx, vec![2, 0, 2, 5, 5, 2]);
        assert_eq!(y, 5);

        let remapper: WindowRemapper<u32> = WindowRemapper::new(2, 6, OffsetPolicy::Discovery).unwrap();
        let (ctx, y) = remapper.remap(&[9, 0, 9, 4, 4, 9], 9).unwrap();
        assert_eq!(ctx, vec![2, 0, 2, 3, 3, 2]);
        assert_eq!(y, 2);
    }

    #[test]
    fn test_unseen_foreign_target() {
        for policy in [OffsetPolicy::Position, OffsetPolicy::Discovery] {
            let remapper: WindowRemapper<u16> = WindowRemapper::new(3, 4, policy).unwrap();
            assert_eq!(remapper.unseen_target(), 7);

            let (ctx, y) = remapper.remap(&[0, 1, 2, 0], 42).unwrap();
            assert_eq!(ctx, vec![0, 1, 2, 0]);
            assert_eq!(y, 7);

            // Keyword targets pass through.
            let (_, y) = remapper.remap(&[5, 1, 2, 0], 2).unwrap();
            assert_eq!(y, 2);
        }
    }

    #[test]
    fn test_state_is_per_window() {
        let remapper: WindowRemapper<u32> = WindowRemapper::new(1, 3, OffsetPolicy::Discovery).unwrap();
        let (a, _) = remapper.remap(&[7, 8, 0], 0).unwrap();
        let (b, _) = remapper.remap(&[8, 7, 0], 0).unwrap();
        assert_eq!(a, vec![1, 2, 0]);
        assert_eq!(b, vec![1, 2, 0]);
    }

    #[test]
    fn test_bad_input() {
        assert!(WindowRemapper::<u8>::new(250, 6, OffsetPolicy::Position).is_err());
        assert!(WindowRemapper::<u8>::new(250, 5, OffsetPolicy::Position).is_ok());

        let remapper: WindowRemapper<u32> = WindowRemapper::new(3, 4, OffsetPolicy::Position).unwrap();
        assert!(remapper.remap(&[0, 1, 2], 0).is_err());
    }
}
