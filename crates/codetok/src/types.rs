//! # Common Types and Traits
use core::hash::Hash;
use num_traits::{FromPrimitive, Num, ToPrimitive, Unsigned};
use std::fmt::{Debug, Display};
use std::ops::AddAssign;

/// A type that can be used as an integer token id.
pub trait TokenId:
    'static
    + Debug
    + Display
    + Clone
    + Copy
    + Hash
    + Send
    + Sync
    + Unsigned
    + FromPrimitive
    + ToPrimitive
    + Ord
    + serde::Serialize
    + for<'de> serde::Deserialize<'de>
{
}

impl<T> TokenId for T where
    T: 'static
        + Debug
        + Display
        + Clone
        + Copy
        + Hash
        + Send
        + Sync
        + Unsigned
        + FromPrimitive
        + ToPrimitive
        + Ord
        + serde::Serialize
        + for<'de> serde::Deserialize<'de>
{
}

/// A type that can be used as a token count.
pub trait CountType:
    Num + AddAssign + Default + Copy + Debug + Display + Send + Sync + Hash + Ord + FromPrimitive
{
}

impl<T> CountType for T where
    T: Num + AddAssign + Default + Copy + Debug + Display + Send + Sync + Hash + Ord + FromPrimitive
{
}

/// A type that can be used as a string token key.
pub trait StringChunkType:
    for<'a> From<&'a str> + AsRef<str> + Debug + Clone + Send + Sync + Eq + Hash
{
}

impl<T> StringChunkType for T where
    T: for<'a> From<&'a str> + AsRef<str> + Debug + Clone + Send + Sync + Eq + Hash
{
}

/// One file's tokens, in source order.
pub type TokenList = Vec<String>;

/// Token string to id map.
pub type TokenToIdMap<T> = ahash::AHashMap<String, T>;

/// Convert a `usize` position into a token id.
///
/// Fails when the position does not fit in `T`.
pub fn try_id_from_usize<T: TokenId>(value: usize) -> anyhow::Result<T> {
    T::from_usize(value)
        .ok_or_else(|| anyhow::anyhow!("token id {value} does not fit in the id type"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_id_from_usize() {
        assert_eq!(try_id_from_usize::<u32>(7).unwrap(), 7_u32);
        assert_eq!(try_id_from_usize::<u16>(65535).unwrap(), u16::MAX);
        assert!(try_id_from_usize::<u16>(65536).is_err());
        assert!(try_id_from_usize::<u8>(256).is_err());
    }
}
