//! Hash strategies for table keys.
//!
//! A table never hashes keys on its own: the strategy is handed in at
//! construction and kept for the table's whole life. Anything implementing
//! [`KeyHasher`] works, including plain closures `Fn(&str) -> u64`.

use std::hash::BuildHasher;

use rustc_hash::FxBuildHasher;

/// Maps a key to a non-negative integer. Must be deterministic.
pub trait KeyHasher {
    fn hash_key(&self, key: &str) -> u64;
}

impl<F> KeyHasher for F
where
    F: Fn(&str) -> u64,
{
    fn hash_key(&self, key: &str) -> u64 {
        self(key)
    }
}

/// Sum of the key's character codes.
///
/// Anagrams collide, which makes it handy for exercising collision paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SumHasher;

impl KeyHasher for SumHasher {
    fn hash_key(&self, key: &str) -> u64 {
        key.chars().map(|c| c as u64).fold(0, u64::wrapping_add)
    }
}

/// Position-weighted sum: `sum((i + 1) * code_i)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightedSumHasher;

impl KeyHasher for WeightedSumHasher {
    fn hash_key(&self, key: &str) -> u64 {
        key.chars().enumerate().fold(0u64, |acc, (i, c)| {
            acc.wrapping_add((i as u64 + 1).wrapping_mul(c as u64))
        })
    }
}

/// Adapts a [`BuildHasher`] into a [`KeyHasher`].
///
/// The hasher state must be fixed for the table's lifetime, so seeded builders
/// like `RandomState` have to be built once and cloned, never rebuilt.
#[derive(Debug, Clone, Default)]
pub struct BuildKeyHasher<S = FxBuildHasher> {
    builder: S,
}

/// [`BuildKeyHasher`] over `rustc_hash`'s Fx hash
pub type FxKeyHasher = BuildKeyHasher<FxBuildHasher>;

impl<S: BuildHasher> BuildKeyHasher<S> {
    pub fn new(builder: S) -> Self {
        Self { builder }
    }
}

impl<S: BuildHasher> KeyHasher for BuildKeyHasher<S> {
    fn hash_key(&self, key: &str) -> u64 {
        self.builder.hash_one(key)
    }
}
