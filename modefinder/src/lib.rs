//! Mode finding on top of [`bucketmap::ChainingTable`].
//!
//! Occurrences are counted by brute-force pairwise comparison and stored in a
//! chaining table sized at a third of the input; the table is then scanned for
//! the highest count.

use bucketmap::{ChainingTable, HashTable, KeyHasher, Result, SumHasher};
use log::debug;

/// The most frequent values of a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mode {
    /// Every value reaching `frequency`, in table scan order
    pub values: Vec<String>,
    pub frequency: usize,
}

/// Finds the mode(s) of `items` using the byte-sum hash.
pub fn find_mode<S: AsRef<str>>(items: &[S]) -> Result<Mode> {
    find_mode_with(items, SumHasher)
}

/// Finds the mode(s) of `items`, counting with a table hashed by `hasher`.
///
/// The counting table always gets at least one bucket, so construction errors
/// are only passed through from `bucketmap`.
pub fn find_mode_with<S, H>(items: &[S], hasher: H) -> Result<Mode>
where
    S: AsRef<str>,
    H: KeyHasher,
{
    let capacity = (items.len() / 3).max(1);
    let mut counts = ChainingTable::new(capacity, hasher)?;

    for item in items {
        let item = item.as_ref();
        let count = items.iter().filter(|other| other.as_ref() == item).count();
        counts.insert(item, count);
    }
    debug!(
        "counted {} distinct values over {} buckets",
        counts.len(),
        counts.capacity()
    );

    let frequency = counts.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let values = counts
        .iter()
        .filter(|(_, count)| **count == frequency)
        .map(|(value, _)| value.to_string())
        .collect();

    Ok(Mode { values, frequency })
}
