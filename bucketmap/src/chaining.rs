use std::fmt;

use log::debug;

use crate::entry::Entry;
use crate::error::{Result, TableError};
use crate::hasher::{KeyHasher, SumHasher};
use crate::table::HashTable;

/// Entries whose keys hash to the same bucket, in insertion order.
type Chain<V> = Vec<Entry<V>>;

/// Separate chaining hash table.
///
/// Each bucket owns an unbounded chain, so the table never runs out of room
/// and never grows by itself: capacity only changes through
/// [`resize`](HashTable::resize).
#[derive(Clone)]
pub struct ChainingTable<V, H = SumHasher> {
    buckets: Vec<Chain<V>>,
    capacity: usize,
    size: usize,
    hasher: H,
}

impl<V, H: KeyHasher> ChainingTable<V, H> {
    /// Creates a table with `capacity` empty chains
    pub fn new(capacity: usize, hasher: H) -> Result<Self> {
        if capacity < 1 {
            return Err(TableError::InvalidCapacity(capacity));
        }
        Ok(Self {
            buckets: Self::empty_chains(capacity),
            capacity,
            size: 0,
            hasher,
        })
    }

    fn empty_chains(capacity: usize) -> Vec<Chain<V>> {
        (0..capacity).map(|_| Vec::new()).collect()
    }

    /// Entries in bucket order, then chain order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.buckets
            .iter()
            .flatten()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }

    /// Length of the longest chain
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    fn bucket_index(&self, key: &str) -> usize {
        (self.hasher.hash_key(key) % self.capacity as u64) as usize
    }

    fn chain(&self, key: &str) -> &Chain<V> {
        &self.buckets[self.bucket_index(key)]
    }
}

impl<V, H: KeyHasher> HashTable<V> for ChainingTable<V, H> {
    /// An existing key is unlinked and the new entry appended, so an
    /// overwritten key moves to the end of its chain.
    fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let index = self.bucket_index(&key);
        let chain = &mut self.buckets[index];

        let previous = chain
            .iter()
            .position(|entry| entry.key == key)
            .map(|pos| chain.remove(pos).value);
        chain.push(Entry::new(key, value));

        if previous.is_none() {
            self.size += 1;
        }
        previous
    }

    fn get(&self, key: &str) -> Option<&V> {
        self.chain(key)
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.bucket_index(key);
        let chain = &mut self.buckets[index];
        let pos = chain.iter().position(|entry| entry.key == key)?;
        self.size -= 1;
        Some(chain.remove(pos).value)
    }

    fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Vec::clear);
        self.size = 0;
    }

    /// Collects every entry (bucket order, then chain order) and inserts them
    /// one by one into fresh chains.
    fn resize(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity < 1 {
            return Err(TableError::InvalidCapacity(new_capacity));
        }
        debug!(
            "resizing chaining table {} -> {} buckets ({} entries)",
            self.capacity, new_capacity, self.size
        );

        let old_buckets = std::mem::replace(&mut self.buckets, Self::empty_chains(new_capacity));
        self.capacity = new_capacity;
        self.size = 0;

        for entry in old_buckets.into_iter().flatten() {
            self.insert(entry.key, entry.value);
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.size
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    fn keys(&self) -> Vec<&str> {
        self.iter().map(|(key, _)| key).collect()
    }
}

impl<V: fmt::Debug, H> fmt::Display for ChainingTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            write!(f, "{index}:")?;
            for (pos, entry) in chain.iter().enumerate() {
                let sep = if pos == 0 { " " } else { " -> " };
                write!(f, "{sep}{entry}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::WeightedSumHasher;
    use proptest::prelude::*;
    use std::collections::HashMap as StdHashMap;

    type SumTable = ChainingTable<i64, SumHasher>;

    fn constant(_: &str) -> u64 {
        0
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert_eq!(
            SumTable::new(0, SumHasher).err(),
            Some(TableError::InvalidCapacity(0))
        );
    }

    #[test]
    fn test_insert_and_get() {
        let mut table = SumTable::new(30, SumHasher).unwrap();
        assert_eq!(table.get("key"), None);
        table.insert("key1", 10);
        assert_eq!(table.get("key1"), Some(&10));
    }

    #[test]
    fn test_overwrite_moves_key_to_chain_end() {
        let mut table = ChainingTable::new(4, constant).unwrap();
        table.insert("a", 1);
        table.insert("b", 2);
        table.insert("c", 3);

        assert_eq!(table.insert("a", 10), Some(1));
        assert_eq!(table.len(), 3);
        assert_eq!(table.keys(), vec!["b", "c", "a"]);
        assert_eq!(table.get("a"), Some(&10));
        assert_eq!(table.longest_chain(), 3);
        assert_eq!(table.empty_buckets(), 3);
    }

    #[test]
    fn test_never_grows() {
        let mut table = SumTable::new(50, SumHasher).unwrap();
        for i in 0..150 {
            table.insert(format!("str{i}"), i * 100);
        }
        assert_eq!(table.capacity(), 50);
        assert_eq!(table.len(), 150);
        assert_eq!(table.table_load(), 3.0);
    }

    #[test]
    fn test_overwrites_keep_size() {
        let mut table = ChainingTable::new(40, WeightedSumHasher).unwrap();
        for i in 0..50 {
            table.insert(format!("str{}", i / 3), i * 100);
        }
        assert_eq!(table.len(), 17);
        assert_eq!(table.get("str16"), Some(&4900));
        assert_eq!(table.get("str0"), Some(&200));
    }

    #[test]
    fn test_remove() {
        let mut table = SumTable::new(50, SumHasher).unwrap();
        table.insert("key1", 10);
        assert_eq!(table.remove("key1"), Some(10));
        assert_eq!(table.get("key1"), None);
        assert_eq!(table.len(), 0);
        assert_eq!(table.remove("key4"), None);
        assert_eq!(table.empty_buckets(), 50);
    }

    #[test]
    fn test_remove_keeps_chain_neighbours() {
        let mut table = ChainingTable::new(1, constant).unwrap();
        table.insert("a", 1);
        table.insert("b", 2);
        table.insert("c", 3);
        table.remove("b");
        assert_eq!(table.keys(), vec!["a", "c"]);
        assert_eq!(table.get("c"), Some(&3));
    }

    #[test]
    fn test_resize() {
        let mut table = SumTable::new(20, SumHasher).unwrap();
        table.insert("key1", 10);
        table.resize(30).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.capacity(), 30);
        assert_eq!(table.get("key1"), Some(&10));
    }

    #[test]
    fn test_resize_may_shrink_below_size() {
        let mut table = ChainingTable::new(10, WeightedSumHasher).unwrap();
        for i in (100..200).step_by(10) {
            table.insert(i.to_string(), (i * 10).to_string());
        }
        table.resize(1).unwrap();
        assert_eq!(table.capacity(), 1);
        assert_eq!(table.len(), 10);
        assert_eq!(table.empty_buckets(), 0);
        assert_eq!(table.longest_chain(), 10);

        table.insert("200", "2000".to_string());
        table.remove("100");
        table.resize(2).unwrap();
        let mut keys = table.keys();
        keys.sort_unstable();
        let mut expected: Vec<String> = (110..=200).step_by(10).map(|i| i.to_string()).collect();
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_resize_keeps_collected_order() {
        let mut table = ChainingTable::new(3, constant).unwrap();
        for key in ["x", "y", "z"] {
            table.insert(key, ());
        }
        table.resize(7).unwrap();
        assert_eq!(table.keys(), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_invalid_resize_is_rejected() {
        let mut table = SumTable::new(10, SumHasher).unwrap();
        table.insert("key1", 1);
        assert_eq!(table.resize(0), Err(TableError::InvalidCapacity(0)));
        assert_eq!(table.capacity(), 10);
        assert_eq!(table.get("key1"), Some(&1));
    }

    #[test]
    fn test_clear() {
        let mut table = SumTable::new(100, SumHasher).unwrap();
        table.insert("key1", 10);
        table.insert("key2", 20);
        table.insert("key1", 30);
        assert_eq!(table.len(), 2);
        table.clear();
        assert_eq!(table.len(), 0);
        assert_eq!(table.capacity(), 100);
        assert_eq!(table.empty_buckets(), 100);
    }

    #[test]
    fn test_display() {
        let mut table = ChainingTable::new(2, |key: &str| -> u64 { key.len() as u64 }).unwrap();
        table.insert("a", 1);
        table.insert("bb", 2);
        table.insert("cc", 3);
        assert_eq!(table.to_string(), "0: (bb: 2) -> (cc: 3)\n1: (a: 1)\n");
    }

    fn check_prop(hm: StdHashMap<String, i64>, capacity: usize) {
        let mut table = SumTable::new(capacity, SumHasher).unwrap();

        for (k, v) in hm.iter() {
            table.insert(k.as_str(), *v);
        }

        assert_eq!(table.len(), hm.len());
        let occupied = table.capacity() - table.empty_buckets();
        assert!(occupied <= table.len());

        for (k, v) in hm.iter() {
            assert_eq!(table.get(k), Some(v), "key: {k:?}");
        }
    }

    #[test]
    fn it_s_a_hash_map() {
        let small_hash_map_prop =
            proptest::collection::hash_map("[a-z0-9]{1,12}", proptest::num::i64::ANY, 1..250);

        proptest!(|(values in small_hash_map_prop, capacity in 1usize..64)|{
            check_prop(values, capacity);
        });
    }
}
