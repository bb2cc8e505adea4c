use crate::error::Result;

/// The interface shared by both collision strategies.
///
/// Keys are strings; values are arbitrary. Absent keys are never an error:
/// lookups return `None`/`false` and removals do nothing.
pub trait HashTable<V> {
    /// Inserts or overwrites, returning the previous value for `key`
    fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V>;

    fn get(&self, key: &str) -> Option<&V>;

    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, returning its value if it was present
    fn remove(&mut self, key: &str) -> Option<V>;

    /// Drops every entry, keeping the capacity
    fn clear(&mut self);

    /// Rebuilds the backing store with `new_capacity` buckets.
    ///
    /// On `Err` the table is left exactly as it was.
    fn resize(&mut self, new_capacity: usize) -> Result<()>;

    /// Number of live entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    /// `len / capacity`
    fn table_load(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    /// Buckets holding nothing at all
    fn empty_buckets(&self) -> usize;

    /// Live keys in backing-store scan order
    fn keys(&self) -> Vec<&str>;
}
