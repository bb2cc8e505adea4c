use std::fmt;

use log::{debug, trace};

use crate::config::ProbeConfig;
use crate::entry::{Entry, Slot};
use crate::error::{Result, TableError};
use crate::hasher::{KeyHasher, SumHasher};
use crate::table::HashTable;

/// Quadratic probe sequence over `capacity` slots: `home + i*i` for
/// `i = 0..=capacity`, computed incrementally so `i*i` never overflows.
struct QuadraticProbe {
    index: usize,
    step: usize,
    remaining: usize,
    capacity: usize,
}

impl QuadraticProbe {
    fn new(home: usize, capacity: usize) -> Self {
        Self {
            index: home,
            step: 0,
            remaining: capacity + 1,
            capacity,
        }
    }
}

impl Iterator for QuadraticProbe {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.index;
        self.step += 1;
        // (i+1)^2 - i^2 = 2i + 1
        let delta = (2 * self.step - 1) % self.capacity;
        self.index = (self.index + delta) % self.capacity;
        Some(current)
    }
}

/// Outcome of walking a key's probe sequence.
enum Probe {
    /// The key lives in this slot
    Found(usize),
    /// The key is absent; the first free slot on its sequence, if any
    Absent(Option<usize>),
}

/// Open addressing hash table with quadratic probing.
///
/// Removal leaves a tombstone so that keys placed further along a probe
/// sequence stay reachable. Every insert grows the table first whenever the
/// load factor after it would reach `max_load_factor` (0.5 by default), so
/// `table_load() < max_load_factor` holds after every insert.
///
/// Quadratic offsets modulo a composite capacity only reach a subset of the
/// slots. When a key's quadratic sequence is exhausted without meeting an
/// empty slot, placement and lookup continue with a linear scan from the home
/// slot, so a free slot is always found while one exists.
#[derive(Clone)]
pub struct OpenAddressingTable<V, H = SumHasher> {
    slots: Vec<Slot<V>>,
    capacity: usize,
    size: usize,
    hasher: H,
    config: ProbeConfig,
}

impl<V, H: KeyHasher> OpenAddressingTable<V, H> {
    /// Creates a table with `capacity` empty slots and the default growth policy
    pub fn new(capacity: usize, hasher: H) -> Result<Self> {
        Self::with_config(capacity, hasher, ProbeConfig::default())
    }

    pub fn with_config(capacity: usize, hasher: H, config: ProbeConfig) -> Result<Self> {
        if capacity < 1 {
            return Err(TableError::InvalidCapacity(capacity));
        }
        config.validate()?;

        Ok(Self {
            slots: Self::empty_slots(capacity),
            capacity,
            size: 0,
            hasher,
            config,
        })
    }

    fn empty_slots(capacity: usize) -> Vec<Slot<V>> {
        (0..capacity).map(|_| Slot::Empty).collect()
    }

    /// Number of tombstoned slots.
    ///
    /// `empty_buckets() + len() + tombstones() == capacity()` at all times.
    pub fn tombstones(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_deleted()).count()
    }

    /// Live entries in slot order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.slots
            .iter()
            .filter_map(Slot::entry)
            .map(|entry| (entry.key.as_str(), &entry.value))
    }

    fn home(&self, key: &str) -> usize {
        (self.hasher.hash_key(key) % self.capacity as u64) as usize
    }

    /// Walks the probe sequence of `key`.
    ///
    /// A genuinely empty slot ends the walk: nothing is ever placed past the
    /// first free slot of a sequence, and only `clear` or a rehash turn
    /// occupied slots back into empty ones.
    fn find_slot(&self, key: &str) -> Probe {
        let home = self.home(key);
        let mut first_free = None;

        for index in QuadraticProbe::new(home, self.capacity) {
            match &self.slots[index] {
                Slot::Empty => return Probe::Absent(first_free.or(Some(index))),
                Slot::Tombstone => {
                    first_free.get_or_insert(index);
                }
                Slot::Occupied(entry) if entry.key == key => return Probe::Found(index),
                Slot::Occupied(_) => {}
            }
        }

        trace!(
            "quadratic probe for {key:?} exhausted at capacity {}, scanning linearly",
            self.capacity
        );
        for index in (home..self.capacity).chain(0..home) {
            match &self.slots[index] {
                Slot::Empty => return Probe::Absent(first_free.or(Some(index))),
                Slot::Tombstone => {
                    first_free.get_or_insert(index);
                }
                Slot::Occupied(entry) if entry.key == key => return Probe::Found(index),
                Slot::Occupied(_) => {}
            }
        }

        Probe::Absent(first_free)
    }

    /// The insertion algorithm shared by `insert` and rehashing: overwrite in
    /// place when the key exists, otherwise take the first free slot.
    fn insert_entry(&mut self, entry: Entry<V>) -> Option<V> {
        match self.find_slot(&entry.key) {
            Probe::Found(index) => {
                let stored = self.slots[index]
                    .entry_mut()
                    .expect("found slot must hold an entry");
                Some(std::mem::replace(&mut stored.value, entry.value))
            }
            Probe::Absent(Some(index)) => {
                self.slots[index] = Slot::Occupied(entry);
                self.size += 1;
                None
            }
            Probe::Absent(None) => panic!(
                "no free slot for {:?}: {} live entries in {} slots",
                entry.key, self.size, self.capacity
            ),
        }
    }

    /// Would `incoming` more entries reach the load factor threshold
    fn should_grow(&self, incoming: usize) -> bool {
        (self.size + incoming) as f64 / self.capacity as f64 >= self.config.max_load_factor
    }

    /// Grows until the table stays under the threshold once `incoming` new
    /// entries are placed. Overwrites pass 0, which still grows a table left
    /// overloaded by an explicit `resize`.
    fn grow_for_insert(&mut self, incoming: usize) {
        while self.should_grow(incoming) {
            let new_capacity = self.capacity * self.config.growth_factor;
            debug!(
                "growing open addressing table {} -> {} slots ({} entries)",
                self.capacity, new_capacity, self.size
            );
            self.rehash(new_capacity);
        }
    }

    /// Swaps in a fresh slot array and reinserts the live entries of the old
    /// one in ascending slot order. Tombstones are dropped.
    fn rehash(&mut self, new_capacity: usize) {
        let old_slots = std::mem::replace(&mut self.slots, Self::empty_slots(new_capacity));
        self.capacity = new_capacity;
        self.size = 0;

        for slot in old_slots {
            if let Slot::Occupied(entry) = slot {
                self.insert_entry(entry);
            }
        }
    }
}

impl<V, H: KeyHasher> HashTable<V> for OpenAddressingTable<V, H> {
    fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let incoming = match self.find_slot(&key) {
            Probe::Found(_) => 0,
            Probe::Absent(_) => 1,
        };
        self.grow_for_insert(incoming);
        self.insert_entry(Entry::new(key, value))
    }

    fn get(&self, key: &str) -> Option<&V> {
        match self.find_slot(key) {
            Probe::Found(index) => self.slots[index].entry().map(|entry| &entry.value),
            Probe::Absent(_) => None,
        }
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        let Probe::Found(index) = self.find_slot(key) else {
            return None;
        };
        let entry = self.slots[index].bury()?;
        self.size -= 1;
        Some(entry.value)
    }

    fn clear(&mut self) {
        self.slots.fill_with(|| Slot::Empty);
        self.size = 0;
    }

    fn resize(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity < 1 {
            return Err(TableError::InvalidCapacity(new_capacity));
        }
        if new_capacity < self.size {
            return Err(TableError::CapacityBelowSize {
                requested: new_capacity,
                size: self.size,
            });
        }
        debug!(
            "resizing open addressing table {} -> {} slots ({} entries)",
            self.capacity, new_capacity, self.size
        );
        self.rehash(new_capacity);
        Ok(())
    }

    fn len(&self) -> usize {
        self.size
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn empty_buckets(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_empty()).count()
    }

    fn keys(&self) -> Vec<&str> {
        self.iter().map(|(key, _)| key).collect()
    }
}

impl<V: fmt::Debug, H> fmt::Display for OpenAddressingTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.slots.iter().enumerate() {
            writeln!(f, "{index}: {slot}")?;
        }
        Ok(())
    }
}
