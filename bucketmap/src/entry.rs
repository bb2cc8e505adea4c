use std::fmt;

/// A key/value pair stored in either table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<V> {
    pub key: String,
    pub value: V,
}

impl<V> Entry<V> {
    pub fn new(key: String, value: V) -> Self {
        Self { key, value }
    }
}

impl<V: fmt::Debug> fmt::Display for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}: {:?})", self.key, self.value)
    }
}

/// One cell of the open addressing slot array.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Slot<V> {
    #[default]
    Empty,
    Occupied(Entry<V>),
    /// Was occupied once; keeps probe sequences running through it.
    Tombstone,
}

impl<V> Slot<V> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    pub fn entry(&self) -> Option<&Entry<V>> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    pub fn entry_mut(&mut self) -> Option<&mut Entry<V>> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    /// Replaces a live entry with a tombstone, handing the entry back.
    pub fn bury(&mut self) -> Option<Entry<V>> {
        match std::mem::replace(self, Slot::Tombstone) {
            Slot::Occupied(entry) => Some(entry),
            other => {
                *self = other;
                None
            }
        }
    }
}

impl<V: fmt::Debug> fmt::Display for Slot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Empty => write!(f, "None"),
            Slot::Occupied(entry) => write!(f, "{entry}"),
            Slot::Tombstone => write!(f, "<tombstone>"),
        }
    }
}
