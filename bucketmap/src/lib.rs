//! Hash tables with string keys and two collision strategies:
//! [`OpenAddressingTable`] (quadratic probing with tombstones) and
//! [`ChainingTable`] (separate chaining). Both implement [`HashTable`] and take
//! their hash function as an injected [`KeyHasher`].
pub mod chaining;
pub mod config;
pub mod entry;
pub mod error;
pub mod hasher;
pub mod open_addressing;
pub mod table;

pub use chaining::ChainingTable;
pub use config::ProbeConfig;
pub use entry::{Entry, Slot};
pub use error::{Result, TableError};
pub use hasher::{BuildKeyHasher, FxKeyHasher, KeyHasher, SumHasher, WeightedSumHasher};
pub use open_addressing::OpenAddressingTable;
pub use table::HashTable;
