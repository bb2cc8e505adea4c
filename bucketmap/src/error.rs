use thiserror::Error;

/// Errors reported by the hash tables
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A table always needs at least one slot or bucket
    #[error("invalid capacity {0}: a table needs at least one bucket")]
    InvalidCapacity(usize),

    /// Open addressing cannot shrink below the number of live entries
    #[error("cannot resize to {requested} slots while holding {size} entries")]
    CapacityBelowSize { requested: usize, size: usize },

    /// Invalid probing configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, TableError>;

impl From<String> for TableError {
    fn from(msg: String) -> Self {
        TableError::InvalidConfig(msg)
    }
}
