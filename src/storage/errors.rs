use thiserror::Error;

/// Errors that can arise while reading or writing nickname history.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around IO errors (directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A key in one of the trees does not have the expected layout.
    #[error("corrupt key in {tree}: {len} bytes")]
    CorruptKey { tree: &'static str, len: usize },
}
