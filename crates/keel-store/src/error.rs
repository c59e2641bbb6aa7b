/// Errors from repository operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// A required argument was absent.
    #[error("required argument is absent: {0}")]
    NullArgument(&'static str),

    /// A paging request carried a non-empty sort specification.
    #[error("arbitrary sorting is not implemented: {0}")]
    UnsupportedSort(String),

    /// The requested operation is never supported by this store.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// Negative offset or page size.
    #[error("invalid page request: offset {offset}, size {size}")]
    InvalidPageRequest { offset: i64, size: i64 },

    /// A writer panicked while holding the store guard.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),

    /// The store configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

/// Result alias for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;
