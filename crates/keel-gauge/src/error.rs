//! Error types for gauge operations.

use thiserror::Error;

use keel_store::StoreError;

/// Errors that can occur while handling gauge updates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GaugeError {
    /// A required argument was absent or blank.
    #[error("{0} can not be null")]
    NullArgument(&'static str),

    /// The message payload is not a number or a base-10 integer string.
    #[error("cannot convert {type_name} to long: {reason}")]
    Conversion {
        type_name: &'static str,
        reason: String,
    },

    /// The gauge backing store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience type alias for gauge operations.
pub type Result<T> = std::result::Result<T, GaugeError>;
