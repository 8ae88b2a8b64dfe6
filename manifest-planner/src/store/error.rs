//! Store error types.

use crate::domain::{AccessKey, DomainError, StopRole};

/// Reasons an intent is rejected. A rejected intent leaves the current
/// snapshot untouched.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The intent carried a value that cannot enter the model
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The document is already attached to this draft
    #[error("document {0} is already linked")]
    DuplicateDocument(AccessKey),

    /// The document to remove is not attached to this draft
    #[error("document {0} is not linked")]
    UnknownDocument(AccessKey),

    /// The intent referred to a stop that does not exist
    #[error("{role} stop index {index} out of range (list has {len})")]
    StopIndexOutOfRange {
        role: StopRole,
        index: usize,
        len: usize,
    },
}
