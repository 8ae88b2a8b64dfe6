//! Domain error types.
//!
//! These errors represent input that cannot enter the manifest model.
//! Incomplete drafts are not errors; see [`super::Completeness`].

use super::{AccessKey, InvalidAccessKey, InvalidDivisionId, InvalidRegionCode};

/// Domain-level errors raised while constructing model values.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Region code is not two uppercase letters
    #[error(transparent)]
    InvalidRegionCode(#[from] InvalidRegionCode),

    /// Division identifier is not a positive integer
    #[error(transparent)]
    InvalidDivisionId(#[from] InvalidDivisionId),

    /// Access key is not 44 digits
    #[error(transparent)]
    InvalidAccessKey(#[from] InvalidAccessKey),

    /// Access key's trailing digit does not match its body
    #[error("access key {0} has an invalid check digit")]
    CheckDigitMismatch(AccessKey),

    /// Access key names a document model this manifest cannot carry
    #[error("unknown document model code: {0}")]
    UnknownModel(String),
}
