//! Linked fiscal documents carried by a manifest.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AccessKey, DomainError};

/// The kind of fiscal document an access key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Transport knowledge document (model 57).
    #[serde(rename = "CTe")]
    CTe,
    /// Invoice document (model 55).
    #[serde(rename = "NFe")]
    NFe,
}

impl DocumentKind {
    /// Maps the model code embedded in an access key to a document kind.
    pub fn from_model_code(code: &str) -> Option<Self> {
        match code {
            "57" => Some(DocumentKind::CTe),
            "55" => Some(DocumentKind::NFe),
            _ => None,
        }
    }

    /// The model code this kind carries inside its access keys.
    pub fn model_code(&self) -> &'static str {
        match self {
            DocumentKind::CTe => "57",
            DocumentKind::NFe => "55",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::CTe => f.write_str("CTe"),
            DocumentKind::NFe => f.write_str("NFe"),
        }
    }
}

/// A fiscal document that rides along with the manifest.
///
/// Documents are identified by their access key: two documents with the
/// same key are the same document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkedDocument {
    pub kind: DocumentKind,
    pub access_key: AccessKey,
}

impl LinkedDocument {
    /// Creates a document of an explicit kind.
    pub fn new(kind: DocumentKind, access_key: AccessKey) -> Self {
        Self { kind, access_key }
    }

    /// Parses a raw key typed by the user into a document of the given kind.
    ///
    /// With `verify_check_digit` set, keys whose trailing digit does not
    /// match are rejected as well.
    pub fn parse(
        kind: DocumentKind,
        raw_key: &str,
        verify_check_digit: bool,
    ) -> Result<Self, DomainError> {
        let access_key = AccessKey::parse(raw_key)?;
        if verify_check_digit && !access_key.has_valid_check_digit() {
            return Err(DomainError::CheckDigitMismatch(access_key));
        }
        Ok(Self::new(kind, access_key))
    }

    /// Parses a raw key and infers the document kind from its model code.
    pub fn parse_inferred(raw_key: &str, verify_check_digit: bool) -> Result<Self, DomainError> {
        let access_key = AccessKey::parse(raw_key)?;
        if verify_check_digit && !access_key.has_valid_check_digit() {
            return Err(DomainError::CheckDigitMismatch(access_key));
        }
        Self::from_key(access_key)
    }

    /// Builds a document whose kind is inferred from the key's model code.
    pub fn from_key(access_key: AccessKey) -> Result<Self, DomainError> {
        let kind = DocumentKind::from_model_code(access_key.model_code())
            .ok_or_else(|| DomainError::UnknownModel(access_key.model_code().to_string()))?;
        Ok(Self::new(kind, access_key))
    }
}
