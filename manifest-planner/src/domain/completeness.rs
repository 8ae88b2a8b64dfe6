//! Completeness reporting for manifest drafts.
//!
//! A draft that is missing data is not an error: editing must never be
//! blocked. Instead the gaps are listed so a validation summary can decide
//! whether the document is ready to submit.

use serde::Serialize;

use super::StopRole;

/// One reason a draft is not yet complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "gap", rename_all = "snake_case")]
pub enum Gap {
    /// No loading stop has been entered.
    NoLoadingStop,
    /// No unloading stop has been entered.
    NoUnloadingStop,
    /// A stop lacks its region, division name or division identifier.
    UnresolvedStop { role: StopRole, index: usize },
    /// Documents are waiting for an unloading stop to be assigned to.
    UnassignedDocuments { count: usize },
    /// The itinerary could not be derived from the current stops.
    RouteUnavailable,
}

/// The list of gaps found in a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Completeness {
    gaps: Vec<Gap>,
}

impl Completeness {
    pub(crate) fn new(gaps: Vec<Gap>) -> Self {
        Self { gaps }
    }

    /// Returns true if nothing is missing.
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }

    pub fn gaps(&self) -> &[Gap] {
        &self.gaps
    }
}
