//! The persisted part of a manifest draft that this crate owns.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{AccessKey, Completeness, Gap, LinkedDocument, Route, Stop, StopRole};

/// An unloading stop together with the documents destined there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopRecord {
    #[serde(flatten)]
    pub stop: Stop,
    #[serde(default)]
    pub documents: Vec<LinkedDocument>,
}

impl StopRecord {
    pub fn new(stop: Stop, documents: Vec<LinkedDocument>) -> Self {
        Self { stop, documents }
    }
}

/// Stop lists, itinerary and per-stop document assignments of a draft.
///
/// A fragment is a snapshot: it is replaced wholesale on every edit rather
/// than patched. `version` is bumped by [`crate::store::ManifestStore`]
/// each time a new snapshot is published.
///
/// # Invariants
///
/// - Every document appears exactly once, either in one unloading record
///   or in `unassigned`
/// - `unassigned` is only non-empty while there are no unloading stops
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFragment {
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub loading: Vec<Stop>,
    #[serde(default)]
    pub unloading: Vec<StopRecord>,
    #[serde(default)]
    pub unassigned: Vec<LinkedDocument>,
    /// Always derived from the stops, so a stored value is never trusted.
    #[serde(default, skip_deserializing)]
    pub route: Option<Route>,
}

impl ManifestFragment {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the stops in the list for `role`.
    pub fn stops(&self, role: StopRole) -> Vec<Stop> {
        match role {
            StopRole::Loading => self.loading.clone(),
            StopRole::Unloading => self.unloading.iter().map(|r| r.stop.clone()).collect(),
        }
    }

    /// Number of stops in the list for `role`.
    pub fn stop_count(&self, role: StopRole) -> usize {
        match role {
            StopRole::Loading => self.loading.len(),
            StopRole::Unloading => self.unloading.len(),
        }
    }

    /// Returns every document held by the draft as one flat list.
    ///
    /// Buckets are read row by row (first document of each stop, then the
    /// second of each stop, and so on), followed by unassigned documents.
    /// For buckets filled round-robin this reproduces the original order.
    pub fn documents(&self) -> Vec<LinkedDocument> {
        let depth = self
            .unloading
            .iter()
            .map(|r| r.documents.len())
            .max()
            .unwrap_or(0);

        let mut out = Vec::with_capacity(self.document_count());
        for row in 0..depth {
            for record in &self.unloading {
                if let Some(doc) = record.documents.get(row) {
                    out.push(doc.clone());
                }
            }
        }
        out.extend(self.unassigned.iter().cloned());
        out
    }

    /// Total number of documents held by the draft.
    pub fn document_count(&self) -> usize {
        self.unloading
            .iter()
            .map(|r| r.documents.len())
            .sum::<usize>()
            + self.unassigned.len()
    }

    /// Returns true if a document with this key is already held.
    pub fn contains_document(&self, key: &AccessKey) -> bool {
        self.unloading
            .iter()
            .flat_map(|r| r.documents.iter())
            .chain(self.unassigned.iter())
            .any(|doc| &doc.access_key == key)
    }

    /// Drops every repeated access key, keeping the first occurrence when
    /// scanning the unloading stops in order and then `unassigned`.
    ///
    /// Returns how many documents were dropped.
    pub fn remove_duplicate_documents(&mut self) -> usize {
        let before = self.document_count();
        let mut seen = HashSet::new();
        for record in &mut self.unloading {
            record.documents.retain(|doc| seen.insert(doc.access_key.clone()));
        }
        self.unassigned.retain(|doc| seen.insert(doc.access_key.clone()));
        before - self.document_count()
    }

    /// Index of the unloading stop holding the document with this key.
    ///
    /// Returns `None` if the document is unassigned or not held at all.
    pub fn stop_index_of(&self, key: &AccessKey) -> Option<usize> {
        self.unloading
            .iter()
            .position(|r| r.documents.iter().any(|doc| &doc.access_key == key))
    }

    /// Lists what is still missing before the draft can be submitted.
    pub fn completeness(&self) -> Completeness {
        let mut gaps = Vec::new();

        if self.loading.is_empty() {
            gaps.push(Gap::NoLoadingStop);
        }
        if self.unloading.is_empty() {
            gaps.push(Gap::NoUnloadingStop);
        }

        for (index, stop) in self.loading.iter().enumerate() {
            if !stop.is_resolved() {
                gaps.push(Gap::UnresolvedStop {
                    role: StopRole::Loading,
                    index,
                });
            }
        }
        for (index, record) in self.unloading.iter().enumerate() {
            if !record.stop.is_resolved() {
                gaps.push(Gap::UnresolvedStop {
                    role: StopRole::Unloading,
                    index,
                });
            }
        }

        if !self.unassigned.is_empty() {
            gaps.push(Gap::UnassignedDocuments {
                count: self.unassigned.len(),
            });
        }

        if self.route.is_none() && !self.loading.is_empty() && !self.unloading.is_empty() {
            gaps.push(Gap::RouteUnavailable);
        }

        Completeness::new(gaps)
    }
}
