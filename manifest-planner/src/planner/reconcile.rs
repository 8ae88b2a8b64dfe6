//! Merging stop edits into the persisted draft.
//!
//! Every edit produces a brand new fragment: stop fields are merged by
//! position, documents are redistributed over the new unloading stops, and
//! the route is recomputed from scratch. Nothing is patched in place.

use tracing::{debug, trace};

use super::{PlannerConfig, compute_route};
use crate::domain::{LinkedDocument, ManifestFragment, Stop, StopRecord, StopRole};

/// Merge an edited stop list into the persisted draft.
///
/// `new_stops` replaces the list for `role`. Stop `i` keeps every field the
/// edit provides; fields the edit leaves empty fall back to persisted stop
/// `i`, if there is one. Lists of different lengths are fine: indices past
/// the persisted list simply get no fallback.
///
/// All documents held anywhere in `persisted` are then reassigned to the
/// resulting unloading stops using the configured strategy, and the route is
/// recomputed. If either stop list ends up empty or a stop lacks a region,
/// the route is left unset. With no unloading stops, documents are held in
/// `unassigned`.
///
/// The persisted `version` is carried over unchanged.
pub fn reconcile_stops(
    role: StopRole,
    new_stops: &[Stop],
    persisted: &ManifestFragment,
    config: &PlannerConfig,
) -> ManifestFragment {
    let previous = persisted.stops(role);

    let merged: Vec<Stop> = new_stops
        .iter()
        .enumerate()
        .map(|(i, stop)| {
            let mut merged = match previous.get(i) {
                Some(old) => stop.filled_from(old),
                None => stop.clone(),
            };
            merged.role = role;
            merged
        })
        .collect();

    debug!(
        %role,
        new = new_stops.len(),
        persisted = previous.len(),
        documents = persisted.document_count(),
        "reconciling stop list"
    );

    let (loading, unloading) = match role {
        StopRole::Loading => (merged, persisted.stops(StopRole::Unloading)),
        StopRole::Unloading => (persisted.loading.clone(), merged),
    };

    rebuild(loading, unloading, persisted, &[], config)
}

/// Reassign the draft's documents, plus `extra`, without touching its stops.
///
/// Used after documents are added or removed. Duplicate detection is the
/// caller's job: `extra` is appended as given.
pub fn redistribute_documents(
    persisted: &ManifestFragment,
    extra: &[LinkedDocument],
    config: &PlannerConfig,
) -> ManifestFragment {
    rebuild(
        persisted.loading.clone(),
        persisted.stops(StopRole::Unloading),
        persisted,
        extra,
        config,
    )
}

fn rebuild(
    loading: Vec<Stop>,
    unloading: Vec<Stop>,
    documents_from: &ManifestFragment,
    extra: &[LinkedDocument],
    config: &PlannerConfig,
) -> ManifestFragment {
    let buckets = config
        .distribution
        .redistribute(documents_from, extra, unloading.len());

    let unassigned = if unloading.is_empty() {
        let mut held = documents_from.documents();
        held.extend_from_slice(extra);
        held
    } else {
        Vec::new()
    };

    let route = match compute_route(&loading, &unloading) {
        Ok(route) => Some(route),
        Err(reason) => {
            trace!(%reason, "route left unset");
            None
        }
    };

    let unloading: Vec<StopRecord> = unloading
        .into_iter()
        .zip(buckets)
        .map(|(stop, documents)| StopRecord::new(stop, documents))
        .collect();

    debug!(
        loading = loading.len(),
        unloading = unloading.len(),
        unassigned = unassigned.len(),
        has_route = route.is_some(),
        "fragment rebuilt"
    );

    ManifestFragment {
        version: documents_from.version,
        loading,
        unloading,
        unassigned,
        route,
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
