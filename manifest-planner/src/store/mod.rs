//! Single source of truth for a manifest draft.
//!
//! Every view of the draft reads snapshots from one [`ManifestStore`] and
//! sends it [`Intent`]s. The store funnels each intent through the planner,
//! bumps the snapshot version and publishes the result to subscribers.

mod error;
mod intent;

pub use error::StoreError;
pub use intent::Intent;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::{AccessKey, DomainError, LinkedDocument, ManifestFragment, StopRole};
use crate::planner::{PlannerConfig, reconcile_stops, redistribute_documents};

/// Reducer-style store holding the current draft snapshot.
///
/// Snapshots are immutable: each accepted intent produces a new
/// `Arc<ManifestFragment>` with `version` one higher than the last
/// (saturating at `u64::MAX`).
pub struct ManifestStore {
    config: PlannerConfig,
    sender: watch::Sender<Arc<ManifestFragment>>,
}

impl ManifestStore {
    /// Create a store starting from a previously persisted draft.
    ///
    /// The draft is normalized before it becomes the first snapshot: repeated
    /// access keys are dropped, documents are dealt over the unloading stops
    /// and the route is recomputed. The version is kept as loaded.
    pub fn new(mut initial: ManifestFragment, config: PlannerConfig) -> Self {
        let dropped = initial.remove_duplicate_documents();
        if dropped > 0 {
            warn!(dropped, "duplicate documents dropped from starting draft");
        }
        let initial = redistribute_documents(&initial, &[], &config);

        let (sender, _) = watch::channel(Arc::new(initial));
        Self { config, sender }
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Arc<ManifestFragment> {
        self.sender.borrow().clone()
    }

    /// Subscribe to future snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Arc<ManifestFragment>> {
        self.sender.subscribe()
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Apply an intent and publish the resulting snapshot.
    ///
    /// On error the current snapshot is kept and nothing is published.
    pub fn dispatch(&self, intent: Intent) -> Result<Arc<ManifestFragment>, StoreError> {
        let current = self.snapshot();

        let mut next = match self.apply(&current, intent) {
            Ok(next) => next,
            Err(err) => {
                debug!(version = current.version, error = %err, "intent rejected");
                return Err(err);
            }
        };
        next.version = current.version.saturating_add(1);

        debug!(
            version = next.version,
            loading = next.loading.len(),
            unloading = next.unloading.len(),
            documents = next.document_count(),
            "snapshot published"
        );

        let next = Arc::new(next);
        self.sender.send_replace(next.clone());
        Ok(next)
    }

    fn apply(
        &self,
        current: &ManifestFragment,
        intent: Intent,
    ) -> Result<ManifestFragment, StoreError> {
        let config = &self.config;

        match intent {
            Intent::AddStop { stop } => {
                let role = stop.role;
                let mut stops = current.stops(role);
                stops.push(stop);
                Ok(reconcile_stops(role, &stops, current, config))
            }

            Intent::UpdateStop { index, stop } => {
                let role = stop.role;
                let mut stops = current.stops(role);
                check_index(role, index, stops.len())?;
                stops[index] = stop;
                Ok(reconcile_stops(role, &stops, current, config))
            }

            Intent::RemoveStop { role, index } => {
                check_index(role, index, current.stop_count(role))?;
                let mut working = current.clone();
                match role {
                    StopRole::Loading => {
                        working.loading.remove(index);
                    }
                    StopRole::Unloading => {
                        let removed = working.unloading.remove(index);
                        working.unassigned.extend(removed.documents);
                    }
                }
                let stops = working.stops(role);
                Ok(reconcile_stops(role, &stops, &working, config))
            }

            Intent::MoveStop { role, from, to } => {
                let len = current.stop_count(role);
                check_index(role, from, len)?;
                check_index(role, to, len)?;
                let mut working = current.clone();
                match role {
                    StopRole::Loading => {
                        let stop = working.loading.remove(from);
                        working.loading.insert(to, stop);
                    }
                    StopRole::Unloading => {
                        let record = working.unloading.remove(from);
                        working.unloading.insert(to, record);
                    }
                }
                let stops = working.stops(role);
                Ok(reconcile_stops(role, &stops, &working, config))
            }

            Intent::ReplaceStops { role, stops } => {
                Ok(reconcile_stops(role, &stops, current, config))
            }

            Intent::AddDocument { kind, access_key } => {
                let document = match kind {
                    Some(kind) => {
                        LinkedDocument::parse(kind, &access_key, config.verify_check_digit)?
                    }
                    None => LinkedDocument::parse_inferred(&access_key, config.verify_check_digit)?,
                };
                if current.contains_document(&document.access_key) {
                    return Err(StoreError::DuplicateDocument(document.access_key));
                }
                Ok(redistribute_documents(current, &[document], config))
            }

            Intent::RemoveDocument { access_key } => {
                let access_key = AccessKey::parse(&access_key).map_err(DomainError::from)?;
                if !current.contains_document(&access_key) {
                    return Err(StoreError::UnknownDocument(access_key));
                }
                let mut working = current.clone();
                for record in &mut working.unloading {
                    record.documents.retain(|d| d.access_key != access_key);
                }
                working.unassigned.retain(|d| d.access_key != access_key);
                Ok(redistribute_documents(&working, &[], config))
            }
        }
    }
}

fn check_index(role: StopRole, index: usize, len: usize) -> Result<(), StoreError> {
    if index < len {
        Ok(())
    } else {
        Err(StoreError::StopIndexOutOfRange { role, index, len })
    }
}
