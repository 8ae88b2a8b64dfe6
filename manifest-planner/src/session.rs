//! Replaying recorded edit sessions.
//!
//! A session file holds a starting draft and the intents a user sent, in
//! order. Replaying it through a [`ManifestStore`] reproduces the draft the
//! form would end up with.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{Completeness, ManifestFragment};
use crate::planner::PlannerConfig;
use crate::store::{Intent, ManifestStore};

/// Errors that can occur while loading a session file.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid session
    #[error("invalid session JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A starting draft plus the intents to apply to it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditSession {
    #[serde(default)]
    pub fragment: ManifestFragment,
    #[serde(default)]
    pub intents: Vec<Intent>,
}

/// An intent the store refused, with its position in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedIntent {
    pub index: usize,
    pub reason: String,
}

/// The result of replaying a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub fragment: ManifestFragment,
    pub completeness: Completeness,
    pub rejected: Vec<RejectedIntent>,
}

impl EditSession {
    /// Load a session from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parse a session from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply every intent in order.
    ///
    /// Rejected intents are recorded and skipped; replay always runs to the
    /// end, just as the form keeps accepting edits after a bad one.
    pub fn replay(self, config: PlannerConfig) -> SessionOutcome {
        let store = ManifestStore::new(self.fragment, config);
        let mut rejected = Vec::new();

        for (index, intent) in self.intents.into_iter().enumerate() {
            if let Err(err) = store.dispatch(intent) {
                debug!(index, error = %err, "session intent rejected");
                rejected.push(RejectedIntent {
                    index,
                    reason: err.to_string(),
                });
            }
        }

        let fragment = ManifestFragment::clone(&store.snapshot());
        let completeness = fragment.completeness();
        info!(
            version = fragment.version,
            rejected = rejected.len(),
            complete = completeness.is_complete(),
            "session replayed"
        );

        SessionOutcome {
            fragment,
            completeness,
            rejected,
        }
    }
}
