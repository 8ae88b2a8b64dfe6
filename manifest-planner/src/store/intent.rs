//! Edit intents dispatched by views.

use serde::{Deserialize, Serialize};

use crate::domain::{DocumentKind, Stop, StopRole};

/// A discrete user edit to the manifest draft.
///
/// Views never modify the draft themselves: they describe what the user did
/// and let [`super::ManifestStore`] produce the next snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Append a stop to the list matching its role.
    AddStop { stop: Stop },

    /// Edit the stop at `index` in the list matching the stop's role.
    /// Fields left empty keep their previous values.
    UpdateStop { index: usize, stop: Stop },

    /// Delete a stop. Its documents are handed to the remaining stops.
    RemoveStop { role: StopRole, index: usize },

    /// Move a stop to a new position, taking its documents along.
    MoveStop {
        role: StopRole,
        from: usize,
        to: usize,
    },

    /// Replace a whole stop list, merging by position.
    ReplaceStops { role: StopRole, stops: Vec<Stop> },

    /// Link a document by its raw access key. Without an explicit kind, the
    /// kind is inferred from the key's model code.
    AddDocument {
        #[serde(default)]
        kind: Option<DocumentKind>,
        access_key: String,
    },

    /// Unlink a document by its raw access key.
    RemoveDocument { access_key: String },
}
