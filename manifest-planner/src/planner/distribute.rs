//! Spreading linked documents across unloading stops.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{LinkedDocument, ManifestFragment, Stop};

/// Spread documents across stops, one bucket per stop.
///
/// Documents are dealt out like cards: document `i` goes to bucket
/// `i % stops.len()`. With no stops there are no buckets, and the caller
/// keeps the documents unassigned.
///
/// Assignment is positional: the same document may land at a different
/// stop after the stop count changes.
///
/// # Examples
///
/// ```
/// use manifest_planner::domain::{AccessKey, DocumentKind, LinkedDocument, Stop, StopRole};
/// use manifest_planner::planner::distribute_documents;
///
/// let docs: Vec<_> = (0..3)
///     .map(|n| {
///         let key = AccessKey::parse(&format!("{n:0>44}")).unwrap();
///         LinkedDocument::new(DocumentKind::NFe, key)
///     })
///     .collect();
/// let stops = vec![Stop::new(StopRole::Unloading), Stop::new(StopRole::Unloading)];
///
/// let buckets = distribute_documents(&docs, &stops);
/// assert_eq!(buckets[0], vec![docs[0].clone(), docs[2].clone()]);
/// assert_eq!(buckets[1], vec![docs[1].clone()]);
/// ```
pub fn distribute_documents(
    documents: &[LinkedDocument],
    stops: &[Stop],
) -> Vec<Vec<LinkedDocument>> {
    round_robin(documents, stops.len())
}

/// Deal `documents` into `bucket_count` buckets by position.
pub fn round_robin(documents: &[LinkedDocument], bucket_count: usize) -> Vec<Vec<LinkedDocument>> {
    if bucket_count == 0 {
        return Vec::new();
    }

    let mut buckets = vec![Vec::new(); bucket_count];
    for (i, doc) in documents.iter().enumerate() {
        buckets[i % bucket_count].push(doc.clone());
    }
    buckets
}

/// Place documents while keeping existing assignments where possible.
///
/// `previous[i]` holds the documents assigned to stop `i` before the edit.
/// Buckets whose index still exists are kept as they are. Documents from
/// buckets past the new stop count, followed by `pending`, are each placed
/// on the stop currently holding the fewest documents (lowest index on
/// ties).
pub fn assign_sticky(
    previous: &[Vec<LinkedDocument>],
    pending: &[LinkedDocument],
    bucket_count: usize,
) -> Vec<Vec<LinkedDocument>> {
    if bucket_count == 0 {
        return Vec::new();
    }

    let mut buckets: Vec<Vec<LinkedDocument>> = (0..bucket_count)
        .map(|i| previous.get(i).cloned().unwrap_or_default())
        .collect();

    let orphans = previous
        .iter()
        .skip(bucket_count)
        .flatten()
        .chain(pending.iter());

    for doc in orphans {
        if let Some(target) = buckets
            .iter_mut()
            .enumerate()
            .min_by_key(|(i, bucket)| (bucket.len(), *i))
            .map(|(_, bucket)| bucket)
        {
            target.push(doc.clone());
        }
    }

    buckets
}

/// How documents are reassigned when stops or documents change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// Deal every document again from scratch on each change.
    #[default]
    Reshuffle,
    /// Keep documents at the stop they were assigned to while that stop
    /// index exists; only orphaned and new documents move.
    Sticky,
}

impl Distribution {
    /// Compute the buckets for `bucket_count` unloading stops.
    ///
    /// Starts from the documents already held by `fragment` and adds
    /// `extra` as new documents.
    pub fn redistribute(
        &self,
        fragment: &ManifestFragment,
        extra: &[LinkedDocument],
        bucket_count: usize,
    ) -> Vec<Vec<LinkedDocument>> {
        match self {
            Distribution::Reshuffle => {
                let mut documents = fragment.documents();
                documents.extend_from_slice(extra);
                round_robin(&documents, bucket_count)
            }
            Distribution::Sticky => {
                let previous: Vec<Vec<LinkedDocument>> = fragment
                    .unloading
                    .iter()
                    .map(|r| r.documents.clone())
                    .collect();
                let mut pending = fragment.unassigned.clone();
                pending.extend_from_slice(extra);
                assign_sticky(&previous, &pending, bucket_count)
            }
        }
    }
}

/// Error returned when parsing an unknown distribution name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown distribution strategy: {0} (expected reshuffle or sticky)")]
pub struct UnknownDistribution(String);

impl FromStr for Distribution {
    type Err = UnknownDistribution;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reshuffle" => Ok(Distribution::Reshuffle),
            "sticky" => Ok(Distribution::Sticky),
            _ => Err(UnknownDistribution(s.to_string())),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Reshuffle => f.write_str("reshuffle"),
            Distribution::Sticky => f.write_str("sticky"),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{AccessKey, DocumentKind, StopRole};
    use proptest::prelude::*;

    fn docs(n: usize) -> Vec<LinkedDocument> {
        (0..n)
            .map(|i| {
                let key = AccessKey::parse(&format!("{i:0>44}")).unwrap();
                LinkedDocument::new(DocumentKind::NFe, key)
            })
            .collect()
    }

    proptest! {
        /// One bucket per stop, nothing lost, sizes within one of each other
        #[test]
        fn balanced_and_complete(n_docs in 0usize..40, n_stops in 1usize..8) {
            let documents = docs(n_docs);
            let stops = vec![Stop::new(StopRole::Unloading); n_stops];
            let buckets = distribute_documents(&documents, &stops);

            prop_assert_eq!(buckets.len(), n_stops);
            prop_assert_eq!(buckets.iter().map(Vec::len).sum::<usize>(), n_docs);

            let max = buckets.iter().map(Vec::len).max().unwrap_or(0);
            let min = buckets.iter().map(Vec::len).min().unwrap_or(0);
            prop_assert!(max - min <= 1);
        }

        /// Sticky placement never loses or duplicates a document
        #[test]
        fn sticky_preserves_documents(
            sizes in prop::collection::vec(0usize..5, 0..6),
            n_pending in 0usize..6,
            n_stops in 1usize..6,
        ) {
            let total: usize = sizes.iter().sum::<usize>() + n_pending;
            let all = docs(total);
            let mut cursor = all.iter().cloned();
            let previous: Vec<Vec<LinkedDocument>> = sizes
                .iter()
                .map(|&s| cursor.by_ref().take(s).collect())
                .collect();
            let pending: Vec<LinkedDocument> = cursor.collect();

            let buckets = assign_sticky(&previous, &pending, n_stops);
            prop_assert_eq!(buckets.len(), n_stops);

            let mut placed: Vec<LinkedDocument> = buckets.into_iter().flatten().collect();
            placed.sort_by(|a, b| a.access_key.cmp(&b.access_key));
            prop_assert_eq!(placed, all);
        }
    }
}
