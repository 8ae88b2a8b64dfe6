//! Derived travel itinerary.

use serde::Serialize;

use super::RegionCode;

/// The itinerary derived from a manifest's stop lists.
///
/// A `Route` is never edited: it is recomputed from scratch by
/// [`crate::planner::compute_route`] whenever a stop list changes.
///
/// # Invariants
///
/// - `visited_regions` is non-empty, starts with `start_region` and ends
///   with `end_region`
/// - `visited_regions` has no two equal adjacent entries
/// - `intermediate_regions` never contains `start_region` or `end_region`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    start_region: RegionCode,
    end_region: RegionCode,
    visited_regions: Vec<RegionCode>,
    intermediate_regions: Vec<RegionCode>,
}

impl Route {
    pub(crate) fn new(
        start_region: RegionCode,
        end_region: RegionCode,
        visited_regions: Vec<RegionCode>,
        intermediate_regions: Vec<RegionCode>,
    ) -> Self {
        Self {
            start_region,
            end_region,
            visited_regions,
            intermediate_regions,
        }
    }

    /// Region of the first loading stop.
    pub fn start_region(&self) -> RegionCode {
        self.start_region
    }

    /// Region of the last unloading stop.
    pub fn end_region(&self) -> RegionCode {
        self.end_region
    }

    /// Every region traversed, in order, with consecutive repeats collapsed.
    pub fn visited_regions(&self) -> &[RegionCode] {
        &self.visited_regions
    }

    /// Regions that must be declared as crossed between start and end.
    pub fn intermediate_regions(&self) -> &[RegionCode] {
        &self.intermediate_regions
    }

    /// Returns true if the trip never leaves a single region.
    pub fn is_intra_region(&self) -> bool {
        self.visited_regions.len() == 1
    }
}
