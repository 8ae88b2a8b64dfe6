//! Itinerary derivation from stop lists.

use crate::domain::{RegionCode, Route, Stop, StopRole};

/// Why an itinerary cannot be derived yet.
///
/// These are "not yet computable" states rather than failures: callers
/// leave the route unset until the stops are filled in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// One of the stop lists is empty
    #[error("no {0} stops")]
    NoStops(StopRole),

    /// A stop has no region code yet
    #[error("{role} stop {index} has no region code")]
    MissingRegion { role: StopRole, index: usize },
}

/// Derive the itinerary for a trip.
///
/// The trip starts at the first loading stop and ends at the last unloading
/// stop. Every stop is visited in order, loading stops first. Consecutive
/// stops in the same region count as one visit, since the truck never
/// leaves that region between them.
///
/// Intermediate regions are the visited regions minus any occurrence of the
/// start or end region, keeping traversal order. A region left and later
/// re-entered is reported once per visit.
///
/// # Errors
///
/// Returns `Err` if either list is empty or any stop lacks a region code.
///
/// # Examples
///
/// ```
/// use manifest_planner::domain::{RegionCode, Stop, StopRole};
/// use manifest_planner::planner::compute_route;
///
/// let uf = |s: &str| RegionCode::parse(s).unwrap();
/// let loading = vec![Stop::new(StopRole::Loading).with_region(uf("SP"))];
/// let unloading = vec![
///     Stop::new(StopRole::Unloading).with_region(uf("MG")),
///     Stop::new(StopRole::Unloading).with_region(uf("BA")),
/// ];
///
/// let route = compute_route(&loading, &unloading).unwrap();
/// assert_eq!(route.start_region(), uf("SP"));
/// assert_eq!(route.end_region(), uf("BA"));
/// assert_eq!(route.intermediate_regions(), &[uf("MG")]);
/// ```
pub fn compute_route(loading: &[Stop], unloading: &[Stop]) -> Result<Route, RouteError> {
    let loading_regions = regions_of(loading, StopRole::Loading)?;
    let unloading_regions = regions_of(unloading, StopRole::Unloading)?;

    let start = loading_regions[0];
    let end = unloading_regions[unloading_regions.len() - 1];

    let mut visited: Vec<RegionCode> = loading_regions
        .into_iter()
        .chain(unloading_regions)
        .collect();
    visited.dedup();

    let intermediate = visited
        .iter()
        .copied()
        .filter(|region| *region != start && *region != end)
        .collect();

    Ok(Route::new(start, end, visited, intermediate))
}

fn regions_of(stops: &[Stop], role: StopRole) -> Result<Vec<RegionCode>, RouteError> {
    if stops.is_empty() {
        return Err(RouteError::NoStops(role));
    }

    stops
        .iter()
        .enumerate()
        .map(|(index, stop)| stop.region.ok_or(RouteError::MissingRegion { role, index }))
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const UFS: [&str; 6] = ["SP", "MG", "RJ", "BA", "GO", "PR"];

    fn stop_list(role: StopRole) -> impl Strategy<Value = Vec<Stop>> {
        prop::collection::vec(0..UFS.len(), 1..6).prop_map(move |idx| {
            idx.into_iter()
                .map(|i| Stop::new(role).with_region(RegionCode::parse(UFS[i]).unwrap()))
                .collect::<Vec<_>>()
        })
    }

    proptest! {
        /// Start and end always come from the first loading and last unloading stop
        #[test]
        fn endpoints_match_stops(
            loading in stop_list(StopRole::Loading),
            unloading in stop_list(StopRole::Unloading),
        ) {
            let route = compute_route(&loading, &unloading).unwrap();
            prop_assert_eq!(Some(route.start_region()), loading[0].region);
            prop_assert_eq!(Some(route.end_region()), unloading[unloading.len() - 1].region);
        }

        /// Intermediate regions never contain either endpoint
        #[test]
        fn intermediate_excludes_endpoints(
            loading in stop_list(StopRole::Loading),
            unloading in stop_list(StopRole::Unloading),
        ) {
            let route = compute_route(&loading, &unloading).unwrap();
            prop_assert!(!route.intermediate_regions().contains(&route.start_region()));
            prop_assert!(!route.intermediate_regions().contains(&route.end_region()));
        }

        /// Visited regions are non-empty and never repeat back to back
        #[test]
        fn visited_is_collapsed(
            loading in stop_list(StopRole::Loading),
            unloading in stop_list(StopRole::Unloading),
        ) {
            let route = compute_route(&loading, &unloading).unwrap();
            let visited = route.visited_regions();
            prop_assert!(!visited.is_empty());
            prop_assert_eq!(visited[0], route.start_region());
            prop_assert_eq!(visited[visited.len() - 1], route.end_region());
            prop_assert!(visited.windows(2).all(|w| w[0] != w[1]));
        }

        /// Computing twice yields the same route
        #[test]
        fn deterministic(
            loading in stop_list(StopRole::Loading),
            unloading in stop_list(StopRole::Unloading),
        ) {
            prop_assert_eq!(
                compute_route(&loading, &unloading).unwrap(),
                compute_route(&loading, &unloading).unwrap()
            );
        }
    }
}
