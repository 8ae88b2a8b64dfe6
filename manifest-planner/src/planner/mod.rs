//! Itinerary and document planning.
//!
//! This module holds the three pure operations behind the manifest form:
//! deriving the route from the stop lists, spreading linked documents over
//! the unloading stops, and merging stop edits into the persisted draft.
//! None of them perform I/O or keep state between calls.

mod config;
mod distribute;
mod reconcile;
mod route;

pub use config::PlannerConfig;
pub use distribute::{
    Distribution, UnknownDistribution, assign_sticky, distribute_documents, round_robin,
};
pub use reconcile::{reconcile_stops, redistribute_documents};
pub use route::{RouteError, compute_route};
