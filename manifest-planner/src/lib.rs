//! Manifest itinerary planner.
//!
//! The planning core behind a transport manifest form: it derives the
//! itinerary from loading and unloading stops, spreads linked fiscal
//! documents across unloading stops, and merges stop edits into the
//! persisted draft without losing data the user already entered.

pub mod domain;
pub mod planner;
pub mod session;
pub mod store;
