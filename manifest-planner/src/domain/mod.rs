//! Domain types for manifest itinerary planning.
//!
//! This module contains the core domain model types that represent
//! validated manifest data. Codes and keys enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity. Stops may be incomplete while the user is still editing.

mod access_key;
mod completeness;
mod division;
mod document;
mod error;
mod fragment;
mod region;
mod route;
mod stop;

pub use access_key::{ACCESS_KEY_LEN, AccessKey, InvalidAccessKey};
pub use completeness::{Completeness, Gap};
pub use division::{DivisionId, InvalidDivisionId};
pub use document::{DocumentKind, LinkedDocument};
pub use error::DomainError;
pub use fragment::{ManifestFragment, StopRecord};
pub use region::{InvalidRegionCode, RegionCode};
pub use route::Route;
pub use stop::{Stop, StopRole};
