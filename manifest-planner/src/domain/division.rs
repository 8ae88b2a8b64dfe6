//! Administrative division identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when an administrative division identifier is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid division identifier: {reason}")]
pub struct InvalidDivisionId {
    reason: &'static str,
}

/// Numeric code identifying a municipality or other administrative division.
///
/// Identifiers come from an external directory lookup; the only local
/// guarantee is that the code is a positive integer.
///
/// # Examples
///
/// ```
/// use manifest_planner::domain::DivisionId;
///
/// let id = DivisionId::parse("3550308").unwrap();
/// assert_eq!(id.get(), 3550308);
/// assert_eq!(id.region_prefix(), 35);
///
/// assert!(DivisionId::new(0).is_err());
/// assert!(DivisionId::parse("35A").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DivisionId(u32);

impl DivisionId {
    /// Wrap a numeric code. Zero is rejected.
    pub fn new(code: u32) -> Result<Self, InvalidDivisionId> {
        if code == 0 {
            return Err(InvalidDivisionId {
                reason: "must be greater than zero",
            });
        }
        Ok(DivisionId(code))
    }

    /// Parse a code from its decimal representation.
    pub fn parse(s: &str) -> Result<Self, InvalidDivisionId> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidDivisionId {
                reason: "must contain only ASCII digits",
            });
        }
        let code = s.parse::<u32>().map_err(|_| InvalidDivisionId {
            reason: "out of range",
        })?;
        Self::new(code)
    }

    /// Returns the numeric code.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Returns the leading two digits, which encode the owning region in
    /// seven-digit directory codes.
    pub fn region_prefix(&self) -> u32 {
        let mut code = self.0;
        while code >= 100 {
            code /= 10;
        }
        code
    }
}

impl TryFrom<u32> for DivisionId {
    type Error = InvalidDivisionId;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        DivisionId::new(code)
    }
}

impl From<DivisionId> for u32 {
    fn from(id: DivisionId) -> Self {
        id.0
    }
}

impl fmt::Debug for DivisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DivisionId({})", self.0)
    }
}

impl fmt::Display for DivisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
