//! Region code types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Federative units accepted on a manifest, plus `EX` for stops abroad.
const FEDERATIVE_UNITS: [&str; 28] = [
    "AC", "AL", "AM", "AP", "BA", "CE", "DF", "ES", "GO", "MA", "MG", "MS", "MT", "PA", "PB", "PE",
    "PI", "PR", "RJ", "RN", "RO", "RR", "RS", "SC", "SE", "SP", "TO", "EX",
];

/// Error returned when parsing an invalid region code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid region code: {reason}")]
pub struct InvalidRegionCode {
    reason: &'static str,
}

/// A two-letter region code (federative unit abbreviation).
///
/// Region codes are always 2 uppercase ASCII letters. Whether the code names
/// a unit that actually exists is a separate question, answered by
/// [`RegionCode::is_federative_unit`].
///
/// # Examples
///
/// ```
/// use manifest_planner::domain::RegionCode;
///
/// let sp = RegionCode::parse("SP").unwrap();
/// assert_eq!(sp.as_str(), "SP");
///
/// // Lowercase is rejected
/// assert!(RegionCode::parse("sp").is_err());
///
/// // Wrong length is rejected
/// assert!(RegionCode::parse("S").is_err());
/// assert!(RegionCode::parse("SPX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionCode([u8; 2]);

impl RegionCode {
    /// Parse a region code from a string.
    ///
    /// The input must be exactly 2 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidRegionCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 {
            return Err(InvalidRegionCode {
                reason: "must be exactly 2 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidRegionCode {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        Ok(RegionCode([bytes[0], bytes[1]]))
    }

    /// Returns the region code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Returns true if this is one of the known federative units (or `EX`).
    pub fn is_federative_unit(&self) -> bool {
        FEDERATIVE_UNITS.contains(&self.as_str())
    }
}

impl TryFrom<String> for RegionCode {
    type Error = InvalidRegionCode;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        RegionCode::parse(&s)
    }
}

impl From<RegionCode> for String {
    fn from(code: RegionCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Debug for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionCode({})", self.as_str())
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(RegionCode::parse("SP").is_ok());
        assert!(RegionCode::parse("MG").is_ok());
        assert!(RegionCode::parse("BA").is_ok());
        assert!(RegionCode::parse("ZZ").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(RegionCode::parse("sp").is_err());
        assert!(RegionCode::parse("Sp").is_err());
        assert!(RegionCode::parse("sP").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(RegionCode::parse("").is_err());
        assert!(RegionCode::parse("S").is_err());
        assert!(RegionCode::parse("SPA").is_err());
    }

    #[test]
    fn reject_non_letters() {
        assert!(RegionCode::parse("S1").is_err());
        assert!(RegionCode::parse("S-").is_err());
        assert!(RegionCode::parse(" P").is_err());
        assert!(RegionCode::parse("É").is_err());
    }

    #[test]
    fn known_federative_units() {
        assert!(RegionCode::parse("SP").unwrap().is_federative_unit());
        assert!(RegionCode::parse("DF").unwrap().is_federative_unit());
        assert!(RegionCode::parse("EX").unwrap().is_federative_unit());
        assert!(!RegionCode::parse("ZZ").unwrap().is_federative_unit());
    }

    #[test]
    fn display_and_debug() {
        let code = RegionCode::parse("RJ").unwrap();
        assert_eq!(format!("{}", code), "RJ");
        assert_eq!(format!("{:?}", code), "RegionCode(RJ)");
    }

    #[test]
    fn serde_as_string() {
        let code = RegionCode::parse("PR").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), r#""PR""#);

        let back: RegionCode = serde_json::from_str(r#""PR""#).unwrap();
        assert_eq!(back, code);

        assert!(serde_json::from_str::<RegionCode>(r#""pr""#).is_err());
    }
}
