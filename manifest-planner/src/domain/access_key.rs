//! Fiscal document access keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of digits in an access key.
pub const ACCESS_KEY_LEN: usize = 44;

/// Error returned when parsing an invalid access key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid access key: {reason}")]
pub struct InvalidAccessKey {
    reason: &'static str,
}

/// A 44-digit access key referencing an external fiscal document.
///
/// Any `AccessKey` value is exactly 44 ASCII digits. The trailing check
/// digit is not verified on parse; use [`AccessKey::has_valid_check_digit`]
/// when stricter validation is wanted.
///
/// # Examples
///
/// ```
/// use manifest_planner::domain::AccessKey;
///
/// let key = AccessKey::parse("35240112345678000195570010000001231000000124").unwrap();
/// assert_eq!(key.model_code(), "57");
/// assert!(key.has_valid_check_digit());
///
/// assert!(AccessKey::parse("1234").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessKey([u8; ACCESS_KEY_LEN]);

impl AccessKey {
    /// Parse an access key.
    ///
    /// The input must be exactly 44 ASCII digits, with no separators.
    pub fn parse(s: &str) -> Result<Self, InvalidAccessKey> {
        let bytes = s.as_bytes();

        if bytes.len() != ACCESS_KEY_LEN {
            return Err(InvalidAccessKey {
                reason: "must be exactly 44 digits",
            });
        }

        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(InvalidAccessKey {
                reason: "must contain only ASCII digits",
            });
        }

        let mut digits = [0u8; ACCESS_KEY_LEN];
        digits.copy_from_slice(bytes);
        Ok(AccessKey(digits))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Returns the two-digit document model code embedded at positions 21-22.
    pub fn model_code(&self) -> &str {
        &self.as_str()[20..22]
    }

    /// Returns the trailing check digit.
    pub fn check_digit(&self) -> u8 {
        self.0[ACCESS_KEY_LEN - 1] - b'0'
    }

    /// Computes the modulo-11 check digit over the first 43 digits.
    ///
    /// Weights run 2..=9 from the rightmost digit and wrap around.
    /// Remainders 0 and 1 yield a check digit of 0.
    pub fn expected_check_digit(&self) -> u8 {
        let sum: u32 = self.0[..ACCESS_KEY_LEN - 1]
            .iter()
            .rev()
            .zip((2..=9).cycle())
            .map(|(b, weight)| u32::from(b - b'0') * weight)
            .sum();

        match sum % 11 {
            0 | 1 => 0,
            rem => (11 - rem) as u8,
        }
    }

    /// Returns true if the trailing digit matches the computed check digit.
    pub fn has_valid_check_digit(&self) -> bool {
        self.check_digit() == self.expected_check_digit()
    }
}

impl TryFrom<String> for AccessKey {
    type Error = InvalidAccessKey;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        AccessKey::parse(&s)
    }
}

impl From<AccessKey> for String {
    fn from(key: AccessKey) -> Self {
        key.as_str().to_string()
    }
}

impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessKey({})", self.as_str())
    }
}

impl fmt::Display for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTE_KEY: &str = "35240112345678000195570010000001231000000124";
    const NFE_KEY: &str = "29240198765432000110550010000007891000000785";

    #[test]
    fn parse_valid_keys() {
        assert!(AccessKey::parse(CTE_KEY).is_ok());
        assert!(AccessKey::parse(NFE_KEY).is_ok());
        assert!(AccessKey::parse(&"0".repeat(44)).is_ok());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(AccessKey::parse("").is_err());
        assert!(AccessKey::parse(&CTE_KEY[..43]).is_err());
        assert!(AccessKey::parse(&format!("{CTE_KEY}1")).is_err());
    }

    #[test]
    fn reject_non_digits() {
        let mut with_letter = CTE_KEY.to_string();
        with_letter.replace_range(10..11, "A");
        assert!(AccessKey::parse(&with_letter).is_err());

        let spaced = format!("{} {}", &CTE_KEY[..22], &CTE_KEY[23..]);
        assert!(AccessKey::parse(&spaced).is_err());
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            AccessKey::parse("12").unwrap_err().to_string(),
            "invalid access key: must be exactly 44 digits"
        );
        assert_eq!(
            AccessKey::parse(&"x".repeat(44)).unwrap_err().to_string(),
            "invalid access key: must contain only ASCII digits"
        );
    }

    #[test]
    fn model_code() {
        assert_eq!(AccessKey::parse(CTE_KEY).unwrap().model_code(), "57");
        assert_eq!(AccessKey::parse(NFE_KEY).unwrap().model_code(), "55");
    }

    #[test]
    fn check_digit_verification() {
        let key = AccessKey::parse(CTE_KEY).unwrap();
        assert_eq!(key.check_digit(), 4);
        assert!(key.has_valid_check_digit());

        let tampered = AccessKey::parse("35240112345678000195570010000001231000000125").unwrap();
        assert!(!tampered.has_valid_check_digit());
        assert_eq!(tampered.expected_check_digit(), 4);
    }

    #[test]
    fn all_zero_key_has_zero_check_digit() {
        let key = AccessKey::parse(&"0".repeat(44)).unwrap();
        assert!(key.has_valid_check_digit());
    }

    #[test]
    fn serde_as_string() {
        let key = AccessKey::parse(NFE_KEY).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{NFE_KEY}\""));
        assert!(serde_json::from_str::<AccessKey>(r#""123""#).is_err());
    }
}
