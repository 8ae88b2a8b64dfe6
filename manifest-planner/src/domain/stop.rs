//! Loading and unloading stops.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

use super::{DivisionId, RegionCode};

/// Whether a stop picks cargo up or drops it off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopRole {
    Loading,
    Unloading,
}

impl fmt::Display for StopRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopRole::Loading => f.write_str("loading"),
            StopRole::Unloading => f.write_str("unloading"),
        }
    }
}

/// A location entered by the user.
///
/// Every descriptive field is optional because stops are edited in place:
/// the region may be picked before the division lookup has resolved, and an
/// edit may omit values that an earlier lookup already filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    pub role: StopRole,
    #[serde(default, deserialize_with = "deserialize_optional_region")]
    pub region: Option<RegionCode>,
    #[serde(default)]
    pub division_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_division_id")]
    pub division_id: Option<DivisionId>,
}

/// Forms send cleared fields as `""` (or `0` for numeric ones). Those mean
/// "not filled in", not "invalid".
fn deserialize_optional_region<'de, D>(deserializer: D) -> Result<Option<RegionCode>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            RegionCode::parse(raw.trim()).map(Some).map_err(de::Error::custom)
        }
        _ => Ok(None),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDivisionId {
    Code(u32),
    Text(String),
}

fn deserialize_optional_division_id<'de, D>(deserializer: D) -> Result<Option<DivisionId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawDivisionId>::deserialize(deserializer)? {
        None | Some(RawDivisionId::Code(0)) => Ok(None),
        Some(RawDivisionId::Code(code)) => {
            DivisionId::new(code).map(Some).map_err(de::Error::custom)
        }
        Some(RawDivisionId::Text(raw)) if raw.trim().is_empty() => Ok(None),
        Some(RawDivisionId::Text(raw)) => DivisionId::parse(raw.trim())
            .map(Some)
            .map_err(de::Error::custom),
    }
}

impl Stop {
    /// Creates an empty stop with the given role.
    pub fn new(role: StopRole) -> Self {
        Self {
            role,
            region: None,
            division_name: None,
            division_id: None,
        }
    }

    /// Creates a stop with every field filled in.
    pub fn resolved(
        role: StopRole,
        region: RegionCode,
        division_name: impl Into<String>,
        division_id: DivisionId,
    ) -> Self {
        Self {
            role,
            region: Some(region),
            division_name: Some(division_name.into()),
            division_id: Some(division_id),
        }
    }

    /// Sets the region code.
    pub fn with_region(mut self, region: RegionCode) -> Self {
        self.region = Some(region);
        self
    }

    /// Sets the division name.
    pub fn with_division_name(mut self, name: impl Into<String>) -> Self {
        self.division_name = Some(name.into());
        self
    }

    /// Sets the division identifier.
    pub fn with_division_id(mut self, id: DivisionId) -> Self {
        self.division_id = Some(id);
        self
    }

    /// Returns the division name, treating blank names as absent.
    pub fn division_name(&self) -> Option<&str> {
        self.division_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    /// Returns true if region, division name and division identifier are all present.
    pub fn is_resolved(&self) -> bool {
        self.region.is_some() && self.division_name().is_some() && self.division_id.is_some()
    }

    /// Returns a copy of this stop where every absent field is taken from `fallback`.
    ///
    /// Fields present on `self` always win. The role is never taken from
    /// `fallback`.
    pub fn filled_from(&self, fallback: &Stop) -> Stop {
        Stop {
            role: self.role,
            region: self.region.or(fallback.region),
            division_name: self
                .division_name()
                .or_else(|| fallback.division_name())
                .map(str::to_string),
            division_id: self.division_id.or(fallback.division_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(s: &str) -> RegionCode {
        RegionCode::parse(s).unwrap()
    }

    fn division(code: u32) -> DivisionId {
        DivisionId::new(code).unwrap()
    }

    #[test]
    fn new_stop_is_unresolved() {
        let stop = Stop::new(StopRole::Loading);
        assert!(!stop.is_resolved());
        assert_eq!(stop.region, None);
    }

    #[test]
    fn resolved_stop() {
        let stop = Stop::resolved(StopRole::Unloading, region("MG"), "Uberlândia", division(3170206));
        assert!(stop.is_resolved());
        assert_eq!(stop.division_name(), Some("Uberlândia"));
    }

    #[test]
    fn blank_name_counts_as_missing() {
        let stop = Stop::new(StopRole::Loading)
            .with_region(region("SP"))
            .with_division_name("   ")
            .with_division_id(division(3550308));
        assert_eq!(stop.division_name(), None);
        assert!(!stop.is_resolved());
    }

    #[test]
    fn filled_from_keeps_present_fields() {
        let edited = Stop::new(StopRole::Unloading)
            .with_region(region("BA"))
            .with_division_name("Salvador");
        let persisted = Stop::resolved(StopRole::Unloading, region("MG"), "Uberlândia", division(3170206));

        let merged = edited.filled_from(&persisted);
        assert_eq!(merged.region, Some(region("BA")));
        assert_eq!(merged.division_name(), Some("Salvador"));
        assert_eq!(merged.division_id, Some(division(3170206)));
    }

    #[test]
    fn filled_from_replaces_blank_name() {
        let edited = Stop::new(StopRole::Loading).with_division_name("");
        let persisted = Stop::resolved(StopRole::Loading, region("SP"), "São Paulo", division(3550308));

        let merged = edited.filled_from(&persisted);
        assert_eq!(merged, persisted);
    }

    #[test]
    fn filled_from_keeps_own_role() {
        let edited = Stop::new(StopRole::Unloading);
        let persisted = Stop::resolved(StopRole::Loading, region("SP"), "São Paulo", division(3550308));
        assert_eq!(edited.filled_from(&persisted).role, StopRole::Unloading);
    }

    #[test]
    fn serde_tolerates_missing_fields() {
        let stop: Stop = serde_json::from_str(r#"{"role":"loading","region":"SP"}"#).unwrap();
        assert_eq!(stop.role, StopRole::Loading);
        assert_eq!(stop.region, Some(region("SP")));
        assert_eq!(stop.division_id, None);
    }

    #[test]
    fn serde_treats_cleared_fields_as_missing() {
        let stop: Stop = serde_json::from_str(
            r#"{"role":"unloading","region":"","division_name":"","division_id":0}"#,
        )
        .unwrap();
        assert_eq!(stop, Stop::new(StopRole::Unloading).with_division_name(""));
        assert_eq!(stop.division_name(), None);

        let stop: Stop =
            serde_json::from_str(r#"{"role":"loading","region":null,"division_id":"  "}"#).unwrap();
        assert_eq!(stop.region, None);
        assert_eq!(stop.division_id, None);
    }

    #[test]
    fn serde_accepts_division_id_as_text() {
        let stop: Stop =
            serde_json::from_str(r#"{"role":"loading","region":"SP","division_id":"3550308"}"#)
                .unwrap();
        assert_eq!(stop.division_id, Some(division(3550308)));
    }

    #[test]
    fn serde_still_rejects_malformed_values() {
        assert!(serde_json::from_str::<Stop>(r#"{"role":"loading","region":"S"}"#).is_err());
        assert!(serde_json::from_str::<Stop>(r#"{"role":"loading","division_id":"35A"}"#).is_err());
    }

    #[test]
    fn cleared_fields_fall_back_after_deserializing() {
        let edited: Stop =
            serde_json::from_str(r#"{"role":"loading","region":"","division_id":0}"#).unwrap();
        let persisted = Stop::resolved(StopRole::Loading, region("SP"), "São Paulo", division(3550308));
        assert_eq!(edited.filled_from(&persisted), persisted);
    }
}
