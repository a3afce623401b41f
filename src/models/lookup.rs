//! Lookup outcome and report section models.

use serde::{Deserialize, Serialize};

use super::ParcelRecord;

/// Tagged outcome of a parcel lookup
///
/// Exactly one variant is populated per call. Failures are values, never
/// panics: transport errors, unknown counties, and exhausted candidate lists
/// all surface here with a human-readable message. The caller is responsible
/// for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LookupResult {
    /// A matching record was found and mapped
    Success { record: ParcelRecord },
    /// No record; `error` describes why
    Failure { error: String },
}

impl LookupResult {
    /// Build a failure from any displayable error
    pub fn failure(error: impl std::fmt::Display) -> Self {
        LookupResult::Failure {
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LookupResult::Success { .. })
    }

    /// The record, if the lookup succeeded
    pub fn record(&self) -> Option<&ParcelRecord> {
        match self {
            LookupResult::Success { record } => Some(record),
            LookupResult::Failure { .. } => None,
        }
    }

    /// The error message, if the lookup failed
    pub fn error(&self) -> Option<&str> {
        match self {
            LookupResult::Success { .. } => None,
            LookupResult::Failure { error } => Some(error),
        }
    }
}

impl<E: std::fmt::Display> From<Result<ParcelRecord, E>> for LookupResult {
    fn from(result: Result<ParcelRecord, E>) -> Self {
        match result {
            Ok(record) => LookupResult::Success { record },
            Err(e) => LookupResult::failure(e),
        }
    }
}

bitflags::bitflags! {
    /// Report sections that can be toggled on or off
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SectionFlags: u32 {
        const PROPERTY_INFO = 1 << 0;
        const SITE_CHARACTERISTICS = 1 << 1;
        const ZONING_LAND_USE = 1 << 2;
        const BUILDING_REQUIREMENTS = 1 << 3;
        const PARKING_REQUIREMENTS = 1 << 4;
        const ASSESSMENT_VALUES = 1 << 5;
        const SALES_HISTORY = 1 << 6;
        const LINKS_REFERENCES = 1 << 7;
    }
}

impl Default for SectionFlags {
    fn default() -> Self {
        SectionFlags::all()
    }
}

impl SectionFlags {
    /// Parse a section flag from its CLI/config name
    pub fn from_section_name(name: &str) -> Option<Self> {
        match name {
            "property_info" => Some(SectionFlags::PROPERTY_INFO),
            "site_characteristics" => Some(SectionFlags::SITE_CHARACTERISTICS),
            "zoning_land_use" => Some(SectionFlags::ZONING_LAND_USE),
            "building_requirements" => Some(SectionFlags::BUILDING_REQUIREMENTS),
            "parking_requirements" => Some(SectionFlags::PARKING_REQUIREMENTS),
            "assessment_values" => Some(SectionFlags::ASSESSMENT_VALUES),
            "sales_history" => Some(SectionFlags::SALES_HISTORY),
            "links_references" => Some(SectionFlags::LINKS_REFERENCES),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CountyId;

    #[test]
    fn test_result_accessors() {
        let ok = LookupResult::Success {
            record: ParcelRecord::new(CountyId::Manatee, "1234567890"),
        };
        assert!(ok.is_success());
        assert!(ok.record().is_some());
        assert!(ok.error().is_none());

        let failed = LookupResult::failure("County \"Atlantis\" not supported");
        assert!(!failed.is_success());
        assert!(failed.error().unwrap().contains("Atlantis"));
    }

    #[test]
    fn test_result_serialization_tags() {
        let failed = LookupResult::failure("nope");
        let json = serde_json::to_string(&failed).unwrap();
        assert!(json.contains("\"status\":\"failure\""));
    }

    #[test]
    fn test_section_flags_default_all() {
        let flags = SectionFlags::default();
        assert!(flags.contains(SectionFlags::PROPERTY_INFO));
        assert!(flags.contains(SectionFlags::LINKS_REFERENCES));
        assert_eq!(flags, SectionFlags::all());
    }

    #[test]
    fn test_section_flags_from_name() {
        assert_eq!(
            SectionFlags::from_section_name("sales_history"),
            Some(SectionFlags::SALES_HISTORY)
        );
        assert_eq!(SectionFlags::from_section_name("bogus"), None);
    }
}
