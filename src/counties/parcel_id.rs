//! Parcel identifier normalization.
//!
//! County schemas disagree on whether identifiers are indexed with or without
//! separators. Normalization here only strips; adapters that need the dashed
//! form keep the raw input as a separate query candidate rather than relying
//! on the normalized one alone.

/// Strip dashes and spaces from a parcel identifier. Idempotent.
pub fn normalize_parcel_id(raw: &str) -> String {
    raw.chars().filter(|c| *c != '-' && *c != ' ').collect()
}

/// Strip dashes, spaces, and dots from a folio number. Hillsborough folios
/// are written with a trailing dot group ("192605-0030.0") but indexed
/// without any separators. Idempotent.
pub fn normalize_folio(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '-' && *c != ' ' && *c != '.')
        .collect()
}
