//! Spreadsheet report generation and jurisdiction reference links.

mod municode;
mod xlsx;

pub use municode::{municode_link, municode_search_url};
pub use xlsx::generate_report;

use serde::{Deserialize, Serialize};

/// Errors raised while writing a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Zoning requirements for the building/parking report sections.
///
/// Sourced from the governing jurisdiction's land development code; the
/// report renders documented placeholders for anything absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoningRequirements {
    /// City or county whose code these requirements come from
    #[serde(default)]
    pub jurisdiction: String,

    #[serde(default)]
    pub future_land_use: String,

    #[serde(default)]
    pub fema_flood_zone: String,

    #[serde(default)]
    pub setbacks: Setbacks,

    /// e.g. "45 feet / 3 stories"
    #[serde(default)]
    pub max_height: String,

    /// e.g. "60%"
    #[serde(default)]
    pub max_coverage: String,

    /// e.g. "1.5 spaces per unit"
    #[serde(default)]
    pub parking_standard: String,

    #[serde(default)]
    pub bicycle_parking: String,

    #[serde(default)]
    pub accessible_parking: String,
}

/// Required yard setbacks in feet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Setbacks {
    #[serde(default)]
    pub front: Option<f64>,

    #[serde(default)]
    pub rear: Option<f64>,

    #[serde(default)]
    pub side: Option<f64>,

    #[serde(default)]
    pub street_side: Option<f64>,
}
