//! Canonical parcel record representing a property from any county.

use serde::{Deserialize, Serialize};

/// The county whose GIS service produced a record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountyId {
    Hillsborough,
    Pinellas,
    Pasco,
    Manatee,
    Sarasota,
    #[serde(untagged)]
    Other(String),
}

impl CountyId {
    /// Returns the display name of the county
    pub fn name(&self) -> &str {
        match self {
            CountyId::Hillsborough => "Hillsborough",
            CountyId::Pinellas => "Pinellas",
            CountyId::Pasco => "Pasco",
            CountyId::Manatee => "Manatee",
            CountyId::Sarasota => "Sarasota",
            CountyId::Other(s) => s,
        }
    }

    /// Returns the county identifier (for adapter registration and CLI flags)
    pub fn id(&self) -> &str {
        match self {
            CountyId::Hillsborough => "hillsborough",
            CountyId::Pinellas => "pinellas",
            CountyId::Pasco => "pasco",
            CountyId::Manatee => "manatee",
            CountyId::Sarasota => "sarasota",
            CountyId::Other(s) => s,
        }
    }
}

impl std::fmt::Display for CountyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A property parcel record normalized across county schemas
///
/// Every field is defaultable; counties differ widely in what their public
/// layers expose, so a sparsely populated record is a legal outcome. Text
/// fields default to empty, money/area/count fields to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParcelRecord {
    /// County the record came from
    pub county: CountyId,

    /// Parcel/folio identifier as submitted by the caller
    pub parcel_id: String,

    /// Situs (street) address
    pub address: String,

    /// Situs city
    pub city: String,

    /// Situs ZIP code
    pub zip: String,

    /// Owner name of record
    pub owner: String,

    /// Owner mailing address
    pub owner_address: String,

    /// Owner mailing city
    pub owner_city: String,

    /// Owner mailing state
    pub owner_state: String,

    /// Owner mailing ZIP
    pub owner_zip: String,

    /// Legal description
    pub legal_description: String,

    /// Legal description continuation, where the county splits it
    pub legal_description2: String,

    /// Site area in acres
    pub acres: f64,

    /// Site area in square feet
    pub area_sqft: f64,

    /// Zoning district code
    pub zoning: String,

    /// Land use description
    pub land_use: String,

    /// DOR land use code
    pub land_use_code: String,

    /// Assessed land value (USD)
    pub assessed_land: f64,

    /// Assessed building value (USD)
    pub assessed_building: f64,

    /// Total assessed value (USD)
    pub assessed_total: f64,

    /// Market value (USD)
    pub market_value: f64,

    /// Subdivision name
    pub subdivision: String,

    /// Plat block
    pub block: String,

    /// Plat lot
    pub lot: String,

    /// PLSS section
    pub section: String,

    /// PLSS township
    pub township: String,

    /// PLSS range
    pub range: String,

    /// Year the primary structure was built
    pub year_built: String,

    /// Number of buildings on the parcel
    pub num_buildings: i64,

    /// Number of residential units
    pub num_units: i64,

    /// Total living area in square feet
    pub total_living_area: f64,

    /// Most recent sale date
    pub sale_date: String,

    /// Most recent sale amount (USD)
    pub sale_amount: f64,

    /// Property appraiser detail page URL
    pub parcel_link: String,

    /// FEMA flood zone designation, where the county layer carries one
    pub fema_flood_zone: String,
}

impl ParcelRecord {
    /// Create an empty record for a county/parcel pair
    pub fn new(county: CountyId, parcel_id: impl Into<String>) -> Self {
        Self {
            county,
            parcel_id: parcel_id.into(),
            address: String::new(),
            city: String::new(),
            zip: String::new(),
            owner: String::new(),
            owner_address: String::new(),
            owner_city: String::new(),
            owner_state: String::new(),
            owner_zip: String::new(),
            legal_description: String::new(),
            legal_description2: String::new(),
            acres: 0.0,
            area_sqft: 0.0,
            zoning: String::new(),
            land_use: String::new(),
            land_use_code: String::new(),
            assessed_land: 0.0,
            assessed_building: 0.0,
            assessed_total: 0.0,
            market_value: 0.0,
            subdivision: String::new(),
            block: String::new(),
            lot: String::new(),
            section: String::new(),
            township: String::new(),
            range: String::new(),
            year_built: String::new(),
            num_buildings: 0,
            num_units: 0,
            total_living_area: 0.0,
            sale_date: String::new(),
            sale_amount: 0.0,
            parcel_link: String::new(),
            fema_flood_zone: String::new(),
        }
    }

    /// "City, ST Zip" for the owner mailing address, empty if no city is known
    pub fn owner_location(&self) -> String {
        if self.owner_city.is_empty() {
            String::new()
        } else {
            format!("{}, {} {}", self.owner_city, self.owner_state, self.owner_zip)
        }
    }

    /// "City, FL Zip" for the situs address
    pub fn property_location(&self) -> String {
        format!("{}, FL {}", self.city, self.zip)
    }

    /// "S#-T#-R#" section/township/range string
    pub fn str_designation(&self) -> String {
        format!("S{}-T{}-R{}", self.section, self.township, self.range)
    }

    /// Whether the record carries any sale history
    pub fn has_sale(&self) -> bool {
        !self.sale_date.is_empty() || self.sale_amount > 0.0
    }
}
