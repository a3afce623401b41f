//! Shared raw-to-canonical mapping for SWFWMD regional parcel layers.
//!
//! Hillsborough and Pasco are both served from the Southwest Florida Water
//! Management District's `parcel_search` MapServer and share a schema, so
//! they share one mapping table.

use super::attrs::{integer, number, text, text_or};
use super::query::Attributes;
use crate::models::{CountyId, ParcelRecord};

pub(crate) const SERVICE_BASE: &str =
    "https://www25.swfwmd.state.fl.us/arcgis12/rest/services/BaseVector/parcel_search/MapServer";

/// Map a SWFWMD feature's attributes into a canonical record.
///
/// `default_city` covers layers that omit the situs city for in-city parcels.
pub(crate) fn map_attributes(
    county: CountyId,
    parcel_id: &str,
    attrs: &Attributes,
    default_city: &str,
) -> ParcelRecord {
    ParcelRecord {
        address: text(attrs, &["SITUSADD1", "SITEADD"]),
        city: text_or(attrs, &["SCITY"], default_city),
        zip: text(attrs, &["SZIP"]),
        owner: text(attrs, &["OWNERNAME"]),
        owner_address: text(attrs, &["OWNERADD1"]),
        owner_city: text(attrs, &["OWNERCITY"]),
        owner_state: text(attrs, &["OWNERSTATE"]),
        owner_zip: text(attrs, &["OWNERZIP"]),
        legal_description: text(attrs, &["LEGDECFULL"]),
        legal_description2: text(attrs, &["LEGAL2"]),
        acres: number(attrs, &["ACRES"]),
        area_sqft: number(attrs, &["AREANO"]),
        zoning: text_or(attrs, &["ZONING"], "Contact City/County for zoning info"),
        land_use: text(attrs, &["PARUSEDESC"]),
        land_use_code: text(attrs, &["DOR4CODE"]),
        assessed_land: number(attrs, &["ASSD_LND"]),
        assessed_building: number(attrs, &["ASSD_BLD"]),
        assessed_total: number(attrs, &["ASSD_TOT"]),
        market_value: number(attrs, &["PARVAL"]),
        subdivision: text(attrs, &["SUBDIV_NM"]),
        block: text(attrs, &["BLOCK"]),
        lot: text(attrs, &["LOT"]),
        section: text(attrs, &["S_SECTION"]),
        township: text(attrs, &["S_TOWNSHIP"]),
        range: text(attrs, &["S_RANGE"]),
        year_built: text(attrs, &["YRBLT_ACT"]),
        num_buildings: integer(attrs, &["NO_BULDNG"]),
        num_units: integer(attrs, &["NO_RES_UNITS"]),
        total_living_area: number(attrs, &["TOT_LVG_AREA"]),
        sale_date: text(attrs, &["SALE1_DATE"]),
        sale_amount: number(attrs, &["SALE1_AMT"]),
        parcel_link: text(attrs, &["PAWEBPAGE"]),
        ..ParcelRecord::new(county, parcel_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_attributes_full_feature() {
        let attrs = json!({
            "SITUSADD1": "456 DEVELOPMENT BLVD",
            "SCITY": "TAMPA",
            "SZIP": "33602",
            "OWNERNAME": "SAMPLE PROPERTY LLC",
            "LEGDECFULL": "LOT 1 BLOCK A SAMPLE SUB",
            "ACRES": 2.5,
            "AREANO": 108900,
            "ZONING": "RMF-16",
            "ASSD_LND": 450000,
            "ASSD_BLD": 1250000,
            "ASSD_TOT": 1700000,
            "YRBLT_ACT": 2018,
            "NO_BULDNG": 1,
            "SALE1_DATE": "2021-06-01",
            "SALE1_AMT": 2000000
        });

        let record = map_attributes(
            CountyId::Hillsborough,
            "1926050030",
            attrs.as_object().unwrap(),
            "TAMPA",
        );

        assert_eq!(record.owner, "SAMPLE PROPERTY LLC");
        assert_eq!(record.address, "456 DEVELOPMENT BLVD");
        assert_eq!(record.acres, 2.5);
        assert_eq!(record.assessed_total, 1700000.0);
        assert_eq!(record.year_built, "2018");
        assert!(record.has_sale());
    }

    #[test]
    fn test_map_attributes_address_fallback() {
        // Pasco's layer sometimes populates SITEADD instead of SITUSADD1
        let attrs = json!({"SITEADD": "789 RURAL RD"});
        let record =
            map_attributes(CountyId::Pasco, "x", attrs.as_object().unwrap(), "");
        assert_eq!(record.address, "789 RURAL RD");
    }

    #[test]
    fn test_map_attributes_defaults() {
        let attrs = json!({});
        let record = map_attributes(
            CountyId::Hillsborough,
            "x",
            attrs.as_object().unwrap(),
            "TAMPA",
        );

        assert_eq!(record.city, "TAMPA");
        assert_eq!(record.zoning, "Contact City/County for zoning info");
        assert_eq!(record.owner, "");
        assert_eq!(record.assessed_land, 0.0);
        assert_eq!(record.num_units, 0);
    }
}
