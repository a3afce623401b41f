//! Manatee County adapter.
//!
//! Best data completeness of the supported counties: a single open-data layer
//! carries appraiser, zoning, and plat attributes, queried by 10-digit PIN.

use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;

use super::attrs::{integer, number, text};
use super::query::{first_feature, Attributes, QueryCandidate};
use super::{AdapterError, CountyAdapter};
use crate::models::{CountyId, ParcelRecord};
use crate::utils::HttpClient;

const MANATEE_LAYER: &str =
    "https://www.mymanatee.org/gisits/rest/services/opendata/Planning/MapServer/22/query";

fn pin_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{10}$").expect("valid regex"))
}

#[derive(Debug, Clone)]
pub struct ManateeAdapter {
    client: HttpClient,
    endpoint: String,
}

impl ManateeAdapter {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            endpoint: MANATEE_LAYER.to_string(),
        }
    }

    /// Override the layer endpoint (fixture servers in tests)
    pub fn with_endpoint(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn map_attributes(parcel_id: &str, attrs: &Attributes) -> ParcelRecord {
        ParcelRecord {
            address: text(attrs, &["PRIMARY_ADDRESS"]),
            city: text(attrs, &["PROP_CITYNAME"]),
            zip: text(attrs, &["PROP_ZIP"]),
            owner: text(attrs, &["OWNER"]),
            owner_address: text(attrs, &["MAILING_ADDRESS"]),
            owner_city: text(attrs, &["MAIL_CITY"]),
            owner_state: text(attrs, &["MAIL_STATE"]),
            owner_zip: text(attrs, &["MAIL_ZIP"]),
            legal_description: text(attrs, &["LEGAL_DESCRIPTION"]),
            acres: number(attrs, &["ACRES"]),
            area_sqft: number(attrs, &["AREA_SQFT"]),
            zoning: text(attrs, &["ZONING"]),
            land_use: text(attrs, &["FUTURE_LAND_USE"]),
            land_use_code: text(attrs, &["DOR_UC"]),
            assessed_land: number(attrs, &["LAND_VALUE"]),
            assessed_building: number(attrs, &["BLDG_VALUE"]),
            assessed_total: number(attrs, &["JUST_VALUE"]),
            market_value: number(attrs, &["MARKET_VALUE"]),
            subdivision: text(attrs, &["SUBDIVISION"]),
            block: text(attrs, &["BLOCK"]),
            lot: text(attrs, &["LOT"]),
            section: text(attrs, &["SECTION"]),
            township: text(attrs, &["TOWNSHIP"]),
            range: text(attrs, &["RANGE"]),
            year_built: text(attrs, &["YR_BLT"]),
            num_buildings: integer(attrs, &["NO_BLDG"]),
            num_units: integer(attrs, &["NO_RES_UNTS"]),
            total_living_area: number(attrs, &["TOT_LVG_AREA"]),
            sale_date: text(attrs, &["SALE_DATE"]),
            sale_amount: number(attrs, &["SALE_PRC"]),
            ..ParcelRecord::new(CountyId::Manatee, parcel_id)
        }
    }
}

#[async_trait]
impl CountyAdapter for ManateeAdapter {
    fn id(&self) -> &str {
        "manatee"
    }

    fn name(&self) -> &str {
        "Manatee"
    }

    fn id_format_hint(&self) -> &str {
        "XXXXXXXXXX (10 digits)"
    }

    fn validate_id(&self, parcel_id: &str) -> Result<(), AdapterError> {
        if pin_pattern().is_match(parcel_id.trim()) {
            Ok(())
        } else {
            Err(AdapterError::InvalidId(format!(
                "Manatee County PINs are 10 digits, got \"{}\"",
                parcel_id
            )))
        }
    }

    async fn lookup(&self, parcel_id: &str) -> Result<ParcelRecord, AdapterError> {
        let pin = parcel_id.trim();

        let candidates = [QueryCandidate::new(&self.endpoint, "PIN", pin)];

        let attrs = first_feature(&self.client, &candidates)
            .await?
            .ok_or_else(|| {
                AdapterError::NotFound("Parcel ID not found in Manatee County".to_string())
            })?;

        Ok(Self::map_attributes(parcel_id, &attrs))
    }
}
