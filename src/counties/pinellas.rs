//! Pinellas County adapter.
//!
//! Two-step join against the county's Accela parcel service. The parcel
//! geometry layer is queried first, trying four spellings of the parcel-id
//! field (the service exposes both fully qualified and bare names depending
//! on deployment). A hit yields an object id, which keys a second
//! `queryRelatedRecords` call into the linked property-appraiser table. The
//! two attribute sets are then merged: appraiser values win for appraiser
//! fields, the parcel layer wins for geometry and zoning. A failed or empty
//! second step still produces a success with appraiser fields defaulted.

use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;

use super::attrs::{integer, leading_number, number, text, text_or};
use super::query::{first_feature, related_attributes, Attributes, QueryCandidate};
use super::{AdapterError, CountyAdapter};
use crate::models::{CountyId, ParcelRecord};
use crate::utils::HttpClient;

const PARCEL_LAYER: &str =
    "https://egis.pinellas.gov/gis/rest/services/Accela/AccelaAddressParcel/MapServer/1/query";
const RELATED_RECORDS: &str =
    "https://egis.pinellas.gov/gis/rest/services/Accela/AccelaAddressParcel/MapServer/1/queryRelatedRecords";

/// PGIS.PAOGENERAL relationship on the parcel layer
const PAO_RELATIONSHIP_ID: &str = "0";

const OBJECT_ID_FIELD: &str = "PGIS.PGIS.Parcels.OBJECTID";

/// Parcel-id field spellings, qualified first
const PARCEL_ID_FIELDS: [&str; 4] = [
    "PGIS.PGIS.AccelaParcels.PARCELID",
    "PGIS.PGIS.Parcels.PARCELID",
    "PARCELID",
    "PIN",
];

fn parcel_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{2}-\d{2}-\d{2}-\d{5}-\d{3}-\d{4}$").expect("valid regex")
    })
}

#[derive(Debug, Clone)]
pub struct PinellasAdapter {
    client: HttpClient,
    parcel_endpoint: String,
    related_endpoint: String,
}

impl PinellasAdapter {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            parcel_endpoint: PARCEL_LAYER.to_string(),
            related_endpoint: RELATED_RECORDS.to_string(),
        }
    }

    /// Override both endpoints (fixture servers in tests)
    pub fn with_endpoints(
        client: HttpClient,
        parcel_endpoint: impl Into<String>,
        related_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client,
            parcel_endpoint: parcel_endpoint.into(),
            related_endpoint: related_endpoint.into(),
        }
    }

    fn detail_page(parcel_id: &str) -> String {
        format!("https://www.pcpao.gov/PropertyDetail?ParcelID={}", parcel_id)
    }

    /// Merge parcel-layer and appraiser attributes into a canonical record.
    /// `pao` may be empty; every appraiser-sourced field then takes its default.
    fn map_attributes(parcel_id: &str, parcel: &Attributes, pao: &Attributes) -> ParcelRecord {
        let stated_area = text(parcel, &["PGIS.PGIS.AccelaParcels.STATEDAREA"]);

        let mut record = ParcelRecord {
            address: text(pao, &["SITUSSTREET"]),
            zip: text(pao, &["SITUSZIP"]),
            owner: text(pao, &["OWNERNAME"]),
            owner_address: text(pao, &["OWNERADD1"]),
            owner_city: text(pao, &["OWNERCITY"]),
            owner_state: text(pao, &["OWNERSTATE"]),
            owner_zip: text(pao, &["OWNERZIP"]),
            acres: leading_number(&stated_area),
            zoning: text_or(
                parcel,
                &["PGIS.PGIS.AccelaParcels.ZONECLASS"],
                "Contact jurisdiction",
            ),
            land_use: text(parcel, &["PGIS.PGIS.AccelaParcels.PROPOSEDLANDUSE"]),
            land_use_code: text(parcel, &["PGIS.PGIS.AccelaParcels.PAO_USECODE"]),
            assessed_land: number(pao, &["LANDVAL"]),
            assessed_building: number(pao, &["BLDGVAL"]),
            assessed_total: number(pao, &["JUSTVAL"]),
            market_value: number(pao, &["ASMTVAL"]),
            subdivision: text(parcel, &["PGIS.PGIS.AccelaParcels.SUBDIVISION"]),
            block: text(parcel, &["PGIS.PGIS.AccelaParcels.BK"]),
            lot: text(parcel, &["PGIS.PGIS.AccelaParcels.LOT"]),
            section: text(parcel, &["PGIS.PGIS.AccelaParcels.SC"]),
            township: text(parcel, &["PGIS.PGIS.AccelaParcels.TW"]),
            range: text(parcel, &["PGIS.PGIS.AccelaParcels.RG"]),
            year_built: text(pao, &["YRBLT"]),
            num_buildings: integer(pao, &["BLDGCNT"]),
            num_units: integer(pao, &["UNITS"]),
            total_living_area: number(pao, &["TOTLIVAREA"]),
            sale_date: text(pao, &["SALEDT1"]),
            sale_amount: number(pao, &["SALEPRICE1"]),
            parcel_link: Self::detail_page(parcel_id),
            fema_flood_zone: text(parcel, &["PGIS.PGIS.AccelaParcels.FLOOD_ZONE"]),
            ..ParcelRecord::new(CountyId::Pinellas, parcel_id)
        };

        // Jurisdiction is the better city signal; the appraiser situs city is
        // the fallback
        record.city = {
            let jurisdiction = text(parcel, &["PGIS.PGIS.AccelaParcels.JURISDICTION"]);
            if jurisdiction.is_empty() {
                text(pao, &["SITUSCITY"])
            } else {
                jurisdiction
            }
        };

        // The legal description lives in whichever source populated it
        record.legal_description = {
            let legal = text(parcel, &["PGIS.PGIS.AccelaParcels.LEGAL"]);
            if legal.is_empty() {
                text(pao, &["LEGALDESC"])
            } else {
                legal
            }
        };

        record
    }
}

#[async_trait]
impl CountyAdapter for PinellasAdapter {
    fn id(&self) -> &str {
        "pinellas"
    }

    fn name(&self) -> &str {
        "Pinellas"
    }

    fn id_format_hint(&self) -> &str {
        "XX-XX-XX-XXXXX-XXX-XXXX"
    }

    fn validate_id(&self, parcel_id: &str) -> Result<(), AdapterError> {
        if parcel_id_pattern().is_match(parcel_id.trim()) {
            Ok(())
        } else {
            Err(AdapterError::InvalidId(format!(
                "Pinellas County parcel IDs look like 03-32-16-11737-001-0010, got \"{}\"",
                parcel_id
            )))
        }
    }

    async fn lookup(&self, parcel_id: &str) -> Result<ParcelRecord, AdapterError> {
        let parcel_id = parcel_id.trim();

        let candidates: Vec<QueryCandidate> = PARCEL_ID_FIELDS
            .iter()
            .map(|field| QueryCandidate::new(&self.parcel_endpoint, *field, parcel_id))
            .collect();

        let parcel = first_feature(&self.client, &candidates)
            .await?
            .ok_or_else(|| {
                AdapterError::NotFound(format!(
                    "Parcel {} not found in Pinellas County GIS. Try: {}",
                    parcel_id,
                    Self::detail_page(parcel_id)
                ))
            })?;

        // Second step: appraiser attributes from the related table. Partial
        // results are fine; a miss here is not a failure.
        let pao = match parcel.get(OBJECT_ID_FIELD).and_then(|v| v.as_i64()) {
            Some(object_id) => {
                related_attributes(
                    &self.client,
                    &self.related_endpoint,
                    object_id,
                    PAO_RELATIONSHIP_ID,
                )
                .await
                .unwrap_or_default()
            }
            None => {
                tracing::debug!("parcel feature carries no object id; skipping appraiser join");
                Attributes::default()
            }
        };

        Ok(Self::map_attributes(parcel_id, &parcel, &pao))
    }
}
