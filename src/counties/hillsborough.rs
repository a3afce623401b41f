//! Hillsborough County adapter.
//!
//! Folios are indexed without separators ("192605-0030.0" is stored as
//! "19260500300"), so the identifier is fully normalized before the single
//! FOLIONUM query.

use async_trait::async_trait;

use super::parcel_id::normalize_folio;
use super::query::{first_feature, QueryCandidate};
use super::{swfwmd, AdapterError, CountyAdapter};
use crate::models::{CountyId, ParcelRecord};
use crate::utils::HttpClient;

#[derive(Debug, Clone)]
pub struct HillsboroughAdapter {
    client: HttpClient,
    endpoint: String,
}

impl HillsboroughAdapter {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            endpoint: format!("{}/7/query", swfwmd::SERVICE_BASE),
        }
    }

    /// Override the layer endpoint (fixture servers in tests)
    pub fn with_endpoint(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CountyAdapter for HillsboroughAdapter {
    fn id(&self) -> &str {
        "hillsborough"
    }

    fn name(&self) -> &str {
        "Hillsborough"
    }

    fn id_format_hint(&self) -> &str {
        "XX-XX-XX-XXXXX-XXX.X or XXXXXXXXXX"
    }

    async fn lookup(&self, parcel_id: &str) -> Result<ParcelRecord, AdapterError> {
        let folio = normalize_folio(parcel_id);

        let candidates = [QueryCandidate::new(&self.endpoint, "FOLIONUM", &folio)];

        let attrs = first_feature(&self.client, &candidates)
            .await?
            .ok_or_else(|| {
                AdapterError::NotFound(format!(
                    "Parcel {} not found in Hillsborough County database",
                    folio
                ))
            })?;

        Ok(swfwmd::map_attributes(
            CountyId::Hillsborough,
            parcel_id,
            &attrs,
            "TAMPA",
        ))
    }
}
