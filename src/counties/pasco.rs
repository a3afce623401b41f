//! Pasco County adapter.
//!
//! Same SWFWMD regional service as Hillsborough, different layer. The layer
//! has been observed indexing parcels under PARCELID in some deployments and
//! ALTKEY in others, with and without separators, so all four combinations
//! are tried in order. The dashed input form is kept as its own candidate;
//! normalization alone is not enough here.

use async_trait::async_trait;

use super::parcel_id::normalize_parcel_id;
use super::query::{first_feature, QueryCandidate};
use super::{swfwmd, AdapterError, CountyAdapter};
use crate::models::{CountyId, ParcelRecord};
use crate::utils::HttpClient;

#[derive(Debug, Clone)]
pub struct PascoAdapter {
    client: HttpClient,
    endpoint: String,
}

impl PascoAdapter {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            endpoint: format!("{}/12/query", swfwmd::SERVICE_BASE),
        }
    }

    /// Override the layer endpoint (fixture servers in tests)
    pub fn with_endpoint(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Ordered candidate list for an identifier: PARCELID then ALTKEY, each
    /// with the raw and the normalized form.
    fn candidates(&self, parcel_id: &str) -> Vec<QueryCandidate> {
        let normalized = normalize_parcel_id(parcel_id);

        vec![
            QueryCandidate::new(&self.endpoint, "PARCELID", parcel_id),
            QueryCandidate::new(&self.endpoint, "PARCELID", &normalized),
            QueryCandidate::new(&self.endpoint, "ALTKEY", parcel_id),
            QueryCandidate::new(&self.endpoint, "ALTKEY", &normalized),
        ]
    }
}

#[async_trait]
impl CountyAdapter for PascoAdapter {
    fn id(&self) -> &str {
        "pasco"
    }

    fn name(&self) -> &str {
        "Pasco"
    }

    fn id_format_hint(&self) -> &str {
        "XX-XX-XX-XX-XXX-XXX-XXXX"
    }

    async fn lookup(&self, parcel_id: &str) -> Result<ParcelRecord, AdapterError> {
        let candidates = self.candidates(parcel_id);

        let attrs = first_feature(&self.client, &candidates)
            .await?
            .ok_or_else(|| {
                AdapterError::NotFound(format!(
                    "Parcel {} not found in Pasco County database. Format: XX-XX-XX-XX-XXX-XXX-XXXX",
                    parcel_id
                ))
            })?;

        Ok(swfwmd::map_attributes(
            CountyId::Pasco,
            parcel_id,
            &attrs,
            "",
        ))
    }
}
