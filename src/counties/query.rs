//! Field-variant query engine for ArcGIS-style REST layers.
//!
//! Upstream county GIS schemas rename fields between deployments (PARCELID vs
//! ALTKEY vs PIN) and disagree on whether identifiers carry separators. The
//! only robust strategy without a live schema registry is an ordered candidate
//! list: each `(endpoint, field, value)` combination is tried in sequence and
//! the first one that returns a non-empty feature set wins. A transport error,
//! non-200 status, malformed body, or empty feature list on one candidate all
//! mean the same thing for control flow: move on to the next candidate. There
//! is no retry of a single candidate and no aggregation across candidates.
//!
//! Errors are still remembered: if every attempt failed in transport and no
//! candidate ever produced a clean empty feature set, the caller gets the last
//! transport error instead of a not-found answer that was never observed.

use serde::Deserialize;
use serde_json::Value;

use super::AdapterError;
use crate::utils::HttpClient;

/// Raw attribute map of a single GIS feature
pub type Attributes = serde_json::Map<String, Value>;

/// One (endpoint, field-name, identifier-variant) combination to attempt
#[derive(Debug, Clone)]
pub struct QueryCandidate {
    pub endpoint: String,
    pub field: String,
    pub value: String,
}

impl QueryCandidate {
    pub fn new(
        endpoint: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    /// SQL-like equality filter for the `where` parameter.
    ///
    /// The value is interpolated verbatim; an identifier containing a quote
    /// character will break the filter. Known defect inherited from the
    /// upstream services' query convention.
    pub fn where_clause(&self) -> String {
        format!("{}='{}'", self.field, self.value)
    }
}

#[derive(Debug, Deserialize)]
struct FeatureSet {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    attributes: Attributes,
}

#[derive(Debug, Deserialize)]
struct RelatedRecordsResponse {
    #[serde(default, rename = "relatedRecordGroups")]
    groups: Vec<RelatedRecordGroup>,
}

#[derive(Debug, Deserialize)]
struct RelatedRecordGroup {
    #[serde(default, rename = "relatedRecords")]
    records: Vec<Feature>,
}

/// Try candidates in order, returning the first feature's attributes.
///
/// Candidates are issued strictly in sequence; each attempt waits for the
/// previous one to complete or time out. `Ok(None)` means at least one
/// candidate answered cleanly with zero features; `Err` means every attempt
/// failed in transport and the parcel's absence was never confirmed.
pub(crate) async fn first_feature(
    client: &HttpClient,
    candidates: &[QueryCandidate],
) -> Result<Option<Attributes>, AdapterError> {
    let mut last_error: Option<AdapterError> = None;
    let mut clean_miss = false;

    for candidate in candidates {
        tracing::debug!(
            endpoint = %candidate.endpoint,
            filter = %candidate.where_clause(),
            "trying query candidate"
        );

        match query_features(client, candidate).await {
            Ok(Some(attributes)) => return Ok(Some(attributes)),
            Ok(None) => clean_miss = true,
            Err(e) => {
                // Same as a miss for control flow: advance to the next candidate
                tracing::debug!(error = %e, "candidate attempt failed");
                last_error = Some(e.into());
            }
        }
    }

    match last_error {
        Some(error) if !clean_miss => Err(error),
        _ => Ok(None),
    }
}

async fn query_features(
    client: &HttpClient,
    candidate: &QueryCandidate,
) -> Result<Option<Attributes>, reqwest::Error> {
    let response = client
        .client()
        .get(&candidate.endpoint)
        .query(&[
            ("where", candidate.where_clause().as_str()),
            ("outFields", "*"),
            ("returnGeometry", "false"),
            ("f", "json"),
        ])
        .send()
        .await?
        .error_for_status()?;

    let data: FeatureSet = response.json().await?;
    Ok(data.features.into_iter().next().map(|f| f.attributes))
}

/// Fetch attributes from a related-records table keyed by an object id.
///
/// Used by counties that split appraiser data into a linked table. A failed
/// or empty response is not an error for the caller; the merge proceeds with
/// only the primary layer's data.
pub(crate) async fn related_attributes(
    client: &HttpClient,
    endpoint: &str,
    object_id: i64,
    relationship_id: &str,
) -> Option<Attributes> {
    let object_ids = object_id.to_string();

    let response = client
        .client()
        .get(endpoint)
        .query(&[
            ("objectIds", object_ids.as_str()),
            ("relationshipId", relationship_id),
            ("outFields", "*"),
            ("f", "json"),
        ])
        .send()
        .await
        .ok()?;

    if !response.status().is_success() {
        tracing::debug!(status = %response.status(), "related records query failed");
        return None;
    }

    let data: RelatedRecordsResponse = response.json().await.ok()?;

    data.groups
        .into_iter()
        .flat_map(|g| g.records)
        .next()
        .map(|f| f.attributes)
}
