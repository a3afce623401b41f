//! County adapter plugins with a trait-based architecture.
//!
//! Each supported county implements the [`CountyAdapter`] trait and is
//! registered with the [`CountyRegistry`]. County GIS deployments disagree on
//! endpoint layout, field names, and identifier formats, so each adapter owns
//! its own query candidate list and raw-to-canonical field mapping; everything
//! downstream of the adapter sees only [`ParcelRecord`].
//!
//! # Implementing a New County
//!
//! 1. Create a struct holding the shared [`HttpClient`] and its endpoint URL(s)
//! 2. Implement `id`, `name`, `id_format_hint`, and `lookup`
//! 3. Register it in `CountyRegistry::with_client`

mod attrs;
mod hillsborough;
mod manatee;
mod parcel_id;
mod pasco;
mod pinellas;
mod query;
mod registry;
mod swfwmd;

pub mod mock;

pub use hillsborough::HillsboroughAdapter;
pub use manatee::ManateeAdapter;
pub use mock::MockAdapter;
pub use parcel_id::{normalize_folio, normalize_parcel_id};
pub use pasco::PascoAdapter;
pub use pinellas::PinellasAdapter;
pub use query::QueryCandidate;
pub use registry::{canonical_county_name, CountyRegistry};

use crate::models::ParcelRecord;
use async_trait::async_trait;

/// The CountyAdapter trait defines the interface for all county lookups.
#[async_trait]
pub trait CountyAdapter: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this county (e.g. "hillsborough")
    fn id(&self) -> &str;

    /// Title-cased county name as callers spell it
    fn name(&self) -> &str;

    /// Human-readable parcel identifier format hint for this county
    fn id_format_hint(&self) -> &str;

    /// Check that a parcel identifier is plausibly formatted for this county.
    /// Counties without a strict documented format accept anything.
    fn validate_id(&self, _parcel_id: &str) -> Result<(), AdapterError> {
        Ok(())
    }

    /// Look up a parcel and map the first matching feature into a record
    async fn lookup(&self, parcel_id: &str) -> Result<ParcelRecord, AdapterError>;
}

/// Errors that can occur during a county lookup
///
/// These never cross the adapter boundary as panics; the registry converts
/// them into [`crate::models::LookupResult::Failure`] values.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// All query candidates were exhausted without a match
    #[error("{0}")]
    NotFound(String),

    /// Network or HTTP error
    #[error("API error: {0}")]
    Network(String),

    /// Malformed response body
    #[error("Parse error: {0}")]
    Parse(String),

    /// Non-success status or error payload from the endpoint
    #[error("API error: {0}")]
    Api(String),

    /// The parcel identifier does not match the county's documented format
    #[error("Invalid parcel ID: {0}")]
    InvalidId(String),

    /// The county has no working adapter yet
    #[error("{0}")]
    Unsupported(String),
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_status() {
            AdapterError::Api(err.to_string())
        } else if err.is_decode() {
            AdapterError::Parse(err.to_string())
        } else {
            AdapterError::Network(err.to_string())
        }
    }
}
