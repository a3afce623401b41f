//! Mock adapter for testing purposes.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::counties::{AdapterError, CountyAdapter};
use crate::models::{CountyId, ParcelRecord};

/// A mock county adapter that returns predefined responses.
#[derive(Debug, Default)]
pub struct MockAdapter {
    record: Mutex<Option<ParcelRecord>>,
}

impl MockAdapter {
    /// Create a new mock adapter.
    pub fn new() -> Self {
        Self {
            record: Mutex::new(None),
        }
    }

    /// Set the record the next lookup returns.
    pub fn set_record(&self, record: ParcelRecord) {
        let mut guard = self.record.lock().unwrap();
        *guard = Some(record);
    }

    /// Clear the configured record; lookups fail with NotFound again.
    pub fn clear_record(&self) {
        let mut guard = self.record.lock().unwrap();
        *guard = None;
    }
}

#[async_trait]
impl CountyAdapter for MockAdapter {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock"
    }

    fn id_format_hint(&self) -> &str {
        "anything"
    }

    async fn lookup(&self, parcel_id: &str) -> Result<ParcelRecord, AdapterError> {
        let guard = self.record.lock().unwrap();
        match &*guard {
            Some(record) => Ok(record.clone()),
            None => Err(AdapterError::NotFound(format!(
                "Parcel {} not found in Mock County",
                parcel_id
            ))),
        }
    }
}

/// Helper to build a minimally populated record for tests.
pub fn make_record(county: CountyId, parcel_id: &str, owner: &str, address: &str) -> ParcelRecord {
    ParcelRecord {
        owner: owner.to_string(),
        address: address.to_string(),
        ..ParcelRecord::new(county, parcel_id)
    }
}
