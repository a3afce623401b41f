//! Registry mapping county names to adapters.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::{
    AdapterError, CountyAdapter, HillsboroughAdapter, ManateeAdapter, PascoAdapter,
    PinellasAdapter,
};
use crate::models::{LookupResult, ParcelRecord};
use crate::utils::HttpClient;

/// Canonical form of a user-supplied county name: trimmed, title-cased.
pub fn canonical_county_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Placeholder for a county that is listed but has no working lookup yet.
#[derive(Debug)]
struct PlannedAdapter {
    id: &'static str,
    name: &'static str,
    hint: &'static str,
}

#[async_trait]
impl CountyAdapter for PlannedAdapter {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn id_format_hint(&self) -> &str {
        self.hint
    }

    async fn lookup(&self, _parcel_id: &str) -> Result<ParcelRecord, AdapterError> {
        Err(AdapterError::Unsupported(format!(
            "{} County lookup is not yet supported",
            self.name
        )))
    }
}

/// Registry for all county adapters
///
/// Resolution fails closed: a county with no registered adapter produces a
/// [`LookupResult::Failure`] naming the county, never a panic.
#[derive(Debug, Clone)]
pub struct CountyRegistry {
    adapters: HashMap<String, Arc<dyn CountyAdapter>>,
}

impl CountyRegistry {
    /// Create a registry with all supported counties and default endpoints
    pub fn new() -> Self {
        Self::with_client(HttpClient::new())
    }

    /// Create a registry whose adapters share the given HTTP client
    pub fn with_client(client: HttpClient) -> Self {
        let mut registry = Self {
            adapters: HashMap::new(),
        };

        registry.register(Arc::new(HillsboroughAdapter::new(client.clone())));
        registry.register(Arc::new(PinellasAdapter::new(client.clone())));
        registry.register(Arc::new(PascoAdapter::new(client.clone())));
        registry.register(Arc::new(ManateeAdapter::new(client)));
        registry.register(Arc::new(PlannedAdapter {
            id: "sarasota",
            name: "Sarasota",
            hint: "XXXX-XX-XXXX-XX-XX-XXXX-X",
        }));

        registry
    }

    /// Register an adapter under its county name
    pub fn register(&mut self, adapter: Arc<dyn CountyAdapter>) {
        self.adapters
            .insert(canonical_county_name(adapter.name()), adapter);
    }

    /// Resolve a county name (case/whitespace insensitive) to its adapter
    pub fn resolve(&self, county: &str) -> Option<&Arc<dyn CountyAdapter>> {
        self.adapters.get(&canonical_county_name(county))
    }

    /// All registered adapters
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn CountyAdapter>> {
        self.adapters.values()
    }

    /// All registered county names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.adapters.values().map(|a| a.name()).collect();
        names.sort_unstable();
        names
    }

    /// Check if a county is registered
    pub fn has(&self, county: &str) -> bool {
        self.adapters.contains_key(&canonical_county_name(county))
    }

    /// Number of registered counties
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Look up a property, routing to the appropriate county adapter.
    ///
    /// The sole entry point callers need. Every failure mode — unknown
    /// county, malformed identifier, transport trouble, candidate exhaustion —
    /// comes back as a `Failure` value with a readable message.
    pub async fn lookup_property(&self, county: &str, parcel_id: &str) -> LookupResult {
        let canonical = canonical_county_name(county);

        let adapter = match self.resolve(&canonical) {
            Some(adapter) => adapter,
            None => {
                tracing::warn!(county = %canonical, "county not supported");
                return LookupResult::failure(format!(
                    "County \"{}\" not supported",
                    canonical
                ));
            }
        };

        if let Err(e) = adapter.validate_id(parcel_id) {
            return LookupResult::failure(e);
        }

        tracing::info!(county = %canonical, parcel_id, "looking up parcel");
        adapter.lookup(parcel_id).await.into()
    }
}

impl Default for CountyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
