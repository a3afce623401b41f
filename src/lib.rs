//! # Parcel Scout
//!
//! Florida property-parcel lookup across county GIS services, with canonical
//! record mapping and spreadsheet report generation.
//!
//! Each supported county's public ArcGIS REST deployment is wrapped in an
//! adapter implementing [`CountyAdapter`]; the [`CountyRegistry`] routes a
//! county name to its adapter and returns every outcome as a
//! [`LookupResult`] value. A looked-up [`ParcelRecord`] can be rendered into
//! a formatted xlsx due-diligence report with [`generate_report`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use parcel_scout::CountyRegistry;
//!
//! # async fn example() {
//! let registry = CountyRegistry::new();
//! let result = registry
//!     .lookup_property("Hillsborough", "1926050030")
//!     .await;
//!
//! if let Some(record) = result.record() {
//!     println!("{} owned by {}", record.address, record.owner);
//! }
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`models`] - Canonical parcel record and lookup result types
//! - [`counties`] - County adapter trait, implementations, and registry
//! - [`report`] - Xlsx report rendering and municipal-code links
//! - [`config`] - TOML configuration with env overrides
//! - [`utils`] - Shared HTTP client

pub mod config;
pub mod counties;
pub mod models;
pub mod report;
pub mod utils;

pub use config::Config;
pub use counties::{AdapterError, CountyAdapter, CountyRegistry};
pub use models::{CountyId, LookupResult, ParcelRecord, SectionFlags};
pub use report::{generate_report, municode_link, ZoningRequirements};
pub use utils::HttpClient;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
