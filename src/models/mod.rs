//! Core data structures shared across the crate.

mod lookup;
mod record;

pub use lookup::{LookupResult, SectionFlags};
pub use record::{CountyId, ParcelRecord};
