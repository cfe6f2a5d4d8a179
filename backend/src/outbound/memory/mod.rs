//! In-process adapters backed by concurrent maps.
//!
//! These stand in for the persistence layer, which lives outside this
//! service. State is lost on restart.

mod clients;
mod sales;

pub use clients::InMemoryClientDirectory;
pub use sales::InMemorySalesLedger;
