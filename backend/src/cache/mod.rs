//! Memoization of the load & derive step.
//!
//! The derived [`EventTable`](crate::models::EventTable) is the only cached
//! unit. Occupancy curves are recomputed from it on every parameter change.

pub mod checksum;
pub mod dataset;

pub use checksum::calculate_checksum;
pub use dataset::DatasetCache;
