//! Service layer for business logic.
//!
//! Services turn the derived event table into the occupancy report; the
//! HTTP layer and the chart builders only consume their output.

pub mod distributions;
pub mod occupancy;

pub use distributions::{compute_markers, quantile};
pub use occupancy::{compute_draw, compute_occupancy, summarize_draws};
