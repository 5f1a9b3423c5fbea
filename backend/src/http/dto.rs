//! Data Transfer Objects for the HTTP API.
//!
//! Visualization DTOs are re-exported from the routes module since they
//! already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    ChartData, ControlDefinitions, Dashboard, DrawSummary, LineSeries, OccupancyQuery,
    ReferenceLine,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Whether the sales data currently loads
    pub data: String,
}

/// Draw list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawListResponse {
    /// Draws in first-seen order
    pub draws: Vec<DrawSummary>,
    /// Total count
    pub total: usize,
    /// Checksum of the loaded sales content
    pub checksum: String,
}
