//! Public API surface for the Rust backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::chart::ChartData;
pub use crate::routes::chart::Dashboard;
pub use crate::routes::chart::LineSeries;
pub use crate::routes::chart::ReferenceLine;
pub use crate::routes::controls::ControlDefinitions;
pub use crate::routes::controls::OccupancyQuery;
pub use crate::routes::controls::RangeSliderDefinition;
pub use crate::routes::controls::SliderDefinition;
pub use crate::routes::occupancy::CurvePoint;
pub use crate::routes::occupancy::DailyCurve;
pub use crate::routes::occupancy::DrawOccupancy;
pub use crate::routes::occupancy::DrawSummary;
pub use crate::routes::occupancy::OccupancyParams;
pub use crate::routes::occupancy::OccupancyReport;
pub use crate::routes::occupancy::PercentileMarkers;
pub use crate::routes::occupancy::SkippedDraw;

pub use crate::models::{BucketWidth, DrawNo, ProgressWindow, TimeBucket};
