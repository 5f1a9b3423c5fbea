use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{BucketWidth, DrawNo, ProgressWindow, TimeBucket};

// =========================================================
// Occupancy types + route
// =========================================================

/// Parameters of one occupancy computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OccupancyParams {
    /// Bucket width: estimated time spent at the house, in minutes.
    pub time_at_house: BucketWidth,
    /// Portion of each draw's date span to include.
    pub progress: ProgressWindow,
}

impl OccupancyParams {
    pub fn new(time_at_house: BucketWidth, progress: ProgressWindow) -> Self {
        Self {
            time_at_house,
            progress,
        }
    }
}

/// Sales counted in one time bucket of one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub time_bucket: TimeBucket,
    pub sales: u32,
}

/// Sales per time bucket on a single weekend date, buckets ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCurve {
    pub date: NaiveDate,
    pub points: Vec<CurvePoint>,
    /// `(index + 1) / num_dates` in date order; the latest date is 1.0.
    pub recency: f64,
}

/// Distribution summary of a draw's `(date, bucket)` sales counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileMarkers {
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
    pub p100: f64,
}

impl PercentileMarkers {
    /// Quartiles `(q1, q2, q3, q4)`; `q4` is the maximum.
    pub fn quartiles(&self) -> (f64, f64, f64, f64) {
        (self.p25, self.p50, self.p75, self.p100)
    }

    pub fn is_ordered(&self) -> bool {
        self.p25 <= self.p50
            && self.p50 <= self.p75
            && self.p75 <= self.p90
            && self.p90 <= self.p95
            && self.p95 <= self.p100
    }
}

/// Curves and markers of one draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawOccupancy {
    pub draw_no: DrawNo,
    /// Position of the draw in first-seen order of the log.
    pub index: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub cutoff_lower: NaiveDate,
    pub cutoff_upper: NaiveDate,
    pub curves: Vec<DailyCurve>,
    pub markers: PercentileMarkers,
}

impl DrawOccupancy {
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.curves.iter().map(|c| c.date).collect()
    }
}

/// A draw left out of the report because nothing survived the filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDraw {
    pub draw_no: DrawNo,
    pub index: usize,
    pub reason: String,
}

/// Result of one occupancy computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyReport {
    pub params: OccupancyParams,
    pub draws: Vec<DrawOccupancy>,
    pub skipped: Vec<SkippedDraw>,
}

impl OccupancyReport {
    pub fn draw(&self, draw_no: DrawNo) -> Option<&DrawOccupancy> {
        self.draws.iter().find(|d| d.draw_no == draw_no)
    }

    pub fn is_skipped(&self, draw_no: DrawNo) -> bool {
        self.skipped.iter().any(|s| s.draw_no == draw_no)
    }
}

/// Overview of one draw in the loaded log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawSummary {
    pub draw_no: DrawNo,
    pub event_count: usize,
    pub weekend_event_count: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

/// Route function name constant for occupancy data
pub const GET_OCCUPANCY_DATA: &str = "get_occupancy_data";

/// Route function name constant for the draw listing
pub const LIST_DRAWS: &str = "list_draws";
