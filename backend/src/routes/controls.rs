use serde::{Deserialize, Serialize};

use super::occupancy::OccupancyParams;
use crate::error::{OccupancyError, OccupancyResult};
use crate::models::{BucketWidth, ProgressWindow};

// =========================================================
// Dashboard controls
// =========================================================

/// Single-value slider shown by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderDefinition {
    pub key: String,
    pub label: String,
    pub min_value: u32,
    pub max_value: u32,
    pub step: u32,
    pub value: u32,
    pub format: String,
    pub help: String,
}

impl SliderDefinition {
    /// Check `value` lies on the slider's grid.
    pub fn accepts(&self, value: u32) -> bool {
        value >= self.min_value
            && value <= self.max_value
            && (value - self.min_value) % self.step.max(1) == 0
    }
}

/// Two-handle range slider shown by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSliderDefinition {
    pub key: String,
    pub label: String,
    pub min_value: u32,
    pub max_value: u32,
    pub step: u32,
    pub value: (u32, u32),
    pub format: String,
    pub help: String,
}

impl RangeSliderDefinition {
    pub fn accepts(&self, lower: u32, upper: u32) -> bool {
        let on_grid = |v: u32| {
            v >= self.min_value
                && v <= self.max_value
                && (v - self.min_value) % self.step.max(1) == 0
        };
        on_grid(lower) && on_grid(upper) && lower <= upper
    }
}

/// Controls the dashboard renders above the charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlDefinitions {
    pub time_at_house: SliderDefinition,
    pub progress_pct: RangeSliderDefinition,
}

impl Default for ControlDefinitions {
    fn default() -> Self {
        Self {
            time_at_house: SliderDefinition {
                key: "time_at_house".to_string(),
                label: "Est. time spent at house (mins)".to_string(),
                min_value: 10,
                max_value: 60,
                step: 10,
                value: 30,
                format: "%d mins".to_string(),
                help: "How long do you think people will spend at the house?".to_string(),
            },
            progress_pct: RangeSliderDefinition {
                key: "progress_pct".to_string(),
                label: "Draw phase (percentage)".to_string(),
                min_value: 0,
                max_value: 100,
                step: 1,
                value: (0, 100),
                format: "%d%%".to_string(),
                help: "Use this to view only the final 25% (busiest) part of the draw.".to_string(),
            },
        }
    }
}

/// Raw slider values as sent by the dashboard; missing values fall back to
/// the slider defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyQuery {
    #[serde(default)]
    pub time_at_house: Option<u32>,
    #[serde(default)]
    pub progress_lower: Option<u32>,
    #[serde(default)]
    pub progress_upper: Option<u32>,
}

impl ControlDefinitions {
    /// Validate a query against the slider ranges and build the parameters.
    pub fn resolve(&self, query: &OccupancyQuery) -> OccupancyResult<OccupancyParams> {
        let minutes = query.time_at_house.unwrap_or(self.time_at_house.value);
        if !self.time_at_house.accepts(minutes) {
            return Err(OccupancyError::InvalidParameters(format!(
                "time_at_house must be between {} and {} in steps of {}, got {}",
                self.time_at_house.min_value,
                self.time_at_house.max_value,
                self.time_at_house.step,
                minutes
            )));
        }

        let lower = query.progress_lower.unwrap_or(self.progress_pct.value.0);
        let upper = query.progress_upper.unwrap_or(self.progress_pct.value.1);
        if !self.progress_pct.accepts(lower, upper) {
            return Err(OccupancyError::InvalidParameters(format!(
                "progress window must satisfy {} <= lower <= upper <= {}, got ({}, {})",
                self.progress_pct.min_value, self.progress_pct.max_value, lower, upper
            )));
        }

        let to_pct = |v: u32| {
            u8::try_from(v).map_err(|_| {
                OccupancyError::InvalidParameters(format!("progress value {} out of range", v))
            })
        };

        Ok(OccupancyParams::new(
            BucketWidth::new(minutes)?,
            ProgressWindow::new(to_pct(lower)?, to_pct(upper)?)?,
        ))
    }
}

/// Route function name constant for the control definitions
pub const GET_CONTROLS: &str = "get_controls";
