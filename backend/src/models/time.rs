//! Time-of-day bucketing and draw progress windows.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{OccupancyError, OccupancyResult};

/// Number of minutes in a calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

const NANOS_PER_MINUTE: i64 = 60_000_000_000;
const NANOS_PER_DAY: i64 = MINUTES_PER_DAY as i64 * NANOS_PER_MINUTE;

/// Width of a time-of-day bucket, in minutes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32")]
pub struct BucketWidth(u32);

impl BucketWidth {
    /// Create a bucket width. Must be in `1..=1440` minutes.
    pub fn new(minutes: u32) -> OccupancyResult<Self> {
        if minutes == 0 || minutes > MINUTES_PER_DAY {
            return Err(OccupancyError::InvalidParameters(format!(
                "bucket width must be between 1 and {} minutes, got {}",
                MINUTES_PER_DAY, minutes
            )));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    /// Round a timestamp to the nearest multiple of the width counted from
    /// midnight of the same day.
    ///
    /// Exact ties go to the even multiple. The upper candidate never goes
    /// past the following midnight, so the result is always a multiple of
    /// the width from midnight (or the next midnight itself).
    pub fn round(&self, datetime: NaiveDateTime) -> NaiveDateTime {
        let width = i64::from(self.0) * NANOS_PER_MINUTE;
        let time = datetime.time();
        // Leap-second nanos (>= 1e9) are clamped into the last second.
        let subsec = i64::from(time.nanosecond().min(999_999_999));
        let offset = i64::from(time.num_seconds_from_midnight()) * 1_000_000_000 + subsec;

        let quotient = offset / width;
        let down = quotient * width;
        let up = ((quotient + 1) * width).min(NANOS_PER_DAY);

        let below = offset - down;
        let above = up - offset;
        let rounded = if below < above {
            down
        } else if below > above {
            up
        } else if up == NANOS_PER_DAY || quotient % 2 == 1 {
            // midnight is multiple zero, which is even
            up
        } else {
            down
        };

        datetime.date().and_time(NaiveTime::MIN) + Duration::nanoseconds(rounded)
    }

    /// Time-of-day bucket a timestamp falls into.
    pub fn bucket(&self, datetime: NaiveDateTime) -> TimeBucket {
        TimeBucket(self.round(datetime).time())
    }
}

impl TryFrom<u32> for BucketWidth {
    type Error = OccupancyError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::new(minutes)
    }
}

impl Default for BucketWidth {
    fn default() -> Self {
        Self(30)
    }
}

/// Rounded time-of-day used as a grouping key independent of the date.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeBucket(pub NaiveTime);

impl TimeBucket {
    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_from_midnight(&self) -> u32 {
        self.0.num_seconds_from_midnight() / 60
    }

    /// Label in `HH:MM:SS` form.
    pub fn label(&self) -> String {
        self.0.format("%H:%M:%S").to_string()
    }
}

impl std::fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Sub-range of a draw's date span, as percentages of the span.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawProgressWindow")]
pub struct ProgressWindow {
    lower: u8,
    upper: u8,
}

/// Unvalidated wire form of [`ProgressWindow`].
#[derive(Deserialize)]
struct RawProgressWindow {
    lower: u8,
    upper: u8,
}

impl TryFrom<RawProgressWindow> for ProgressWindow {
    type Error = OccupancyError;

    fn try_from(raw: RawProgressWindow) -> Result<Self, Self::Error> {
        Self::new(raw.lower, raw.upper)
    }
}

impl ProgressWindow {
    /// Create a window. Both bounds must be in `0..=100` with `lower <= upper`.
    pub fn new(lower: u8, upper: u8) -> OccupancyResult<Self> {
        if upper > 100 {
            return Err(OccupancyError::InvalidParameters(format!(
                "progress bounds must be within 0..=100, got upper={}",
                upper
            )));
        }
        if lower > upper {
            return Err(OccupancyError::InvalidParameters(format!(
                "progress lower bound {} exceeds upper bound {}",
                lower, upper
            )));
        }
        Ok(Self { lower, upper })
    }

    /// The whole draw, `(0, 100)`.
    pub fn full() -> Self {
        Self { lower: 0, upper: 100 }
    }

    pub fn lower(&self) -> u8 {
        self.lower
    }

    pub fn upper(&self) -> u8 {
        self.upper
    }

    /// Map the window onto a draw spanning `first..=last`.
    ///
    /// Offsets are whole days, truncated: `first + floor(pct / 100 * span_days)`.
    pub fn cutoffs(&self, first: NaiveDate, last: NaiveDate) -> (NaiveDate, NaiveDate) {
        let span_days = (last - first).num_days().max(0);
        let offset = |pct: u8| Duration::days(i64::from(pct) * span_days / 100);
        (first + offset(self.lower), first + offset(self.upper))
    }
}

impl Default for ProgressWindow {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
