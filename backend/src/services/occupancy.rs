//! Per-draw weekend occupancy curves.
//!
//! `compute_occupancy` is a pure function of the derived event table and the
//! dashboard parameters. Nothing is cached here; each call starts from the
//! table.

use chrono::NaiveDate;
use log::{info, warn};
use std::collections::BTreeMap;

use super::distributions::compute_markers;
use crate::api::{
    CurvePoint, DailyCurve, DrawOccupancy, DrawSummary, OccupancyParams, OccupancyReport,
    SkippedDraw,
};
use crate::error::{OccupancyError, OccupancyResult};
use crate::models::{DrawNo, Event, EventTable, TimeBucket};

/// Compute the curves and markers of every draw in the table.
///
/// Draws are visited in first-seen order. A draw with no weekend rows inside
/// its progress window is reported in `skipped` and the others carry on; any
/// other error aborts the computation.
pub fn compute_occupancy(
    table: &EventTable,
    params: OccupancyParams,
) -> OccupancyResult<OccupancyReport> {
    let mut draws = Vec::new();
    let mut skipped = Vec::new();

    for (index, &draw_no) in table.draws().iter().enumerate() {
        match compute_draw(table, draw_no, index, params) {
            Ok(draw) => {
                let m = &draw.markers;
                info!(
                    "Draw {} quartiles: {}, {}, {}, {}",
                    draw_no, m.p25, m.p50, m.p75, m.p100
                );
                draws.push(draw);
            }
            Err(err @ OccupancyError::EmptyData { .. }) => {
                warn!("Skipping draw {}: {}", draw_no, err);
                skipped.push(SkippedDraw {
                    draw_no,
                    index,
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    Ok(OccupancyReport {
        params,
        draws,
        skipped,
    })
}

/// Compute one draw's curves and percentile markers.
///
/// `index` is the draw's position in first-seen order and is carried through
/// for layout.
pub fn compute_draw(
    table: &EventTable,
    draw_no: DrawNo,
    index: usize,
    params: OccupancyParams,
) -> OccupancyResult<DrawOccupancy> {
    let events: Vec<&Event> = table.events_for(draw_no).collect();

    let (first_date, last_date) = date_range(&events).ok_or(OccupancyError::EmptyData { draw_no })?;
    let (cutoff_lower, cutoff_upper) = params.progress.cutoffs(first_date, last_date);

    // (date, bucket) -> sales; BTreeMap keeps both keys ascending.
    // Rows without a customer id open their bucket but add no sale.
    let mut groups: BTreeMap<(NaiveDate, TimeBucket), u32> = BTreeMap::new();
    for event in events.iter().filter(|e| {
        e.is_weekend() && e.date() >= cutoff_lower && e.date() <= cutoff_upper
    }) {
        let bucket = params.time_at_house.bucket(event.datetime());
        let sales = groups.entry((event.date(), bucket)).or_insert(0);
        if event.customer_id().is_some() {
            *sales += 1;
        }
    }

    let sales: Vec<f64> = groups.values().map(|&count| f64::from(count)).collect();
    let markers = compute_markers(draw_no, &sales)?;

    Ok(DrawOccupancy {
        draw_no,
        index,
        first_date,
        last_date,
        cutoff_lower,
        cutoff_upper,
        curves: build_curves(&groups),
        markers,
    })
}

/// Split grouped counts into one curve per date, weighting each by recency.
fn build_curves(groups: &BTreeMap<(NaiveDate, TimeBucket), u32>) -> Vec<DailyCurve> {
    let mut curves: Vec<DailyCurve> = Vec::new();

    for (&(date, time_bucket), &sales) in groups {
        let point = CurvePoint { time_bucket, sales };
        match curves.last_mut() {
            Some(curve) if curve.date == date => curve.points.push(point),
            _ => curves.push(DailyCurve {
                date,
                points: vec![point],
                recency: 0.0,
            }),
        }
    }

    let num_dates = curves.len() as f64;
    for (idx, curve) in curves.iter_mut().enumerate() {
        curve.recency = (idx + 1) as f64 / num_dates;
    }

    curves
}

fn date_range(events: &[&Event]) -> Option<(NaiveDate, NaiveDate)> {
    let first = events.iter().map(|e| e.date()).min()?;
    let last = events.iter().map(|e| e.date()).max()?;
    Some((first, last))
}

/// Summarize every draw of the table, in first-seen order.
pub fn summarize_draws(table: &EventTable) -> Vec<DrawSummary> {
    table
        .draws()
        .iter()
        .filter_map(|&draw_no| {
            let events: Vec<&Event> = table.events_for(draw_no).collect();
            let (first_date, last_date) = date_range(&events)?;
            Some(DrawSummary {
                draw_no,
                event_count: events.len(),
                weekend_event_count: events.iter().filter(|e| e.is_weekend()).count(),
                first_date,
                last_date,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "occupancy_tests.rs"]
mod occupancy_tests;
