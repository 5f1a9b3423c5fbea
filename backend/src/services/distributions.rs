use crate::api::PercentileMarkers;
use crate::error::{OccupancyError, OccupancyResult};
use crate::models::DrawNo;

/// Linear-interpolation quantile of an ascending slice.
///
/// This is the "inclusive" estimator: position `h = (n - 1) * q`, then
/// interpolate between the two neighbouring order statistics. Returns `None`
/// for an empty slice. `q` is clamped to `[0, 1]`.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let q = q.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let fraction = h - lo as f64;

    Some(sorted[lo] + fraction * (sorted[hi] - sorted[lo]))
}

/// Compute the percentile markers of a draw's grouped sales counts.
///
/// Every marker goes through [`quantile`] on the same sorted copy, so the
/// markers are ordered `p25 <= p50 <= p75 <= p90 <= p95 <= p100`.
pub fn compute_markers(draw_no: DrawNo, values: &[f64]) -> OccupancyResult<PercentileMarkers> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let at = |q: f64| quantile(&sorted, q).ok_or(OccupancyError::EmptyData { draw_no });

    Ok(PercentileMarkers {
        p25: at(0.25)?,
        p50: at(0.5)?,
        p75: at(0.75)?,
        p90: at(0.9)?,
        p95: at(0.95)?,
        p100: at(1.0)?,
    })
}
