use serde::{Deserialize, Serialize};

use super::occupancy::{DrawOccupancy, OccupancyParams, OccupancyReport, SkippedDraw};
use crate::models::DrawNo;

// =========================================================
// Chart types consumed by the dashboard renderer
// =========================================================

/// Page header of the dashboard.
pub const DASHBOARD_HEADER: &str = "Occupancy model for PH traffic";

/// Line and reference-line colour.
pub const LINE_COLOR: &str = "#000000";

/// Number of chart columns; draws are dealt round-robin by index.
pub const NUM_COLUMNS: usize = 2;

/// One date's sales curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    /// Series label, the date as `YYYY-MM-DD`.
    pub name: String,
    /// Bucket labels `HH:MM:SS`, ascending.
    pub x: Vec<String>,
    pub y: Vec<u32>,
    pub opacity: f64,
    pub color: String,
    pub width: u32,
}

/// Horizontal dashed marker across the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub y: f64,
    pub label: String,
    pub dash: String,
    pub color: String,
    pub opacity: f64,
}

/// Everything needed to draw one draw's figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub draw_no: DrawNo,
    /// Position of the draw in first-seen order.
    pub index: usize,
    pub title: String,
    /// Column this chart goes into, `index % 2`.
    pub column: usize,
    pub series: Vec<LineSeries>,
    pub reference_lines: Vec<ReferenceLine>,
}

/// Full dashboard payload: charts laid out in two columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub header: String,
    pub params: OccupancyParams,
    pub columns: Vec<Vec<ChartData>>,
    /// Draws omitted because no weekend sales fell inside the window.
    pub skipped: Vec<SkippedDraw>,
}

impl Dashboard {
    /// All charts in draw order.
    pub fn charts(&self) -> Vec<&ChartData> {
        let mut charts: Vec<&ChartData> = self.columns.iter().flatten().collect();
        charts.sort_by_key(|c| c.index);
        charts
    }
}

/// Label of a percentile reference line, value truncated to an integer.
pub fn percentile_label(percentile: u32, value: f64) -> String {
    format!("{}th Percentile: {}", percentile, value.trunc() as i64)
}

/// Build the figure of one draw.
pub fn build_chart(draw: &DrawOccupancy) -> ChartData {
    let series = draw
        .curves
        .iter()
        .map(|curve| LineSeries {
            name: curve.date.format("%Y-%m-%d").to_string(),
            x: curve.points.iter().map(|p| p.time_bucket.label()).collect(),
            y: curve.points.iter().map(|p| p.sales).collect(),
            opacity: curve.recency,
            color: LINE_COLOR.to_string(),
            width: 1,
        })
        .collect();

    let markers = &draw.markers;
    let reference_lines = [(90, markers.p90), (95, markers.p95), (100, markers.p100)]
        .into_iter()
        .map(|(percentile, value)| ReferenceLine {
            y: value,
            label: percentile_label(percentile, value),
            dash: "dash".to_string(),
            color: LINE_COLOR.to_string(),
            opacity: 1.0,
        })
        .collect();

    ChartData {
        draw_no: draw.draw_no,
        index: draw.index,
        title: format!("# of Sales by Time of Day - Draw {}", draw.draw_no),
        column: draw.index % NUM_COLUMNS,
        series,
        reference_lines,
    }
}

/// Lay every computed draw out in the two dashboard columns.
pub fn build_dashboard(report: &OccupancyReport) -> Dashboard {
    let mut columns: Vec<Vec<ChartData>> = vec![Vec::new(); NUM_COLUMNS];
    for draw in &report.draws {
        let chart = build_chart(draw);
        columns[chart.column].push(chart);
    }

    Dashboard {
        header: DASHBOARD_HEADER.to_string(),
        params: report.params,
        columns,
        skipped: report.skipped.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CurvePoint, DailyCurve, PercentileMarkers};
    use crate::models::TimeBucket;
    use chrono::{NaiveDate, NaiveTime};

    fn draw(draw_no: i64, index: usize) -> DrawOccupancy {
        let date = NaiveDate::from_ymd_opt(2023, 6, 3).unwrap();
        let bucket = |h: u32, m: u32| TimeBucket(NaiveTime::from_hms_opt(h, m, 0).unwrap());
        DrawOccupancy {
            draw_no: DrawNo::new(draw_no),
            index,
            first_date: date,
            last_date: date,
            cutoff_lower: date,
            cutoff_upper: date,
            curves: vec![DailyCurve {
                date,
                points: vec![
                    CurvePoint {
                        time_bucket: bucket(9, 30),
                        sales: 2,
                    },
                    CurvePoint {
                        time_bucket: bucket(10, 0),
                        sales: 5,
                    },
                ],
                recency: 1.0,
            }],
            markers: PercentileMarkers {
                p25: 2.75,
                p50: 3.5,
                p75: 4.25,
                p90: 4.7,
                p95: 4.85,
                p100: 5.0,
            },
        }
    }

    #[test]
    fn test_percentile_label_truncates() {
        assert_eq!(percentile_label(90, 4.7), "90th Percentile: 4");
        assert_eq!(percentile_label(100, 5.0), "100th Percentile: 5");
    }

    #[test]
    fn test_build_chart() {
        let chart = build_chart(&draw(1203, 3));

        assert_eq!(chart.title, "# of Sales by Time of Day - Draw 1203");
        assert_eq!(chart.column, 1);
        assert_eq!(chart.series.len(), 1);

        let series = &chart.series[0];
        assert_eq!(series.name, "2023-06-03");
        assert_eq!(series.x, vec!["09:30:00", "10:00:00"]);
        assert_eq!(series.y, vec![2, 5]);
        assert_eq!(series.opacity, 1.0);
        assert_eq!(series.color, LINE_COLOR);

        let labels: Vec<&str> = chart.reference_lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["90th Percentile: 4", "95th Percentile: 4", "100th Percentile: 5"]
        );
        assert!(chart.reference_lines.iter().all(|l| l.dash == "dash"));
    }

    #[test]
    fn test_dashboard_round_robin_by_draw_index() {
        // draw at index 1 was skipped; the others keep their parity
        let report = OccupancyReport {
            params: OccupancyParams::default(),
            draws: vec![draw(10, 0), draw(12, 2), draw(13, 3)],
            skipped: vec![SkippedDraw {
                draw_no: DrawNo::new(11),
                index: 1,
                reason: "empty".to_string(),
            }],
        };

        let dashboard = build_dashboard(&report);
        assert_eq!(dashboard.header, DASHBOARD_HEADER);
        assert_eq!(dashboard.columns.len(), 2);

        let left: Vec<i64> = dashboard.columns[0].iter().map(|c| c.draw_no.value()).collect();
        let right: Vec<i64> = dashboard.columns[1].iter().map(|c| c.draw_no.value()).collect();
        assert_eq!(left, vec![10, 12]);
        assert_eq!(right, vec![13]);

        let order: Vec<i64> = dashboard.charts().iter().map(|c| c.draw_no.value()).collect();
        assert_eq!(order, vec![10, 12, 13]);
        assert_eq!(dashboard.skipped.len(), 1);
    }
}
