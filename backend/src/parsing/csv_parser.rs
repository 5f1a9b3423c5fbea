use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord};
use std::path::Path;

use crate::cache::calculate_checksum;
use crate::error::{OccupancyError, OccupancyResult};
use crate::models::{DrawNo, Event, EventTable};

/// Timestamp format of the `wager_datetime` column.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column holding the wager timestamp in the export.
pub const WAGER_DATETIME_COLUMN: &str = "wager_datetime";
/// Internal name of the timestamp column, also accepted in the header.
pub const DATETIME_COLUMN: &str = "datetime";
pub const CUSTOMER_ID_COLUMN: &str = "customer_id";
pub const DRAW_NO_COLUMN: &str = "draw_no";

/// Positions of the required columns in the header.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    datetime: usize,
    customer_id: usize,
    draw_no: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> OccupancyResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| OccupancyError::MissingColumn {
                column: name.to_string(),
            })
        };

        let datetime = match find(WAGER_DATETIME_COLUMN) {
            Some(idx) => idx,
            None => require(DATETIME_COLUMN).map_err(|_| OccupancyError::MissingColumn {
                column: WAGER_DATETIME_COLUMN.to_string(),
            })?,
        };

        Ok(Self {
            datetime,
            customer_id: require(CUSTOMER_ID_COLUMN)?,
            draw_no: require(DRAW_NO_COLUMN)?,
        })
    }
}

/// Read and parse the event log at `csv_path`.
pub fn load_events(csv_path: &Path) -> OccupancyResult<EventTable> {
    let bytes = std::fs::read(csv_path).map_err(|source| OccupancyError::Io {
        path: csv_path.display().to_string(),
        source,
    })?;
    parse_events_bytes(&bytes)
}

/// Parse an event log held in memory.
pub fn parse_events_str(content: &str) -> OccupancyResult<EventTable> {
    parse_events_bytes(content.as_bytes())
}

/// Parse raw CSV content into an [`EventTable`].
///
/// Fails on the first malformed row; nothing is returned for a partial load.
pub fn parse_events_bytes(bytes: &[u8]) -> OccupancyResult<EventTable> {
    parse_events_with_checksum(bytes, calculate_checksum(bytes))
}

/// Parse raw CSV content whose checksum the caller already computed.
pub fn parse_events_with_checksum(bytes: &[u8], checksum: String) -> OccupancyResult<EventTable> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let headers = reader.headers().map_err(csv_error)?.clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut events = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        events.push(parse_record(&record, columns, line)?);
    }

    Ok(EventTable::new(events, checksum))
}

fn parse_record(record: &StringRecord, columns: ColumnIndex, line: u64) -> OccupancyResult<Event> {
    let field = |idx: usize, name: &str| {
        record
            .get(idx)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| OccupancyError::parse(line, name, "missing value"))
    };

    let raw_datetime = field(columns.datetime, WAGER_DATETIME_COLUMN)?;
    let datetime = NaiveDateTime::parse_from_str(raw_datetime, DATETIME_FORMAT).map_err(|e| {
        OccupancyError::parse(
            line,
            WAGER_DATETIME_COLUMN,
            format!(
                "'{}' does not match {}: {}",
                raw_datetime, DATETIME_FORMAT, e
            ),
        )
    })?;

    let customer_id = record
        .get(columns.customer_id)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    let raw_draw = field(columns.draw_no, DRAW_NO_COLUMN)?;
    let draw_no = raw_draw.parse::<i64>().map_err(|_| {
        OccupancyError::parse(
            line,
            DRAW_NO_COLUMN,
            format!("'{}' is not an integer draw number", raw_draw),
        )
    })?;

    Ok(Event::with_customer(datetime, customer_id, DrawNo::new(draw_no)))
}

fn csv_error(err: csv::Error) -> OccupancyError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    OccupancyError::parse(line, "<record>", err.to_string())
}
