use crate::error::OccupancyError;
use crate::models::DrawNo;
use crate::parsing::csv_parser::{load_events, parse_events_str};
use chrono::NaiveDate;
use std::io::Write;
use tempfile::NamedTempFile;

/// Helper to create a temp CSV file
fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

/// Test parsing a well-formed export
#[test]
fn test_load_events_basic() {
    let csv_content = "wager_datetime,customer_id,draw_no\n\
        2023-06-03 10:05:00,C001,101\n\
        2023-06-03 10:20:00,C002,101\n\
        2023-06-05 18:00:00,C003,102\n";

    let temp_file = create_temp_csv(csv_content);
    let result = load_events(temp_file.path());

    assert!(result.is_ok(), "Should parse basic CSV: {:?}", result.err());
    let table = result.unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.draws(), &[DrawNo::new(101), DrawNo::new(102)]);

    let first = &table.events()[0];
    assert_eq!(first.customer_id(), Some("C001"));
    assert_eq!(first.date(), NaiveDate::from_ymd_opt(2023, 6, 3).unwrap());
    assert!(first.is_weekend());
    assert!(!table.events()[2].is_weekend());
}

/// Extra columns and column order do not matter
#[test]
fn test_parse_ignores_extra_columns() {
    let csv_content = "draw_no,channel,customer_id,wager_datetime,amount\n\
        7,web,C9,2023-06-04 08:00:00,25.0\n";

    let table = parse_events_str(csv_content).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.events()[0].draw_no(), DrawNo::new(7));
    assert_eq!(table.events()[0].day_of_week(), "Sunday");
}

/// The internal column name is accepted as well
#[test]
fn test_parse_accepts_renamed_datetime_column() {
    let csv_content = "datetime,customer_id,draw_no\n2023-06-04 08:00:00,C9,7\n";
    let table = parse_events_str(csv_content).unwrap();
    assert_eq!(table.len(), 1);
}

#[test]
fn test_parse_header_only_is_empty() {
    let table = parse_events_str("wager_datetime,customer_id,draw_no\n").unwrap();
    assert!(table.is_empty());
    assert!(table.draws().is_empty());
}

#[test]
fn test_missing_column_fails() {
    let csv_content = "wager_datetime,customer_id\n2023-06-04 08:00:00,C9\n";
    match parse_events_str(csv_content) {
        Err(OccupancyError::MissingColumn { column }) => assert_eq!(column, "draw_no"),
        other => panic!("expected MissingColumn, got {:?}", other),
    }
}

#[test]
fn test_missing_datetime_column_names_export_column() {
    let csv_content = "customer_id,draw_no\nC9,7\n";
    match parse_events_str(csv_content) {
        Err(OccupancyError::MissingColumn { column }) => {
            assert_eq!(column, "wager_datetime")
        }
        other => panic!("expected MissingColumn, got {:?}", other),
    }
}

/// One bad timestamp aborts the whole load
#[test]
fn test_malformed_timestamp_fails_fast() {
    let csv_content = "wager_datetime,customer_id,draw_no\n\
        2023-06-03 10:05:00,C001,101\n\
        03/06/2023 10:20,C002,101\n";

    match parse_events_str(csv_content) {
        Err(OccupancyError::Parse { line, column, .. }) => {
            assert_eq!(line, 3);
            assert_eq!(column, "wager_datetime");
        }
        other => panic!("expected Parse error, got {:?}", other),
    }
}

#[test]
fn test_missing_draw_no_fails() {
    let csv_content = "wager_datetime,customer_id,draw_no\n2023-06-03 10:05:00,C001,\n";
    let err = parse_events_str(csv_content).unwrap_err();
    assert!(matches!(err, OccupancyError::Parse { ref column, .. } if column == "draw_no"));
    assert!(err.is_fatal());
}

#[test]
fn test_non_integer_draw_no_fails() {
    let csv_content = "wager_datetime,customer_id,draw_no\n2023-06-03 10:05:00,C001,abc\n";
    let err = parse_events_str(csv_content).unwrap_err();
    assert!(err.to_string().contains("'abc' is not an integer draw number"));
}

/// An empty customer id keeps the row and the rest of the file
#[test]
fn test_empty_customer_id_is_kept() {
    let csv_content = "wager_datetime,customer_id,draw_no\n\
        2023-06-03 10:05:00,,1\n\
        2023-06-03 10:06:00,C2,1\n";

    let table = parse_events_str(csv_content).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.events()[0].customer_id(), None);
    assert_eq!(table.events()[1].customer_id(), Some("C2"));
}

#[test]
fn test_ragged_row_fails() {
    let csv_content = "wager_datetime,customer_id,draw_no\n2023-06-03 10:05:00,C001\n";
    assert!(matches!(
        parse_events_str(csv_content),
        Err(OccupancyError::Parse { .. })
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = load_events(std::path::Path::new("/nonexistent/sales.csv"));
    assert!(matches!(result, Err(OccupancyError::Io { .. })));
}

#[test]
fn test_checksum_tracks_content() {
    let a = parse_events_str("wager_datetime,customer_id,draw_no\n2023-06-03 10:05:00,C1,1\n")
        .unwrap();
    let b = parse_events_str("wager_datetime,customer_id,draw_no\n2023-06-03 10:05:00,C1,1\n")
        .unwrap();
    let c = parse_events_str("wager_datetime,customer_id,draw_no\n2023-06-03 10:05:00,C2,1\n")
        .unwrap();
    assert_eq!(a.checksum(), b.checksum());
    assert_ne!(a.checksum(), c.checksum());
    assert_eq!(a.checksum().len(), 64);
}
