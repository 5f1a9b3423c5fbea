//! Parsers for the sales event log.
//!
//! # Parsers
//!
//! - [`csv_parser`]: Parse the CSV wager export into an [`EventTable`](crate::models::EventTable)
//!
//! # Example
//!
//! ```no_run
//! use ph_occupancy::parsing::load_events;
//! use std::path::Path;
//!
//! let table = load_events(Path::new("seasonal_ph_sales.csv"))
//!     .expect("Failed to load sales");
//! println!("Loaded {} events across {} draws", table.len(), table.draws().len());
//! ```

pub mod csv_parser;

#[cfg(test)]
mod csv_parser_tests;

pub use csv_parser::{
    load_events, parse_events_bytes, parse_events_str, parse_events_with_checksum, DATETIME_FORMAT,
};
