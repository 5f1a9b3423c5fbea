//! # PH Occupancy Backend
//!
//! Weekend time-of-day sales occupancy for the PH draw dashboard.
//!
//! The crate turns a flat wager log into per-draw, per-day occupancy curves
//! with percentile reference lines, and serves them to the dashboard frontend
//! over a small REST API.
//!
//! ## Pipeline
//!
//! ```text
//! load_events(path) -> EventTable -> compute_occupancy(params) -> build_dashboard
//! ```
//!
//! ## Architecture
//!
//! - [`models`]: Events, draw identifiers, time buckets and progress windows
//! - [`parsing`]: CSV loading and feature derivation
//! - [`cache`]: Checksum-keyed memoization of the loaded table
//! - [`services`]: Quantiles and the occupancy transform
//! - [`routes`]: Report, chart and control types handed to the frontend
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod routes;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{OccupancyError, OccupancyResult};
