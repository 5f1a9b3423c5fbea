//! Application state for the HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::ControlDefinitions;
use crate::cache::DatasetCache;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Memoized event tables, keyed on source checksum
    pub cache: DatasetCache,
    /// Location of the sales CSV
    pub data_path: Arc<PathBuf>,
    /// Slider definitions used to validate queries
    pub controls: Arc<ControlDefinitions>,
}

impl AppState {
    /// Create a new application state reading sales from `data_path`.
    pub fn new(cache: DatasetCache, data_path: impl Into<PathBuf>) -> Self {
        Self {
            cache,
            data_path: Arc::new(data_path.into()),
            controls: Arc::new(ControlDefinitions::default()),
        }
    }
}
