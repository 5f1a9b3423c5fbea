//! In-memory memoization of loaded event tables.

use log::{debug, info};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::checksum::calculate_checksum;
use crate::error::{OccupancyError, OccupancyResult};
use crate::models::EventTable;
use crate::parsing::parse_events_with_checksum;

/// Cache of derived event tables, one slot per source path.
///
/// A slot holds the table built from the last content seen at that path and
/// is replaced when the content checksum changes. Tables are immutable once
/// inserted; callers share them through `Arc`.
#[derive(Clone, Default)]
pub struct DatasetCache {
    tables: Arc<RwLock<HashMap<PathBuf, Arc<EventTable>>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the table for the file's current content, parsing it only if
    /// the content changed since the last call for this path.
    pub fn get_or_load(&self, path: &Path) -> OccupancyResult<Arc<EventTable>> {
        let bytes = std::fs::read(path).map_err(|source| OccupancyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.get_or_parse(path, &bytes)
    }

    /// Same as [`DatasetCache::get_or_load`] for content already in memory,
    /// stored under `source`.
    pub fn get_or_parse(&self, source: &Path, bytes: &[u8]) -> OccupancyResult<Arc<EventTable>> {
        let checksum = calculate_checksum(bytes);

        if let Some(table) = self.tables.read().get(source) {
            if table.checksum() == checksum {
                debug!("Dataset cache hit for {} ({})", source.display(), checksum);
                return Ok(Arc::clone(table));
            }
        }

        let table = Arc::new(parse_events_with_checksum(bytes, checksum)?);
        info!(
            "Loaded {} events across {} draws from {} (checksum {})",
            table.len(),
            table.draws().len(),
            source.display(),
            table.checksum()
        );

        self.tables
            .write()
            .insert(source.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    /// Number of sources held.
    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }

    pub fn clear(&self) {
        self.tables.write().clear();
    }
}
