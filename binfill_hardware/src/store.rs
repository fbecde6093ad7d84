//! File-backed persistence for the latest record.

use std::path::{Path, PathBuf};

use crate::error::{HwError, Result};
use crate::util::write_atomic;
use binfill_traits::{MeasurementRecord, RecordStore};

/// Persists the latest measurement as pretty JSON at a fixed path.
/// Best effort: only the most recent record is kept.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back the last persisted record, if any.
    pub fn load_last(path: &Path) -> Result<MeasurementRecord> {
        let bytes = std::fs::read(path)?;
        serde_json::from_slice(&bytes).map_err(|e| HwError::Parse(e.to_string()))
    }
}

impl RecordStore for FileStore {
    fn save(
        &mut self,
        record: &MeasurementRecord,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bytes = serde_json::to_vec_pretty(record)?;
        write_atomic(&self.path, &bytes)?;
        tracing::debug!(path = %self.path.display(), "record persisted");
        Ok(())
    }
}
