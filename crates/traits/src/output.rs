//! OutputSink trait for writing generated files.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum OutputError {
    #[error("Failed to write '{path}': {message}")]
    WriteFailed { path: String, message: String },

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// A destination for generated atlases, sheet images and documents.
///
/// Paths are slash-separated and relative to the sink's root; intermediate
/// directories are created on demand.
pub trait OutputSink: Send + Sync + Debug {
    fn write(&self, path: &str, bytes: &[u8]) -> Result<(), OutputError>;

    /// Removes everything under `dir` so a run starts from a clean directory.
    fn reset_dir(&self, dir: &str) -> Result<(), OutputError>;

    fn name(&self) -> &'static str;
}

/// Collects written files in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryOutputSink {
    files: Arc<Mutex<BTreeMap<String, Arc<Vec<u8>>>>>,
}

impl InMemoryOutputSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<Arc<Vec<u8>>> {
        self.files.lock().ok()?.get(path).cloned()
    }

    /// All written paths in sorted order. Empty if the lock is poisoned.
    pub fn paths(&self) -> Vec<String> {
        self.files
            .lock()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl OutputSink for InMemoryOutputSink {
    fn write(&self, path: &str, bytes: &[u8]) -> Result<(), OutputError> {
        let mut files = self.files.lock().map_err(|_| OutputError::WriteFailed {
            path: path.to_string(),
            message: "output store lock poisoned".to_string(),
        })?;
        files.insert(path.to_string(), Arc::new(bytes.to_vec()));
        Ok(())
    }

    fn reset_dir(&self, dir: &str) -> Result<(), OutputError> {
        let mut files = self.files.lock().map_err(|_| OutputError::WriteFailed {
            path: dir.to_string(),
            message: "output store lock poisoned".to_string(),
        })?;
        let prefix = format!("{}/", dir.trim_end_matches('/'));
        files.retain(|path, _| !path.starts_with(&prefix));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "InMemoryOutputSink"
    }
}
