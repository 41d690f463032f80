//! JSONL append-only assessment store.
//!
//! Each [`StoredAssessment`] becomes one JSON line, appended through a
//! buffered writer.

use async_trait::async_trait;
use audit_application::ports::assessment_store::{AssessmentStore, StoreError, StoredAssessment};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Append-only store writing one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every batch and on `Drop`.
pub struct JsonlAssessmentStore {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAssessmentStore {
    /// Open (or create) the store file, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, documents: &[StoredAssessment]) -> Result<(), StoreError> {
        let lines = documents
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| StoreError::Unavailable("store writer poisoned".to_string()))?;
        for line in &lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl AssessmentStore for JsonlAssessmentStore {
    async fn insert_many(&self, documents: Vec<StoredAssessment>) -> Result<(), StoreError> {
        self.append(&documents)?;
        debug!(
            "Appended {} document(s) to {}",
            documents.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl Drop for JsonlAssessmentStore {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
