//! Assessment store configuration from TOML (`[store]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// Persist assessments after each review
    pub enabled: bool,
    /// JSONL file; defaults to the user data directory
    pub path: Option<PathBuf>,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl FileStoreConfig {
    /// `path`, or `$XDG_DATA_HOME/consult-audit/assessments.jsonl`
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(|| {
            dirs::data_dir().map(|d| d.join("consult-audit").join("assessments.jsonl"))
        })
    }
}
