//! Report format value object

use serde::{Deserialize, Serialize};

/// How a finished report is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable console report (default)
    #[default]
    Text,
    /// The report as JSON
    Json,
}
