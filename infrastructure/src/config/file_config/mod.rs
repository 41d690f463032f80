//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod judgment;
mod output;
mod review;
mod store;

pub use judgment::{DEFAULT_API_KEY_ENV, FileJudgmentConfig};
pub use output::FileOutputConfig;
pub use review::FileReviewConfig;
pub use store::FileStoreConfig;

use audit_application::ReviewParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("review.batch_size cannot be 0")]
    ZeroBatchSize,

    #[error("judgment.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("judgment.endpoint cannot be empty")]
    EmptyEndpoint,

    #[error("judgment.model cannot be empty")]
    EmptyModelName,

    #[error("review.full_min_records ({min}) exceeds review.full_max_records ({max})")]
    InvalidRecordLimits { min: usize, max: usize },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Batching, record limits and PII policy
    pub review: FileReviewConfig,
    /// Judgment capability endpoint
    pub judgment: FileJudgmentConfig,
    /// Assessment persistence
    pub store: FileStoreConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.review.batch_size == 0 {
            return Err(ConfigValidationError::ZeroBatchSize);
        }
        if self.judgment.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.judgment.endpoint.trim().is_empty() {
            return Err(ConfigValidationError::EmptyEndpoint);
        }
        if self.judgment.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.review.full_min_records > self.review.full_max_records {
            return Err(ConfigValidationError::InvalidRecordLimits {
                min: self.review.full_min_records,
                max: self.review.full_max_records,
            });
        }
        Ok(())
    }

    /// Use-case parameters from the `[review]` and `[judgment]` sections
    pub fn review_params(&self) -> ReviewParams {
        let review = &self.review;
        ReviewParams {
            batch_size: review.batch_size,
            rapid_record_count: review.rapid_record_count,
            full_min_records: review.full_min_records,
            full_max_records: review.full_max_records,
            judgment_timeout: Duration::from_secs(self.judgment.timeout_seconds),
            judgment_retries: self.judgment.retries,
            name_detection_prefix_chars: review.name_detection_prefix_chars,
            guidance: review.guidance,
            block_on_person_names: review.block_on_person_names,
        }
    }
}
