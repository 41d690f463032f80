//! Review configuration from TOML (`[review]` section)

use audit_domain::GuidancePolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReviewConfig {
    /// Records assessed concurrently per batch
    pub batch_size: usize,
    pub rapid_record_count: usize,
    pub full_min_records: usize,
    /// Records beyond this are excluded from a full review
    pub full_max_records: usize,
    /// Leading characters sent for person-name detection
    pub name_detection_prefix_chars: usize,
    pub guidance: GuidancePolicy,
    /// Block on detected person names instead of anonymizing and continuing
    pub block_on_person_names: bool,
}

impl Default for FileReviewConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            rapid_record_count: 2,
            full_min_records: 10,
            full_max_records: 20,
            name_detection_prefix_chars: 8000,
            guidance: GuidancePolicy::Standard,
            block_on_person_names: true,
        }
    }
}
