//! Review parameters — use case control.
//!
//! [`ReviewParams`] groups the static parameters that control
//! [`RunReviewUseCase`](crate::use_cases::run_review::RunReviewUseCase):
//! batching, record-count limits, judgment timeouts, and PII policy.

use audit_domain::GuidancePolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewParams {
    /// Records dispatched concurrently per batch
    pub batch_size: usize,
    /// Records a rapid review must contain
    pub rapid_record_count: usize,
    /// Minimum records for a full review
    pub full_min_records: usize,
    /// Records beyond this are dropped from a full review and counted
    pub full_max_records: usize,
    /// Per-call limit for the judgment capability
    pub judgment_timeout: Duration,
    /// Extra attempts after a failed judgment call
    pub judgment_retries: u32,
    /// Leading characters of the input sent for name detection
    pub name_detection_prefix_chars: usize,
    pub guidance: GuidancePolicy,
    /// Treat detected person names as blocking (HIGH) rather than auto-anonymizing
    pub block_on_person_names: bool,
}

impl Default for ReviewParams {
    fn default() -> Self {
        Self {
            batch_size: 10,
            rapid_record_count: 2,
            full_min_records: 10,
            full_max_records: 20,
            judgment_timeout: Duration::from_secs(60),
            judgment_retries: 1,
            name_detection_prefix_chars: 8000,
            guidance: GuidancePolicy::Standard,
            block_on_person_names: true,
        }
    }
}

impl ReviewParams {
    // ==================== Builder Methods ====================

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    pub fn with_full_limits(mut self, min: usize, max: usize) -> Self {
        self.full_min_records = min;
        self.full_max_records = max;
        self
    }

    pub fn with_judgment_timeout(mut self, timeout: Duration) -> Self {
        self.judgment_timeout = timeout;
        self
    }

    pub fn with_judgment_retries(mut self, retries: u32) -> Self {
        self.judgment_retries = retries;
        self
    }

    pub fn with_name_detection_prefix(mut self, chars: usize) -> Self {
        self.name_detection_prefix_chars = chars;
        self
    }

    pub fn with_guidance(mut self, guidance: GuidancePolicy) -> Self {
        self.guidance = guidance;
        self
    }

    pub fn with_block_on_person_names(mut self, block: bool) -> Self {
        self.block_on_person_names = block;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ReviewParams::default();
        assert_eq!(params.batch_size, 10);
        assert_eq!(params.rapid_record_count, 2);
        assert_eq!(params.full_min_records, 10);
        assert_eq!(params.full_max_records, 20);
        assert_eq!(params.judgment_retries, 1);
        assert!(params.block_on_person_names);
    }

    #[test]
    fn test_builder() {
        let params = ReviewParams::default()
            .with_batch_size(0)
            .with_full_limits(3, 5)
            .with_guidance(GuidancePolicy::Lenient);

        assert_eq!(params.batch_size, 1);
        assert_eq!(params.full_min_records, 3);
        assert_eq!(params.full_max_records, 5);
        assert_eq!(params.guidance, GuidancePolicy::Lenient);
    }
}
