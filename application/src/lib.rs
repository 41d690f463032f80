//! Application layer for consult-audit
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ReviewParams;
pub use ports::{
    assessment_store::{AssessmentStore, StoreError, StoredAssessment},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::guard_pii::{PiiCheck, PiiGuard};
pub use use_cases::run_review::{ReviewRequest, RunReviewError, RunReviewUseCase};
