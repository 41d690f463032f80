//! Infrastructure layer for consult-audit
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod openai;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileJudgmentConfig, FileOutputConfig,
    FileReviewConfig, FileStoreConfig,
};
pub use openai::OpenAiCompatGateway;
pub use store::JsonlAssessmentStore;
