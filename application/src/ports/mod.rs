//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod assessment_store;
pub mod llm_gateway;
pub mod progress;
