//! Application-level configuration.
//!
//! - [`ReviewParams`] — batching, record limits, judgment timeouts, PII policy

pub mod review_params;

pub use review_params::ReviewParams;
