//! Domain error types

use crate::review::ReviewType;
use thiserror::Error;

/// Domain-level errors
///
/// All variants are validation failures: they are raised before any
/// judgment call is issued and carry enough detail for a caller to fix
/// the submission without reading logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No consultation text supplied")]
    EmptyInput,

    #[error("No consultation records found (expected lines starting 'DD-MMM-YYYY HH:MM')")]
    NoRecords,

    #[error("{review_type} review requires {expected} records, found {found}")]
    InvalidRecordCount {
        review_type: ReviewType,
        expected: RecordCountRule,
        found: usize,
    },

    #[error("Invalid guidance policy: {0}")]
    InvalidGuidance(String),
}

/// Record-count precondition attached to [`DomainError::InvalidRecordCount`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordCountRule {
    Exactly(usize),
    AtLeast(usize),
}

impl std::fmt::Display for RecordCountRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordCountRule::Exactly(n) => write!(f, "exactly {}", n),
            RecordCountRule::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}
