//! Personally identifying information: regex scan, name anonymization,
//! and the issue types reported to callers.

pub mod anonymize;
pub mod issue;
pub mod scanner;

pub use anonymize::{anonymize_names, initials, parse_detected_names};
pub use issue::{PiiIssue, PiiType, Severity, has_blocking};
pub use scanner::PiiScanner;
